pub mod entry;
pub mod patient;
pub mod template;

pub use entry::*;
pub use patient::*;
pub use template::*;
