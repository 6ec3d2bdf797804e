//! Narrative provider boundary — prompt construction, the external
//! text-generation client, strict response parsing, and the numeric-vitals
//! sanitizer. Malformed provider output is a hard failure: nothing
//! best-effort ever reaches the scheduler.

pub mod gemini;
pub mod parser;
pub mod prompt;
pub mod sanitize;

pub use gemini::*;
pub use parser::*;
pub use prompt::*;
pub use sanitize::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API key not found — set the {0} environment variable")]
    MissingApiKey(&'static str),

    #[error("Narrative provider is unreachable: {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Provider returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Provider response failed schema validation: {0}")]
    SchemaMismatch(String),
}

/// Abstraction over the external text-generation service.
///
/// `generate` performs one blocking round trip and returns the raw model
/// text; schema validation happens in `parser`.
pub trait NarrativeProvider {
    fn generate(&self, prompt: &str, system: &str) -> Result<String, ProviderError>;
}
