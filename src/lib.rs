pub mod calendar;
pub mod config;
pub mod docx;
pub mod draft;
pub mod models;
pub mod narrative;
pub mod pipeline;
pub mod scheduler;
pub mod vitals;

pub use docx::{diary_filename, render_diary, RenderError};
pub use draft::{DraftStore, FileDraftStore};
pub use models::{DiaryEntry, PatientContext, PatientDraft, Phase, TemplateBundle};
pub use narrative::{GeminiClient, NarrativeProvider, ProviderError};
pub use pipeline::{generate_diary, DiaryError, GeneratedDiary};
pub use scheduler::{build_entries, ScheduleError};
pub use vitals::{RandomVitals, VitalsSample, VitalsSource};

use tracing_subscriber::EnvFilter;

/// Initialize tracing once at startup.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
