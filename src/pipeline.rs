//! The generation pipeline: validate → narrative provider → scheduler →
//! document assembler. One sequential run per user action; every stage
//! validates its own preconditions and any failure is terminal — no
//! partial diary is ever produced.

use thiserror::Error;

use crate::docx::{diary_filename, render_diary, RenderError};
use crate::models::{PatientDraft, ValidationError};
use crate::narrative::{
    build_narrative_prompt, parse_template_response, NarrativeProvider, ProviderError,
    NARRATIVE_SYSTEM_PROMPT,
};
use crate::scheduler::{build_entries, ScheduleError};
use crate::vitals::VitalsSource;

/// Any failure across the run. Variants map one-to-one onto the stages.
#[derive(Debug, Error)]
pub enum DiaryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// The finished artifact, ready for delivery.
#[derive(Debug)]
pub struct GeneratedDiary {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub entry_count: usize,
}

/// Run the full pipeline for one form submission.
///
/// Validation happens before the provider round trip: bad input never
/// causes network I/O.
pub fn generate_diary(
    draft: &PatientDraft,
    provider: &dyn NarrativeProvider,
    vitals: &mut dyn VitalsSource,
) -> Result<GeneratedDiary, DiaryError> {
    let ctx = draft.validate()?;
    tracing::info!(
        admission = %ctx.admission,
        surgery = %ctx.surgery,
        discharge = %ctx.discharge,
        "Input validated, requesting narrative templates"
    );

    let prompt = build_narrative_prompt(&ctx);
    let raw = provider.generate(&prompt, NARRATIVE_SYSTEM_PROMPT)?;
    let templates = parse_template_response(&raw)?;
    tracing::info!("Narrative templates received and validated");

    let entries = build_entries(&ctx, &templates, vitals)?;
    let bytes = render_diary(&ctx, &entries)?;
    let filename = diary_filename(&ctx.full_name);
    tracing::info!(
        filename = %filename,
        entry_count = entries.len(),
        size_bytes = bytes.len(),
        "Diary rendered"
    );

    Ok(GeneratedDiary {
        filename,
        bytes,
        entry_count: entries.len(),
    })
}
