//! Strict parsing of the provider response into a `TemplateBundle`.
//!
//! The model is instructed to answer with bare JSON, but fenced blocks
//! show up anyway; both shapes are accepted. Schema validation is eager
//! and total: all four phases with all four string fields, or the run
//! aborts before the scheduler sees anything.

use serde::Deserialize;

use super::sanitize::sanitize_narrative;
use super::ProviderError;
use crate::models::{PhaseNarrative, TemplateBundle};

/// Parse, validate, and sanitize the raw provider text.
pub fn parse_template_response(response: &str) -> Result<TemplateBundle, ProviderError> {
    let json_str = extract_json(response)?;

    let raw: RawBundle = serde_json::from_str(&json_str)
        .map_err(|e| ProviderError::SchemaMismatch(e.to_string()))?;

    Ok(TemplateBundle {
        pre_op: sanitized(raw.pre_op),
        post_op_standard: sanitized(raw.post_op_standard),
        pre_discharge: sanitized(raw.pre_discharge),
        discharge_day: sanitized(raw.discharge_day),
    })
}

/// Wire shape: four required phases, four required string fields each.
/// Required-ness IS the schema check — a missing key fails deserialization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBundle {
    pre_op: RawPhase,
    post_op_standard: RawPhase,
    pre_discharge: RawPhase,
    discharge_day: RawPhase,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPhase {
    complaints: String,
    objective_status: String,
    local_status: String,
    recommendations: String,
}

fn sanitized(raw: RawPhase) -> PhaseNarrative {
    let clean = PhaseNarrative {
        complaints: sanitize_narrative(&raw.complaints),
        objective_status: sanitize_narrative(&raw.objective_status),
        local_status: sanitize_narrative(&raw.local_status),
        recommendations: sanitize_narrative(&raw.recommendations),
    };

    let before = raw.complaints.len()
        + raw.objective_status.len()
        + raw.local_status.len()
        + raw.recommendations.len();
    let after = clean.complaints.len()
        + clean.objective_status.len()
        + clean.local_status.len()
        + clean.recommendations.len();
    if after < before {
        tracing::warn!(
            removed_chars = before - after,
            "Numeric vitals stripped from provider narrative"
        );
    }

    clean
}

/// Pull the JSON object out of the response: a ```json fence if present,
/// otherwise the outermost brace pair.
fn extract_json(response: &str) -> Result<String, ProviderError> {
    let text = response.trim();

    if let Some(fence_start) = text.find("```json") {
        let content_start = fence_start + 7;
        let content = &text[content_start..];
        let fence_end = content
            .find("```")
            .ok_or_else(|| ProviderError::MalformedResponse("Unclosed JSON fence".into()))?;
        return Ok(content[..fence_end].trim().to_string());
    }

    let start = text
        .find('{')
        .ok_or_else(|| ProviderError::MalformedResponse("No JSON object found".into()))?;
    let end = text
        .rfind('}')
        .filter(|&e| e > start)
        .ok_or_else(|| ProviderError::MalformedResponse("No JSON object found".into()))?;

    Ok(text[start..=end].to_string())
}
