//! Narrative templates — one bundle of four free-text fields per treatment
//! phase, produced once per run by the narrative provider.

use serde::{Deserialize, Serialize};

/// Treatment phase governing which narrative template applies.
///
/// Closed set: phase selection is an exhaustive match, never a loosely
/// typed template lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PreOp,
    PostOpStandard,
    PreDischarge,
    DischargeDay,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::PreOp => "pre_op",
            Phase::PostOpStandard => "post_op_standard",
            Phase::PreDischarge => "pre_discharge",
            Phase::DischargeDay => "discharge_day",
        }
    }
}

/// The four free-text narrative fields for one phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseNarrative {
    pub complaints: String,
    pub objective_status: String,
    pub local_status: String,
    pub recommendations: String,
}

/// All four phase narratives for a run. Immutable; shared by reference
/// across every entry of the same phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBundle {
    pub pre_op: PhaseNarrative,
    pub post_op_standard: PhaseNarrative,
    pub pre_discharge: PhaseNarrative,
    pub discharge_day: PhaseNarrative,
}

impl TemplateBundle {
    /// The narrative for a given phase.
    pub fn narrative(&self, phase: Phase) -> &PhaseNarrative {
        match phase {
            Phase::PreOp => &self.pre_op,
            Phase::PostOpStandard => &self.post_op_standard,
            Phase::PreDischarge => &self.pre_discharge,
            Phase::DischargeDay => &self.discharge_day,
        }
    }
}
