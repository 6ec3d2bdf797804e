//! Patient identity and stay boundaries: the raw form draft and the
//! validated context the scheduler consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Patient sex as entered on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Default for Sex {
    // The form's pre-selected value.
    fn default() -> Self {
        Sex::Female
    }
}

/// Raw form input, persisted between sessions as the draft.
/// Dates stay as strings until validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    pub full_name: String,
    /// Admission, "YYYY-MM-DD"
    pub start_date: String,
    /// Discharge, "YYYY-MM-DD"
    pub end_date: String,
    /// "YYYY-MM-DD"; required by business rule, checked at validation
    pub surgery_date: String,
    pub diagnosis: String,
    pub doctor_name: String,
    pub head_of_dept_name: String,
    #[serde(default)]
    pub sex: Sex,
}

/// User-input failures. The pipeline never starts when any of these fire.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    #[error("Field {field} is not a valid date: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Admission date is after discharge date")]
    AdmissionAfterDischarge,

    #[error("Surgery date is missing — a surgery date is required")]
    SurgeryMissing,

    #[error("Surgery date is outside the admission–discharge interval")]
    SurgeryOutsideStay,
}

/// Validated, immutable input for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientContext {
    pub full_name: String,
    pub admission: NaiveDate,
    pub discharge: NaiveDate,
    pub surgery: NaiveDate,
    pub diagnosis: String,
    pub doctor_name: String,
    pub head_of_dept_name: String,
    pub sex: Sex,
}

impl PatientContext {
    /// The single day immediately before discharge — the pre-discharge
    /// phase window. `None` only when discharge is the minimum date.
    pub fn pre_discharge_date(&self) -> Option<NaiveDate> {
        self.discharge.pred_opt()
    }
}

impl PatientDraft {
    /// Validate the form input into a `PatientContext`.
    ///
    /// Enforces: required fields present, parseable dates,
    /// admission ≤ discharge, and admission ≤ surgery ≤ discharge.
    pub fn validate(&self) -> Result<PatientContext, ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::MissingField("fullName"));
        }
        if self.diagnosis.trim().is_empty() {
            return Err(ValidationError::MissingField("diagnosis"));
        }
        if self.doctor_name.trim().is_empty() {
            return Err(ValidationError::MissingField("doctorName"));
        }
        if self.head_of_dept_name.trim().is_empty() {
            return Err(ValidationError::MissingField("headOfDeptName"));
        }

        let admission = parse_date("startDate", &self.start_date)?;
        let discharge = parse_date("endDate", &self.end_date)?;

        if admission > discharge {
            return Err(ValidationError::AdmissionAfterDischarge);
        }

        if self.surgery_date.trim().is_empty() {
            return Err(ValidationError::SurgeryMissing);
        }
        let surgery = parse_date("surgeryDate", &self.surgery_date)?;
        if surgery < admission || surgery > discharge {
            return Err(ValidationError::SurgeryOutsideStay);
        }

        Ok(PatientContext {
            full_name: self.full_name.trim().to_string(),
            admission,
            discharge,
            surgery,
            diagnosis: self.diagnosis.trim().to_string(),
            doctor_name: self.doctor_name.trim().to_string(),
            head_of_dept_name: self.head_of_dept_name.trim().to_string(),
            sex: self.sex,
        })
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
