//! The diary entry — one record per clinical observation event, produced
//! by the scheduler and consumed exactly once by the document assembler.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::vitals::VitalsSample;

/// Kind of observation event a calendar day produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Regular,
    SurgeryMorning,
    SurgeryEvening,
    Weekend,
}

/// One diary entry. Weekend placeholders carry zeroed vitals and empty
/// narrative fields; everything else carries a fresh sample and the
/// phase template text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub date: NaiveDate,
    /// "HH:MM"; empty for weekend placeholders
    pub time: String,
    pub day_type: DayType,

    pub is_weekend: bool,
    pub is_surgery_day: bool,
    /// True iff the date is Monday/Friday, the entry is not the
    /// surgery-evening reading, and the day is not a weekend.
    pub is_head_of_dept_inspection: bool,
    pub is_discharge: bool,

    pub vitals: VitalsSample,

    pub complaints: String,
    pub objective_status: String,
    pub local_status: String,
    pub recommendations: String,
}

impl DiaryEntry {
    /// Weekend placeholder: no observation, no narrative, no inspection.
    pub fn weekend_placeholder(date: NaiveDate) -> Self {
        Self {
            date,
            time: String::new(),
            day_type: DayType::Weekend,
            is_weekend: true,
            is_surgery_day: false,
            is_head_of_dept_inspection: false,
            is_discharge: false,
            vitals: VitalsSample::zeroed(),
            complaints: String::new(),
            objective_status: String::new(),
            local_status: String::new(),
            recommendations: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekend_placeholder_is_inert() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
        let entry = DiaryEntry::weekend_placeholder(date);
        assert_eq!(entry.day_type, DayType::Weekend);
        assert!(entry.is_weekend);
        assert!(!entry.is_surgery_day);
        assert!(!entry.is_head_of_dept_inspection);
        assert!(!entry.is_discharge);
        assert_eq!(entry.vitals, VitalsSample::zeroed());
        assert!(entry.complaints.is_empty());
        assert!(entry.time.is_empty());
    }

    #[test]
    fn day_type_serializes_snake_case() {
        let json = serde_json::to_string(&DayType::SurgeryMorning).unwrap();
        assert_eq!(json, "\"surgery_morning\"");
    }
}
