//! Entry scheduler — expands the stay's date range and the four narrative
//! templates into the full ordered sequence of diary entries.
//!
//! All the temporal policy lives here: phase selection, the two-entry
//! surgery day, weekend placeholders, inspection-day tagging, and per-entry
//! vitals synthesis. The scheduler performs no I/O and draws randomness
//! only through the injected `VitalsSource`.

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::{dates_in_range, is_inspection_day, is_weekend};
use crate::models::{DayType, DiaryEntry, PatientContext, Phase, TemplateBundle};
use crate::vitals::{ObservationSlot, VitalsSource};

/// Fixed recommendation for the surgery-day morning entry.
pub const SURGERY_MORNING_RECOMMENDATIONS: &str =
    "Подготовка к операции. Премедикация по назначению анестезиолога.";

/// Fixed complaint text for the surgery-day evening entry.
pub const SURGERY_EVENING_COMPLAINTS: &str =
    "На боли в области послеоперационной раны, слабость.";

/// Fixed local status for the surgery-day evening entry.
pub const SURGERY_EVENING_LOCAL_STATUS: &str =
    "Повязка сухая, чистая. Отек умеренный. Кровотечения нет.";

/// Fallback objective status when the template field came back empty.
pub const DEFAULT_OBJECTIVE_STATUS: &str =
    "Общее состояние удовлетворительное. Сознание ясное.";

const SURGERY_EVENING_TIME: &str = "18:00";

/// Contract violations that should have been caught by input validation.
/// The scheduler fails loudly instead of silently defaulting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Surgery date {surgery} is outside the stay {admission}..{discharge}")]
    SurgeryOutsideStay {
        surgery: NaiveDate,
        admission: NaiveDate,
        discharge: NaiveDate,
    },
}

/// Classify a non-weekend, non-surgery day into exactly one phase.
///
/// Precedence: pre-op before everything (the pre-discharge boundary can
/// land before the surgery for short stays), then discharge day over
/// pre-discharge, then the post-op default.
pub fn classify_phase(date: NaiveDate, ctx: &PatientContext) -> Phase {
    if date < ctx.surgery {
        return Phase::PreOp;
    }
    if date == ctx.discharge {
        return Phase::DischargeDay;
    }
    if Some(date) == ctx.pre_discharge_date() {
        return Phase::PreDischarge;
    }
    Phase::PostOpStandard
}

/// Expand the stay into the ordered entry sequence.
///
/// One entry per non-weekend day, two on the surgery day, one placeholder
/// per weekend day. Weekend handling wins over surgery/discharge handling
/// when the dates coincide.
pub fn build_entries(
    ctx: &PatientContext,
    templates: &TemplateBundle,
    vitals: &mut dyn VitalsSource,
) -> Result<Vec<DiaryEntry>, ScheduleError> {
    if ctx.surgery < ctx.admission || ctx.surgery > ctx.discharge {
        return Err(ScheduleError::SurgeryOutsideStay {
            surgery: ctx.surgery,
            admission: ctx.admission,
            discharge: ctx.discharge,
        });
    }

    let dates = dates_in_range(ctx.admission, ctx.discharge);
    let mut entries = Vec::with_capacity(dates.len() + 1);

    for date in dates {
        if is_weekend(date) {
            entries.push(DiaryEntry::weekend_placeholder(date));
            continue;
        }

        if date == ctx.surgery {
            entries.push(surgery_morning_entry(date, ctx, templates, vitals));
            entries.push(surgery_evening_entry(date, ctx, templates, vitals));
            continue;
        }

        entries.push(regular_entry(date, ctx, templates, vitals));
    }

    tracing::debug!(
        entry_count = entries.len(),
        admission = %ctx.admission,
        discharge = %ctx.discharge,
        "Diary entries scheduled"
    );

    Ok(entries)
}

fn surgery_morning_entry(
    date: NaiveDate,
    ctx: &PatientContext,
    templates: &TemplateBundle,
    vitals: &mut dyn VitalsSource,
) -> DiaryEntry {
    // Morning of the surgery always reads as pre-op, whatever the phase
    // classification would say, with a fixed preparation order.
    let pre_op = templates.narrative(Phase::PreOp);
    DiaryEntry {
        date,
        time: format_time(8, vitals.observation_minute()),
        day_type: DayType::SurgeryMorning,
        is_weekend: false,
        is_surgery_day: true,
        is_head_of_dept_inspection: is_inspection_day(date),
        is_discharge: date == ctx.discharge,
        vitals: vitals.vitals(ObservationSlot::Morning),
        complaints: pre_op.complaints.clone(),
        objective_status: objective_or_default(&pre_op.objective_status),
        local_status: pre_op.local_status.clone(),
        recommendations: SURGERY_MORNING_RECOMMENDATIONS.to_string(),
    }
}

fn surgery_evening_entry(
    date: NaiveDate,
    ctx: &PatientContext,
    templates: &TemplateBundle,
    vitals: &mut dyn VitalsSource,
) -> DiaryEntry {
    // The head of department does not perform a second same-day inspection.
    let post_op = templates.narrative(Phase::PostOpStandard);
    DiaryEntry {
        date,
        time: SURGERY_EVENING_TIME.to_string(),
        day_type: DayType::SurgeryEvening,
        is_weekend: false,
        is_surgery_day: true,
        is_head_of_dept_inspection: false,
        is_discharge: date == ctx.discharge,
        vitals: vitals.vitals(ObservationSlot::Evening),
        complaints: SURGERY_EVENING_COMPLAINTS.to_string(),
        objective_status: objective_or_default(&post_op.objective_status),
        local_status: SURGERY_EVENING_LOCAL_STATUS.to_string(),
        recommendations: post_op.recommendations.clone(),
    }
}

fn regular_entry(
    date: NaiveDate,
    ctx: &PatientContext,
    templates: &TemplateBundle,
    vitals: &mut dyn VitalsSource,
) -> DiaryEntry {
    let phase = classify_phase(date, ctx);
    tracing::trace!(date = %date, phase = phase.as_str(), "Phase selected");
    let narrative = templates.narrative(phase);
    DiaryEntry {
        date,
        time: format_time(9, vitals.observation_minute()),
        day_type: DayType::Regular,
        is_weekend: false,
        is_surgery_day: false,
        is_head_of_dept_inspection: is_inspection_day(date),
        is_discharge: date == ctx.discharge,
        vitals: vitals.vitals(ObservationSlot::Morning),
        complaints: narrative.complaints.clone(),
        objective_status: objective_or_default(&narrative.objective_status),
        local_status: narrative.local_status.clone(),
        recommendations: narrative.recommendations.clone(),
    }
}

fn objective_or_default(objective: &str) -> String {
    if objective.trim().is_empty() {
        DEFAULT_OBJECTIVE_STATUS.to_string()
    } else {
        objective.to_string()
    }
}

fn format_time(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PhaseNarrative, Sex};
    use crate::vitals::FixedVitals;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ctx(admission: NaiveDate, surgery: NaiveDate, discharge: NaiveDate) -> PatientContext {
        PatientContext {
            full_name: "Иванова Мария Петровна".into(),
            admission,
            discharge,
            surgery,
            diagnosis: "Острый аппендицит".into(),
            doctor_name: "Петров А.А.".into(),
            head_of_dept_name: "Сидоров В.В.".into(),
            sex: Sex::Female,
        }
    }

    fn phase(marker: &str) -> PhaseNarrative {
        PhaseNarrative {
            complaints: format!("Жалобы {marker}"),
            objective_status: format!("Статус {marker}"),
            local_status: format!("Локально {marker}"),
            recommendations: format!("Рекомендации {marker}"),
        }
    }

    fn templates() -> TemplateBundle {
        TemplateBundle {
            pre_op: phase("preop"),
            post_op_standard: phase("postop"),
            pre_discharge: phase("predischarge"),
            discharge_day: phase("discharge"),
        }
    }

    fn schedule(ctx: &PatientContext) -> Vec<DiaryEntry> {
        build_entries(ctx, &templates(), &mut FixedVitals::nominal()).unwrap()
    }

    // Mon 2024-06-03 admission, Wed 06-05 surgery, Mon 06-10 discharge.
    fn standard_stay() -> PatientContext {
        ctx(d(2024, 6, 3), d(2024, 6, 5), d(2024, 6, 10))
    }

    #[test]
    fn standard_stay_shape() {
        let entries = schedule(&standard_stay());
        // 8 calendar days: 6 weekdays (one of them surgery → 2 entries) + 2 weekend
        assert_eq!(entries.len(), 9);
        assert!(entries.windows(2).all(|w| w[0].date <= w[1].date));

        let surgery: Vec<_> = entries.iter().filter(|e| e.date == d(2024, 6, 5)).collect();
        assert_eq!(surgery.len(), 2);
        assert_eq!(surgery[0].day_type, DayType::SurgeryMorning);
        assert_eq!(surgery[1].day_type, DayType::SurgeryEvening);

        let weekends: Vec<_> = entries.iter().filter(|e| e.is_weekend).collect();
        assert_eq!(weekends.len(), 2);
        assert_eq!(weekends[0].date, d(2024, 6, 8));
        assert_eq!(weekends[1].date, d(2024, 6, 9));

        // Every other day yields exactly one entry
        for day in [3, 4, 6, 7, 10] {
            let count = entries.iter().filter(|e| e.date == d(2024, 6, day)).count();
            assert_eq!(count, 1, "day {day}");
        }
    }

    #[test]
    fn phase_selection_through_the_stay() {
        let stay = standard_stay();
        let entries = schedule(&stay);

        let by_date = |day: u32| {
            entries
                .iter()
                .find(|e| e.date == d(2024, 6, day) && e.day_type == DayType::Regular)
                .unwrap()
        };

        // Pre-op before surgery
        assert_eq!(by_date(3).complaints, "Жалобы preop");
        assert_eq!(by_date(4).complaints, "Жалобы preop");
        // Post-op after surgery
        assert_eq!(by_date(6).complaints, "Жалобы postop");
        assert_eq!(by_date(7).complaints, "Жалобы postop");
        // June 9 is the pre-discharge boundary but falls on a Sunday —
        // no pre-discharge entry exists in this stay.
        assert!(!entries.iter().any(|e| e.complaints.contains("predischarge")));
        // Discharge day uses the discharge template, not post-op-standard
        assert_eq!(by_date(10).complaints, "Жалобы discharge");
        assert!(by_date(10).is_discharge);
    }

    #[test]
    fn classification_is_total_and_exclusive() {
        let stay = ctx(d(2024, 7, 1), d(2024, 7, 3), d(2024, 7, 12));
        for date in crate::calendar::dates_in_range(stay.admission, stay.discharge) {
            if is_weekend(date) || date == stay.surgery {
                continue;
            }
            // classify_phase is a total function over remaining days
            let phase = classify_phase(date, &stay);
            match phase {
                Phase::PreOp => assert!(date < stay.surgery),
                Phase::DischargeDay => assert_eq!(date, stay.discharge),
                Phase::PreDischarge => assert_eq!(Some(date), stay.pre_discharge_date()),
                Phase::PostOpStandard => {
                    assert!(date > stay.surgery);
                    assert!(date < stay.pre_discharge_date().unwrap());
                }
            }
        }
    }

    #[test]
    fn pre_discharge_day_uses_its_own_template() {
        // Thu 08-01 .. Fri 08-09; pre-discharge boundary Thu 08-08.
        let stay = ctx(d(2024, 8, 1), d(2024, 8, 2), d(2024, 8, 9));
        let entries = schedule(&stay);
        let pre = entries.iter().find(|e| e.date == d(2024, 8, 8)).unwrap();
        assert_eq!(pre.complaints, "Жалобы predischarge");
        let last = entries.iter().find(|e| e.date == d(2024, 8, 9)).unwrap();
        assert_eq!(last.complaints, "Жалобы discharge");
    }

    #[test]
    fn surgery_morning_forces_pre_op_and_fixed_recommendation() {
        let entries = schedule(&standard_stay());
        let morning = entries
            .iter()
            .find(|e| e.day_type == DayType::SurgeryMorning)
            .unwrap();
        assert_eq!(morning.complaints, "Жалобы preop");
        assert_eq!(morning.objective_status, "Статус preop");
        assert_eq!(morning.local_status, "Локально preop");
        assert_eq!(morning.recommendations, SURGERY_MORNING_RECOMMENDATIONS);
        assert!(morning.time.starts_with("08:"));
        assert!(morning.is_surgery_day);
    }

    #[test]
    fn surgery_evening_is_fixed_post_op_without_inspection() {
        // Surgery on a Friday — morning gets the inspection, evening never.
        let stay = ctx(d(2024, 6, 3), d(2024, 6, 7), d(2024, 6, 12));
        let entries = schedule(&stay);
        let morning = entries
            .iter()
            .find(|e| e.day_type == DayType::SurgeryMorning)
            .unwrap();
        let evening = entries
            .iter()
            .find(|e| e.day_type == DayType::SurgeryEvening)
            .unwrap();

        assert!(morning.is_head_of_dept_inspection);
        assert!(!evening.is_head_of_dept_inspection);
        assert_eq!(evening.time, "18:00");
        assert_eq!(evening.complaints, SURGERY_EVENING_COMPLAINTS);
        assert_eq!(evening.local_status, SURGERY_EVENING_LOCAL_STATUS);
        assert_eq!(evening.objective_status, "Статус postop");
        assert_eq!(evening.recommendations, "Рекомендации postop");
    }

    #[test]
    fn inspection_flag_only_on_monday_and_friday() {
        let entries = schedule(&standard_stay());
        for entry in &entries {
            let expected = !entry.is_weekend
                && entry.day_type != DayType::SurgeryEvening
                && is_inspection_day(entry.date);
            assert_eq!(
                entry.is_head_of_dept_inspection, expected,
                "date {} type {:?}",
                entry.date, entry.day_type
            );
        }
        // Sanity: the stay actually contains inspection days (Mon 3rd, Mon 10th, Fri 7th)
        assert_eq!(
            entries.iter().filter(|e| e.is_head_of_dept_inspection).count(),
            3
        );
    }

    #[test]
    fn weekend_wins_over_surgery_date() {
        // Surgery scheduled on Saturday: the placeholder swallows the day.
        let stay = ctx(d(2024, 6, 3), d(2024, 6, 8), d(2024, 6, 12));
        let entries = schedule(&stay);
        let on_surgery: Vec<_> = entries.iter().filter(|e| e.date == d(2024, 6, 8)).collect();
        assert_eq!(on_surgery.len(), 1);
        assert_eq!(on_surgery[0].day_type, DayType::Weekend);
        assert!(!on_surgery[0].is_surgery_day);
        assert!(!entries.iter().any(|e| e.is_surgery_day));
    }

    #[test]
    fn weekend_wins_over_discharge_date() {
        // Discharge on Sunday: placeholder, no discharge template that day.
        let stay = ctx(d(2024, 6, 3), d(2024, 6, 5), d(2024, 6, 9));
        let entries = schedule(&stay);
        let last = entries.last().unwrap();
        assert_eq!(last.date, d(2024, 6, 9));
        assert_eq!(last.day_type, DayType::Weekend);
        assert!(!entries.iter().any(|e| e.complaints.contains("discharge")));
    }

    #[test]
    fn surgery_on_friday_boundary_is_normal() {
        // The weekday right at the weekend boundary still gets full handling.
        let stay = ctx(d(2024, 6, 3), d(2024, 6, 7), d(2024, 6, 12));
        let entries = schedule(&stay);
        let friday: Vec<_> = entries.iter().filter(|e| e.date == d(2024, 6, 7)).collect();
        assert_eq!(friday.len(), 2);
        assert!(friday.iter().all(|e| e.is_surgery_day));
    }

    #[test]
    fn every_clinical_entry_gets_fresh_vitals_and_weekends_zero() {
        let entries = schedule(&standard_stay());
        for entry in &entries {
            if entry.is_weekend {
                assert_eq!(entry.vitals, crate::vitals::VitalsSample::zeroed());
            } else {
                assert_eq!(entry.vitals.blood_pressure, "120/80");
                assert!(entry.vitals.heart_rate > 0);
            }
        }
    }

    #[test]
    fn surgery_outside_stay_is_contract_violation() {
        let mut stay = standard_stay();
        stay.surgery = d(2024, 6, 20);
        let err = build_entries(&stay, &templates(), &mut FixedVitals::nominal()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::SurgeryOutsideStay {
                surgery: d(2024, 6, 20),
                admission: d(2024, 6, 3),
                discharge: d(2024, 6, 10),
            }
        );
    }

    #[test]
    fn empty_objective_status_falls_back_to_default() {
        let mut bundle = templates();
        bundle.pre_op.objective_status = "  ".into();
        let entries =
            build_entries(&standard_stay(), &bundle, &mut FixedVitals::nominal()).unwrap();
        let first = &entries[0];
        assert_eq!(first.objective_status, DEFAULT_OBJECTIVE_STATUS);
    }

    #[test]
    fn observation_times_carry_minute_jitter() {
        let entries = schedule(&standard_stay());
        for entry in entries.iter().filter(|e| e.day_type == DayType::Regular) {
            assert_eq!(entry.time, "09:15");
        }
    }

    #[test]
    fn one_day_stay_with_surgery_on_weekday() {
        // Wed 06-05 only: surgery day == admission == discharge.
        let stay = ctx(d(2024, 6, 5), d(2024, 6, 5), d(2024, 6, 5));
        let entries = schedule(&stay);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.is_surgery_day && e.is_discharge));
    }
}
