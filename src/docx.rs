//! Document assembler — turns the ordered entry sequence into a .docx
//! artifact. Consecutive weekend placeholders collapse into one summary
//! line; clinical entries render as labeled blocks with the synthesized
//! vitals string appended to the objective status. All-or-nothing: any
//! serialization failure aborts the run with no partial file.

use chrono::{Datelike, NaiveDate};
use docx_rs::*;
use thiserror::Error;

use crate::calendar::format_display_date;
use crate::models::{DiaryEntry, PatientContext};
use crate::vitals::VitalsSample;

const FONT: &str = "Times New Roman";

// Half-point font sizes, as the format counts them.
const SIZE_TITLE: usize = 28;
const SIZE_HEADING: usize = 24;
const SIZE_BODY: usize = 22;

const WEEKEND_SUMMARY: &str = "Выходные дни. Пациент под наблюдением дежурного персонала. \
    Состояние стабильное. Жалоб нет. Гемодинамика стабильная.";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Document serialization failed: {0}")]
    Serialization(String),
}

/// A renderable unit: one clinical entry, or one collapsed weekend run.
#[derive(Debug, PartialEq)]
pub enum DiaryBlock<'a> {
    Clinical(&'a DiaryEntry),
    WeekendRest { first: NaiveDate, last: NaiveDate },
}

/// Collapse consecutive weekend placeholders into single summary blocks.
pub fn group_blocks(entries: &[DiaryEntry]) -> Vec<DiaryBlock<'_>> {
    let mut blocks = Vec::with_capacity(entries.len());
    let mut run: Option<(NaiveDate, NaiveDate)> = None;

    for entry in entries {
        if entry.is_weekend {
            run = match run {
                None => Some((entry.date, entry.date)),
                Some((first, _)) => Some((first, entry.date)),
            };
            continue;
        }
        if let Some((first, last)) = run.take() {
            blocks.push(DiaryBlock::WeekendRest { first, last });
        }
        blocks.push(DiaryBlock::Clinical(entry));
    }
    if let Some((first, last)) = run {
        blocks.push(DiaryBlock::WeekendRest { first, last });
    }

    blocks
}

/// Date label for a weekend run: "08-09.06.2024", or a single date for a
/// lone weekend day.
pub fn weekend_label(first: NaiveDate, last: NaiveDate) -> String {
    if first == last {
        format_display_date(first)
    } else {
        format!(
            "{:02}-{:02}.{:02}.{}",
            first.day(),
            last.day(),
            first.month(),
            first.year()
        )
    }
}

/// The synthesized vitals string appended after the objective status.
/// Never passed through the narrative sanitizer.
pub fn vitals_line(v: &VitalsSample) -> String {
    format!(
        "ЧД: {}/мин. Пульс: {}/мин. АД: {} мм.рт.ст. t: {:.1}°C.",
        v.respiratory_rate, v.heart_rate, v.blood_pressure, v.temperature
    )
}

/// Output filename: `Дневник_<name with spaces replaced by underscores>.docx`.
pub fn diary_filename(full_name: &str) -> String {
    let name = full_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("Дневник_{}.docx", name)
}

/// Render the full diary to .docx bytes.
pub fn render_diary(ctx: &PatientContext, entries: &[DiaryEntry]) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new().page_margin(
        // ~1cm top/right/bottom, ~2cm left for binding (twentieths of a point)
        PageMargin::new().top(567).right(567).bottom(567).left(1134),
    );

    docx = docx
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(styled("ДНЕВНИКИ НАБЛЮДЕНИЯ", SIZE_TITLE).bold()),
        )
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(styled(&format!("Пациент: {}", ctx.full_name), SIZE_HEADING).bold()),
        )
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(styled(&format!("Диагноз: {}", ctx.diagnosis), SIZE_BODY).italic()),
        )
        .add_paragraph(Paragraph::new());

    for block in group_blocks(entries) {
        match block {
            DiaryBlock::WeekendRest { first, last } => {
                let text = format!("{} – {}", weekend_label(first, last), WEEKEND_SUMMARY);
                docx = docx.add_paragraph(
                    Paragraph::new().add_run(styled(&text, SIZE_BODY).italic()),
                );
                docx = docx.add_paragraph(Paragraph::new());
            }
            DiaryBlock::Clinical(entry) => {
                docx = append_entry_block(docx, ctx, entry);
            }
        }
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| RenderError::Serialization(e.to_string()))?;
    Ok(cursor.into_inner())
}

fn append_entry_block(mut docx: Docx, ctx: &PatientContext, entry: &DiaryEntry) -> Docx {
    let title = if entry.is_head_of_dept_inspection {
        "ОСМОТР ЛЕЧАЩЕГО ВРАЧА С ЗАВЕДУЮЩИМ ОТДЕЛЕНИЕМ"
    } else {
        "ОСМОТР ЛЕЧАЩЕГО ВРАЧА"
    };

    docx = docx.add_paragraph(
        Paragraph::new()
            .align(AlignmentType::Center)
            .add_run(styled(title, SIZE_HEADING).bold()),
    );

    docx = docx.add_paragraph(
        Paragraph::new()
            .add_run(styled("Дата: ", SIZE_BODY).bold())
            .add_run(styled(&format_display_date(entry.date), SIZE_BODY))
            .add_run(styled("    Время: ", SIZE_BODY).bold())
            .add_run(styled(&entry.time, SIZE_BODY)),
    );

    let objective = format!("{} {}", entry.objective_status, vitals_line(&entry.vitals));
    docx = docx
        .add_paragraph(labeled_field("Жалобы: ", &entry.complaints))
        .add_paragraph(labeled_field("Объективно: ", &objective))
        .add_paragraph(labeled_field("St. localis: ", &entry.local_status))
        .add_paragraph(labeled_field("Назначения: ", &entry.recommendations));

    docx = docx.add_paragraph(signature_line("Лечащий врач", &ctx.doctor_name));
    if entry.is_head_of_dept_inspection {
        docx = docx.add_paragraph(signature_line("Зав. отделением", &ctx.head_of_dept_name));
    }

    docx.add_paragraph(Paragraph::new())
}

fn styled(text: &str, size: usize) -> Run {
    Run::new()
        .add_text(text)
        .size(size)
        .fonts(RunFonts::new().ascii(FONT).hi_ansi(FONT))
}

fn labeled_field(label: &str, text: &str) -> Paragraph {
    Paragraph::new()
        .add_run(styled(label, SIZE_BODY).bold())
        .add_run(styled(text, SIZE_BODY))
}

fn signature_line(label: &str, name: &str) -> Paragraph {
    Paragraph::new()
        .add_run(styled(&format!("{}: {}", label, name), SIZE_BODY).bold())
        .add_run(styled("    ___________________", SIZE_BODY))
}
