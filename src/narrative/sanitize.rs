//! Strips numeric vital-sign mentions from AI-authored narrative text.
//!
//! The assembler appends a programmatically synthesized vitals string to
//! every objective-status field; any numbers the model authored despite the
//! prompt would duplicate or contradict them. Removal runs on all four
//! narrative fields, never on the synthesized vitals string itself.
//!
//! `sanitize_narrative` is idempotent: once the numeric mentions are gone,
//! a second pass is a no-op.

use std::sync::LazyLock;

use regex::Regex;

/// Labeled blood-pressure pair: "АД 120/80", "АД: 130/85 мм рт. ст.".
static BP_LABELED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:АД|[Аа]ртериальное\s+давление)\s*[-–—:=]?\s*\d{2,3}\s*/\s*\d{2,3}(?:\s*мм\.?\s*рт\.?\s*ст\.?)?",
    )
    .expect("valid regex")
});

/// Bare pressure pair with its unit: "120/80 мм рт ст".
static BP_BARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{2,3}\s*/\s*\d{2,3}\s*мм\.?\s*рт\.?\s*ст\.?").expect("valid regex")
});

/// Heart rate: "пульс 72", "ЧСС: 68 уд/мин", "Пульс 70 в минуту".
static HR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:ЧСС|[Пп]ульс)\s*[-–—:=]?\s*\d{2,3}(?:\s*(?:уд\.?\s*/?\s*в?\s*мин(?:уту)?\.?|в\s*мин(?:уту)?\.?|/\s*мин\.?))?",
    )
    .expect("valid regex")
});

/// Respiratory rate: "ЧД 17", "ЧДД: 16 в мин".
static RR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ЧДД?\s*[-–—:=]?\s*\d{1,2}(?:\s*(?:в\s*мин(?:уту)?\.?|/\s*мин\.?))?")
        .expect("valid regex")
});

/// Labeled temperature: "температура 36,6", "t 36.8°C", "Т° 37,0".
/// The numeric part is pinned to 3x.x so unrelated numbers are never eaten.
static TEMP_LABELED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[Тт]емпература(?:\s+тела)?|\b[tТ]\s*°?)\s*[-–—:=]?\s*3\d(?:[.,]\d)?\s*°?\s*[CС]?")
        .expect("valid regex")
});

/// Bare temperature with a degree unit: "36,6°C".
static TEMP_BARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"3\d[.,]\d\s*°\s*[CС]?").expect("valid regex")
});

/// Punctuation runs left behind by removal: ". , ," → ". ".
static ORPHAN_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([,.;:!?])\s*(?:[,.;:]\s*)+").expect("valid regex"));

/// Space squeezed in front of punctuation.
static SPACE_BEFORE_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.;:!?])").expect("valid regex"));

/// Leading orphan punctuation after a removal at the start of the text.
static LEADING_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s,.;:]+").expect("valid regex"));

/// Trailing orphan separators (a final period is kept).
static TRAILING_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,;:\-–—]+$").expect("valid regex"));

static MULTI_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid regex"));

/// Remove numeric vital-sign mentions and repair the text around them.
pub fn sanitize_narrative(text: &str) -> String {
    let mut result = text.to_string();

    for re in [
        &*BP_LABELED_RE,
        &*BP_BARE_RE,
        &*HR_RE,
        &*RR_RE,
        &*TEMP_LABELED_RE,
        &*TEMP_BARE_RE,
    ] {
        result = re.replace_all(&result, "").into_owned();
    }

    result = ORPHAN_PUNCT_RE.replace_all(&result, "$1 ").into_owned();
    result = SPACE_BEFORE_PUNCT_RE.replace_all(&result, "$1").into_owned();
    result = LEADING_PUNCT_RE.replace(&result, "").into_owned();
    result = TRAILING_PUNCT_RE.replace(&result, "").into_owned();
    result = MULTI_SPACE_RE.replace_all(&result, " ").into_owned();

    result.trim().to_string()
}
