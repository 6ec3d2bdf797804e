use crate::calendar::format_display_date;
use crate::models::PatientContext;

/// System instruction for the narrative provider. Demands strict JSON with
/// the four phase keys and forbids numeric vitals in the free text — the
/// numbers are synthesized separately and appended by the assembler.
pub const NARRATIVE_SYSTEM_PROMPT: &str = r#"
Ты - ассистент хирурга. Твоя задача - сгенерировать ЧЕТЫРЕ шаблона состояния пациента для истории болезни.
Отвечай ТОЛЬКО валидным JSON объектом. Никакого маркдауна.

ПРАВИЛА - АБСОЛЮТНЫЕ, БЕЗ ИСКЛЮЧЕНИЙ:
1. В свободном тексте НЕ ДОЛЖНО быть числовых показателей: ни АД, ни пульса, ни ЧД, ни температуры.
2. Каждое поле - связный клинический текст на русском языке.
3. Никаких комментариев вне JSON.

Структура JSON должна быть строго такой:
{
  "preOp": {
    "complaints": "Жалобы до операции",
    "objectiveStatus": "Общий статус до операции",
    "localStatus": "Локальный статус до операции",
    "recommendations": "Рекомендации до операции"
  },
  "postOpStandard": {
    "complaints": "Жалобы после операции (стабильные)",
    "objectiveStatus": "Общий статус после операции",
    "localStatus": "Локальный статус (ранний п/о период)",
    "recommendations": "Рекомендации п/о"
  },
  "preDischarge": {
    "complaints": "Жалобы за день до выписки (улучшение)",
    "objectiveStatus": "Общий статус за день до выписки",
    "localStatus": "Локальный статус (заживление)",
    "recommendations": "Рекомендации накануне выписки"
  },
  "dischargeDay": {
    "complaints": "Жалобы в день выписки",
    "objectiveStatus": "Общий статус в день выписки",
    "localStatus": "Локальный статус (рана зажила)",
    "recommendations": "Рекомендации при выписке"
  }
}
"#;

/// Build the per-run prompt from the validated patient context.
pub fn build_narrative_prompt(ctx: &PatientContext) -> String {
    format!(
        r#"Пациент: {name}
Диагноз: "{diagnosis}"
Дата операции: {surgery}

Сгенерируй 4 статических состояния:
1. "preOp": период от поступления до операции.
2. "postOpStandard": период после операции (основной этап лечения).
3. "preDischarge": день накануне выписки (подготовка к выписке, швы спокойны).
4. "dischargeDay": день выписки (лечение завершено).
"#,
        name = ctx.full_name,
        diagnosis = ctx.diagnosis,
        surgery = format_display_date(ctx.surgery),
    )
}
