//! CLI entry point: load the patient form data, run the generation
//! pipeline, write the .docx next to the user.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use meddiary::draft::{DraftStore, FileDraftStore};
use meddiary::models::PatientDraft;
use meddiary::narrative::GeminiClient;
use meddiary::pipeline::generate_diary;
use meddiary::vitals::RandomVitals;

#[derive(Parser)]
#[command(name = "meddiary", version, about = "Surgical observation diary generator")]
struct Cli {
    /// Patient form data (JSON). When omitted, the last saved draft is used.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory to write the generated document into.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
}

fn main() -> ExitCode {
    meddiary::init_tracing();

    let store = FileDraftStore::default_location();
    match run(Cli::parse(), &store) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Ошибка: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, store: &dyn DraftStore) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let draft: PatientDraft = match &cli.input {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let draft = serde_json::from_str(&content)
                .map_err(|e| format!("{}: некорректный JSON формы: {e}", path.display()))?;
            // The freshly submitted form becomes the saved draft.
            store.save(&draft)?;
            draft
        }
        None => store
            .load()?
            .ok_or("Нет сохраненного черновика — укажите файл через --input")?,
    };

    // Form errors surface before the provider environment is consulted.
    draft.validate()?;

    let provider = GeminiClient::from_env()?;
    let mut vitals = RandomVitals::new();
    let diary = generate_diary(&draft, &provider, &mut vitals)?;

    fs::create_dir_all(&cli.output)?;
    let path = cli.output.join(&diary.filename);
    fs::write(&path, &diary.bytes)?;

    tracing::info!(
        path = %path.display(),
        entries = diary.entry_count,
        "Diary written"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_error_reported_before_missing_api_key() {
        std::env::remove_var(meddiary::config::API_KEY_ENV);

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("form.json");
        fs::write(
            &input,
            r#"{"fullName":"Иванова Мария Петровна","startDate":"2024-06-03","endDate":"2024-06-10","surgeryDate":"","diagnosis":"Острый холецистит","doctorName":"Петров А.А.","headOfDeptName":"Сидоров В.В."}"#,
        )
        .unwrap();

        let store = FileDraftStore::at_path(dir.path().join("draft.json"));
        let cli = Cli {
            input: Some(input),
            output: dir.path().to_path_buf(),
        };

        let err = run(cli, &store).unwrap_err();
        assert!(err.to_string().contains("Surgery date"), "{err}");
    }
}
