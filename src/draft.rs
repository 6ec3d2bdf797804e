//! Form-draft persistence — the patient form survives between sessions.
//!
//! The storage port is a trait so the pipeline and scheduler stay free of
//! filesystem concerns; the file-backed store is the production impl. A
//! corrupt draft is tolerated: it logs and loads as absent, mirroring how
//! the form simply starts blank.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config;
use crate::models::PatientDraft;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Draft storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Draft serialization error: {0}")]
    Serialization(String),
}

/// Storage port: load on init, save on change.
pub trait DraftStore {
    fn load(&self) -> Result<Option<PatientDraft>, DraftError>;
    fn save(&self, draft: &PatientDraft) -> Result<(), DraftError>;
}

/// JSON file in the app data directory.
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    /// `~/MedDiary/draft.json`
    pub fn default_location() -> Self {
        Self {
            path: config::app_data_dir().join("draft.json"),
        }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Result<Option<PatientDraft>, DraftError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Saved draft is unreadable, starting blank"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, draft: &PatientDraft) -> Result<(), DraftError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(draft)
            .map_err(|e| DraftError::Serialization(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
