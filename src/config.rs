use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MedDiary";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the Gemini API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Narrative generation model.
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/MedDiary/ on all platforms (user-visible, holds the form draft)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Read the provider API key from the environment.
pub fn api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("MedDiary"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn log_filter_targets_this_crate() {
        assert!(default_log_filter().starts_with("meddiary="));
    }
}
