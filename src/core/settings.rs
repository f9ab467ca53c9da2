//! Deployment settings document (default `<base>/settings.json`).
//!
//! Settings are opaque to the core and handed to task bodies as parsed
//! JSON. A missing file and malformed JSON are both fatal for the
//! invocation; a parse failure never leaks a partial value.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Resolve the effective settings path: explicit override or `<base>/settings.json`.
pub fn resolve_path(base_path: &Path, override_path: Option<&str>) -> PathBuf {
    match override_path {
        Some(p) => PathBuf::from(shellexpand::tilde(p).to_string()),
        None => base_path.join(DEFAULT_SETTINGS_FILE),
    }
}

pub fn load(path: &Path) -> Result<Value> {
    let display = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(Error::settings_not_found(&display));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("read {}", display))))?;

    serde_json::from_str(&content).map_err(|e| Error::settings_parse(&display, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_settings_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join(DEFAULT_SETTINGS_FILE)).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::SettingsNotFound);
    }

    #[test]
    fn trailing_comma_is_settings_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_SETTINGS_FILE);
        fs::write(&path, r#"{"env": "production",}"#).unwrap();
        let err = load(&path).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::SettingsParseError);
        assert!(err.message.contains("settings.json"));
    }

    #[test]
    fn valid_document_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_SETTINGS_FILE);
        fs::write(&path, r#"{"env": "staging", "replicas": 3}"#).unwrap();
        let value = load(&path).unwrap();
        assert_eq!(value["replicas"], 3);
    }
}
