use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::paths;
use crate::utils::io;

const DEFAULT_NAME: &str = "Unnamed Utility";
const DEFAULT_DESCRIPTION: &str = "No description available.";

/// On-disk utility metadata record (`util.json`).
///
/// All fields are optional; unknown keys are ignored. `path` and
/// `last_modified` are never read from here: they are computed at scan
/// time (see `scan::Utility`), so stray keys with those names in the file
/// have no effect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UtilityMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

impl UtilityMetadata {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_NAME,
        }
    }

    pub fn display_description(&self) -> &str {
        match self.description.as_deref() {
            Some(description) if !description.trim().is_empty() => description,
            _ => DEFAULT_DESCRIPTION,
        }
    }

    /// Build command, if one is configured.
    ///
    /// An absent, empty, or whitespace-only `build` value means
    /// "no build step" rather than an error.
    pub fn build_command(&self) -> Option<&str> {
        self.build
            .as_deref()
            .map(str::trim)
            .filter(|cmd| !cmd.is_empty())
    }
}

/// Load and parse `util.json` from a utility directory.
///
/// Distinguishes the two failure shapes callers care about:
/// a missing file (`metadata.not_found`) and unreadable or malformed
/// content (`metadata.invalid_json` / `internal.io_error`).
pub fn load(utility_dir: &Path) -> Result<UtilityMetadata> {
    let path = paths::metadata(utility_dir);

    if !path.exists() {
        return Err(Error::metadata_not_found(path.display().to_string()));
    }

    let raw = io::read_file(&path, "read utility metadata")?;

    serde_json::from_str(&raw)
        .map_err(|e| Error::metadata_invalid_json(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_metadata(dir: &TempDir, content: &str) {
        fs::write(dir.path().join(paths::METADATA_FILE_NAME), content).unwrap();
    }

    #[test]
    fn load_parses_all_fields() {
        let dir = TempDir::new().unwrap();
        write_metadata(
            &dir,
            r#"{"name": "Foo", "description": "desc", "build": "make"}"#,
        );

        let metadata = load(dir.path()).unwrap();
        assert_eq!(metadata.display_name(), "Foo");
        assert_eq!(metadata.display_description(), "desc");
        assert_eq!(metadata.build_command(), Some("make"));
    }

    #[test]
    fn defaults_apply_for_missing_fields() {
        let dir = TempDir::new().unwrap();
        write_metadata(&dir, "{}");

        let metadata = load(dir.path()).unwrap();
        assert_eq!(metadata.display_name(), "Unnamed Utility");
        assert_eq!(metadata.display_description(), "No description available.");
        assert!(metadata.build_command().is_none());
    }

    #[test]
    fn empty_build_command_means_no_build() {
        let metadata = UtilityMetadata {
            build: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(metadata.build_command().is_none());
    }

    #[test]
    fn computed_keys_in_file_are_ignored() {
        let dir = TempDir::new().unwrap();
        write_metadata(
            &dir,
            r#"{"name": "Foo", "path": "fake", "last_modified": "1999-01-01"}"#,
        );

        let metadata = load(dir.path()).unwrap();
        assert_eq!(metadata.display_name(), "Foo");
    }

    #[test]
    fn missing_file_is_a_named_error() {
        let dir = TempDir::new().unwrap();
        let err = load(dir.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "metadata.not_found");
    }

    #[test]
    fn malformed_json_is_a_named_error() {
        let dir = TempDir::new().unwrap();
        write_metadata(&dir, "{not valid json");

        let err = load(dir.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "metadata.invalid_json");
    }
}
