use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::error::{Error, ErrorCode, Result};
use crate::metadata;

/// Directories reserved for site tooling, never listed as utilities.
const RESERVED_DIRS: &[&str] = &["scripts", "node_modules"];

/// Shown when a utility directory yields no usable file timestamp at all.
const UNKNOWN_DATE: &str = "Unknown";

/// A discovered utility, ready for rendering.
///
/// `path` and `last_modified` are always computed here, never read from
/// the metadata file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Utility {
    pub path: String,
    pub name: String,
    pub description: String,
    pub last_modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

/// Outcome of inspecting one candidate directory.
///
/// A directory without util.json is not a utility and is skipped
/// silently; a directory whose util.json fails to parse is excluded
/// with a warning.
#[derive(Debug)]
pub enum ScanOutcome {
    Listed(Utility),
    NoMetadata,
    Invalid(Error),
}

/// Inspect a single directory for utility metadata.
pub fn classify(dir: &Path) -> ScanOutcome {
    let dir_name = match dir.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => return ScanOutcome::NoMetadata,
    };

    match metadata::load(dir) {
        Ok(meta) => ScanOutcome::Listed(Utility {
            path: dir_name,
            name: meta.display_name().to_string(),
            description: meta.display_description().to_string(),
            last_modified: last_modified_date(dir),
            build: meta.build_command().map(str::to_string),
        }),
        Err(err) if err.code == ErrorCode::MetadataNotFound => ScanOutcome::NoMetadata,
        Err(err) => ScanOutcome::Invalid(err),
    }
}

/// Scan the immediate subdirectories of `root` for utilities.
///
/// Hidden directories (leading `.`) and the reserved tooling directories
/// are skipped outright. A malformed util.json excludes that single
/// utility and the scan continues. Order is directory-iteration order;
/// the rendering sort uses it as its tie-break.
pub fn discover(root: &Path) -> Result<Vec<Utility>> {
    let entries = fs::read_dir(root)
        .map_err(|e| Error::internal_io(e.to_string(), Some("scan site root".to_string())))?;

    let mut utilities = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => continue,
        };

        if name.starts_with('.') || RESERVED_DIRS.contains(&name.as_str()) {
            continue;
        }

        match classify(&path) {
            ScanOutcome::Listed(utility) => utilities.push(utility),
            ScanOutcome::NoMetadata => {}
            ScanOutcome::Invalid(err) => {
                log_status!("scan", "Warning: skipping {}: {}", name, err);
            }
        }
    }

    Ok(utilities)
}

/// Most recent modification date of any file under the utility directory.
///
/// Per-file stat failures are skipped individually. If no file produces a
/// timestamp (empty directory, or every stat failed), the directory's own
/// mtime is used instead.
fn last_modified_date(dir: &Path) -> String {
    let mut latest: Option<SystemTime> = None;
    collect_mtimes(dir, &mut latest);

    let fallback = || fs::metadata(dir).and_then(|m| m.modified()).ok();

    match latest.or_else(fallback) {
        Some(time) => format_date(time),
        None => UNKNOWN_DATE.to_string(),
    }
}

fn collect_mtimes(dir: &Path, latest: &mut Option<SystemTime>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_mtimes(&path, latest);
        } else if let Ok(modified) = fs::metadata(&path).and_then(|m| m.modified()) {
            if latest.is_none_or(|current| modified > current) {
                *latest = Some(modified);
            }
        }
    }
}

fn format_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%d").to_string()
}
