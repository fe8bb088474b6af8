//! File plumbing for content rosters.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, deserialization
//! and name checks used by the content loading pipeline.

use loadorder_core::ResolveError;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading and activating content.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// Two roster entries share a name.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// A roster entry has an empty or whitespace-only name.
    #[error("entry {index} in {file} has an empty name")]
    EmptyName { file: PathBuf, index: usize },

    /// Resolution was invoked out of order.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(file = %path.display(), ?format, "reading data file");

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(path, e)),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    if detect_format(path)? != Format::Toml {
        return deserialize_file(path);
    }

    let table: toml::Table = deserialize_file(path)?;
    let array = table
        .get(toml_key)
        .ok_or_else(|| parse_error(path, format!("missing key '{toml_key}' in TOML file")))?
        .clone();
    array
        .try_into()
        .map_err(|e: toml::de::Error| parse_error(path, e))
}

// ===========================================================================
// Name checks
// ===========================================================================

/// Reject empty names and duplicate names within one roster file.
pub fn check_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
    file: &Path,
) -> Result<(), DataLoadError> {
    let mut seen = HashSet::new();
    for (index, name) in names.into_iter().enumerate() {
        if name.trim().is_empty() {
            return Err(DataLoadError::EmptyName {
                file: file.to_path_buf(),
                index,
            });
        }
        if !seen.insert(name) {
            return Err(DataLoadError::DuplicateName {
                file: file.to_path_buf(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cleanup, make_test_dir};
    use loadorder_core::{PrimaryRecord, SecondaryRecord};
    use std::fs;

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_ron() {
        assert_eq!(detect_format(Path::new("primary.ron")).unwrap(), Format::Ron);
    }

    #[test]
    fn detect_format_toml() {
        assert_eq!(
            detect_format(Path::new("primary.toml")).unwrap(),
            Format::Toml
        );
    }

    #[test]
    fn detect_format_json() {
        assert_eq!(
            detect_format(Path::new("primary.json")).unwrap(),
            Format::Json
        );
    }

    #[test]
    fn detect_format_unsupported() {
        let result = detect_format(Path::new("primary.yaml"));
        assert!(matches!(
            result,
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn detect_format_no_extension() {
        let result = detect_format(Path::new("primary"));
        assert!(matches!(
            result,
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // find_data_file / require_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_data_file_found() {
        let dir = make_test_dir("find_found");
        fs::write(dir.join("primary.json"), "[]").unwrap();

        let result = find_data_file(&dir, "primary").unwrap();
        assert_eq!(result, Some(dir.join("primary.json")));

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_missing() {
        let dir = make_test_dir("find_missing");

        let result = find_data_file(&dir, "primary").unwrap();
        assert_eq!(result, None);

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("find_conflict");
        fs::write(dir.join("primary.ron"), "[]").unwrap();
        fs::write(dir.join("primary.json"), "[]").unwrap();

        let result = find_data_file(&dir, "primary");
        assert!(matches!(
            result,
            Err(DataLoadError::ConflictingFormats { .. })
        ));

        cleanup(&dir);
    }

    #[test]
    fn require_data_file_missing() {
        let dir = make_test_dir("require_missing");

        let result = require_data_file(&dir, "primary");
        assert!(matches!(
            result,
            Err(DataLoadError::MissingRequired { ref file, .. }) if file == "primary"
        ));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // deserialize_list
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_list_ron() {
        let dir = make_test_dir("list_ron");
        let path = dir.join("primary.ron");
        fs::write(
            &path,
            r#"[(name: "Harbor"), (name: "Factory", dependencies: "Harbor , ")]"#,
        )
        .unwrap();

        let items: Vec<PrimaryRecord> = deserialize_list(&path, "primary").unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].dependencies.is_empty());
        assert_eq!(items[1].dependencies.as_slice(), ["Harbor"]);

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_json() {
        let dir = make_test_dir("list_json");
        let path = dir.join("secondary.json");
        fs::write(
            &path,
            r#"[{"name": "Night", "dependencies": null, "primary_dependencies": "Harbor"}]"#,
        )
        .unwrap();

        let items: Vec<SecondaryRecord> = deserialize_list(&path, "secondary").unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].dependencies.is_empty());
        assert_eq!(items[0].primary_dependencies.as_slice(), ["Harbor"]);

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_toml() {
        let dir = make_test_dir("list_toml");
        let path = dir.join("primary.toml");
        fs::write(
            &path,
            r#"
[[primary]]
name = "Harbor"

[[primary]]
name = "Factory"
dependencies = "Harbor"
"#,
        )
        .unwrap();

        let items: Vec<PrimaryRecord> = deserialize_list(&path, "primary").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "Factory");
        assert_eq!(items[1].dependencies.as_slice(), ["Harbor"]);

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_toml_missing_key() {
        let dir = make_test_dir("list_toml_missing");
        let path = dir.join("primary.toml");
        fs::write(&path, r#"foo = "bar""#).unwrap();

        let result: Result<Vec<PrimaryRecord>, _> = deserialize_list(&path, "primary");
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_parse_error() {
        let dir = make_test_dir("list_parse_err");
        let path = dir.join("primary.ron");
        fs::write(&path, "this is not valid RON {{{").unwrap();

        let result: Result<Vec<PrimaryRecord>, _> = deserialize_list(&path, "primary");
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // check_names
    // -----------------------------------------------------------------------

    #[test]
    fn check_names_accepts_unique() {
        assert!(check_names(["A", "B", "C"], Path::new("primary.ron")).is_ok());
    }

    #[test]
    fn check_names_rejects_duplicate() {
        let result = check_names(["A", "B", "A"], Path::new("primary.ron"));
        assert!(matches!(
            result,
            Err(DataLoadError::DuplicateName { ref name, .. }) if name == "A"
        ));
    }

    #[test]
    fn check_names_rejects_blank() {
        let result = check_names(["A", "  "], Path::new("primary.ron"));
        assert!(matches!(
            result,
            Err(DataLoadError::EmptyName { index: 1, .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Error display messages
    // -----------------------------------------------------------------------

    #[test]
    fn error_display_messages() {
        let e = DataLoadError::MissingRequired {
            file: "primary".to_string(),
            dir: PathBuf::from("/content"),
        };
        assert!(format!("{e}").contains("primary"));
        assert!(format!("{e}").contains("/content"));

        let e = DataLoadError::ConflictingFormats {
            a: PathBuf::from("primary.ron"),
            b: PathBuf::from("primary.json"),
        };
        let msg = format!("{e}");
        assert!(msg.contains("primary.ron"));
        assert!(msg.contains("primary.json"));

        let e = DataLoadError::EmptyName {
            file: PathBuf::from("gates.ron"),
            index: 3,
        };
        assert!(format!("{e}").contains("entry 3"));

        let e: DataLoadError = ResolveError::PrimaryPhaseIncomplete.into();
        assert!(format!("{e}").contains("primary resolution"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataLoadError = io_err.into();
        assert!(matches!(data_err, DataLoadError::Io(_)));
        assert!(format!("{data_err}").contains("file not found"));
    }
}
