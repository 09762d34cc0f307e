//! JSON dataset persistence

use anyhow::Context;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind;
use std::path::Path;

use super::Record;

/// Read a JSON array of records.
pub fn load_dataset(path: impl AsRef<Path>) -> anyhow::Result<Vec<Record>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse dataset {}", path.display()))?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded dataset");
    Ok(records)
}

/// Like [`load_dataset`], but a missing file reads as an empty dataset.
pub fn load_dataset_or_empty(path: impl AsRef<Path>) -> anyhow::Result<Vec<Record>> {
    let path = path.as_ref();
    match std::fs::metadata(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "dataset not found, starting from empty");
            Ok(Vec::new())
        }
        _ => load_dataset(path),
    }
}

/// Write records as a 4-space indented JSON array, keeping non-ASCII text unescaped.
pub fn save_dataset(records: &[Record], path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;

    std::fs::write(path, buf)
        .with_context(|| format!("Failed to write dataset {}", path.display()))?;
    tracing::debug!(path = %path.display(), records = records.len(), "saved dataset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_uses_four_space_indent_and_raw_unicode() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        save_dataset(&[Record::new("哈工大", "", "1920")], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("哈工大"));
        assert!(!text.contains("\\u"));
        assert!(text.contains("\n        \"instruction\": \"哈工大\""));
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let records = load_dataset_or_empty(temp_dir.path().join("absent.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_dataset_or_empty(&path).is_err());
        assert!(load_dataset(&path).is_err());
    }
}
