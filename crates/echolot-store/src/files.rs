//! File reads and atomic writes

use crate::StoreError;
use echolot_domain::{ProvenanceRecord, SourceRecord};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Read a YAML source file
pub fn read_source(path: impl AsRef<Path>) -> Result<SourceRecord, StoreError> {
    let path = path.as_ref();
    let text = read_text(path)?;
    serde_yaml::from_str(&text).map_err(|e| StoreError::InvalidData {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read a JSON-LD document
pub fn read_document(path: impl AsRef<Path>) -> Result<Value, StoreError> {
    let path = path.as_ref();
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|e| StoreError::InvalidData {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Atomically write a source record as YAML
pub fn write_source(path: impl AsRef<Path>, source: &SourceRecord) -> Result<(), StoreError> {
    let yaml = serde_yaml::to_string(source).map_err(|e| StoreError::Serialization(e.to_string()))?;
    write_bytes(path, yaml.as_bytes())
}

/// Atomically write a provenance record as pretty-printed JSON
pub fn write_record(path: impl AsRef<Path>, record: &ProvenanceRecord) -> Result<(), StoreError> {
    let mut json =
        serde_json::to_vec_pretty(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
    json.push(b'\n');
    write_bytes(path, &json)
}

/// Atomically replace `path` with `content`.
///
/// Missing parent directories are created. The content is written to a
/// temporary file in the same directory and renamed over the target.
pub fn write_bytes(path: impl AsRef<Path>, content: &[u8]) -> Result<(), StoreError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let io_error = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(&dir).map_err(io_error)?;
    let mut temp = NamedTempFile::new_in(&dir).map_err(io_error)?;
    temp.write_all(content).map_err(io_error)?;
    temp.as_file().sync_all().map_err(io_error)?;
    temp.persist(path).map_err(|e| io_error(e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

fn read_text(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound {
            path: path.to_path_buf(),
        },
        _ => StoreError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yml");
        let err = read_source(&path).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(err.to_string().contains("absent.yml"));
    }

    #[test]
    fn test_write_bytes_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asset.bin");

        write_bytes(&path, b"first").unwrap();
        write_bytes(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_write_bytes_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        write_bytes(dir.path().join("a.json"), b"{}").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json"]);
    }

    #[test]
    fn test_write_bytes_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/metadata/record.json");
        write_bytes(&path, b"{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.yml");
        fs::write(&path, "title: [unclosed").unwrap();
        assert!(matches!(
            read_source(&path),
            Err(StoreError::InvalidData { .. })
        ));
    }
}
