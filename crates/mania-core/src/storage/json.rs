//! JSON file helpers: tolerant reads and all-or-nothing writes.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::Result;

/// Replace `path` with `bytes` atomically.
///
/// The data goes to a temporary file in the same directory, is flushed to
/// disk and then renamed over the target. Readers see either the old file or
/// the new one. On failure the temporary file is removed and the old file is
/// left untouched.
pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Serialize `value` as pretty JSON and write it atomically.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    write_bytes_atomic(path, &bytes)?;
    Ok(())
}

/// Read `path` as JSON, or `None` when it does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&content)?))
}

/// Read `path` as JSON, falling back to `T::default()` when the file is
/// absent or cannot be parsed.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match read_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!("{} not found, using defaults", path.display());
            T::default()
        }
        Err(e) => {
            warn!("Ignoring unreadable {}: {}", path.display(), e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let value = BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);

        write_json_atomic(&path, &value).unwrap();
        let read: Option<BTreeMap<String, i32>> = read_json(&path).unwrap();
        assert_eq!(read, Some(value));
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        write_json_atomic(&path, &vec![1, 2, 3]).unwrap();
        write_json_atomic(&path, &vec![4]).unwrap();

        let read: Vec<i32> = read_json_or_default(&path);
        assert_eq!(read, vec![4]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_dir_fails_without_side_effects() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("data.json");

        assert!(write_json_atomic(&path, &vec![1]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("none.json");

        let read: Option<Vec<i32>> = read_json(&path).unwrap();
        assert!(read.is_none());
        let fallback: Vec<i32> = read_json_or_default(&path);
        assert!(fallback.is_empty());
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(read_json::<Vec<i32>>(&path).is_err());
        let fallback: Vec<i32> = read_json_or_default(&path);
        assert!(fallback.is_empty());
    }
}
