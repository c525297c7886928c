//! Whole-document JSON state file
//!
//! The file is read wholesale and written wholesale. Writes go to a sibling
//! temporary file that is then renamed over the target, so a reader never sees
//! a half-written document.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::Result;

#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the document. A missing file is `Ok(None)`; a file
    /// that fails to decode is an error for the caller to degrade.
    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Encode and replace the document.
    pub fn write<T: Serialize>(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let serialized = serde_json::to_vec_pretty(value)?;
        let tmp = self.temp_path();
        fs::write(&tmp, serialized)?;

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), "Wrote state file");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        items: Vec<String>,
        counts: BTreeMap<String, u64>,
    }

    fn sample() -> Doc {
        Doc {
            items: vec!["a".to_string(), "b".to_string()],
            counts: BTreeMap::from([("a".to_string(), 2)]),
        }
    }

    #[test]
    fn test_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("missing.json"));
        let doc: Option<Doc> = file.read().unwrap();
        assert!(doc.is_none());
        assert!(!file.path().exists());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("nested/state.json"));

        file.write(&sample()).unwrap();
        assert!(file.path().is_file());
        assert!(!dir.path().join("nested/state.json.tmp").exists());

        let doc: Doc = file.read().unwrap().unwrap();
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_write_replaces_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("state.json"));

        file.write(&sample()).unwrap();
        let replacement = Doc {
            items: vec!["z".to_string()],
            counts: BTreeMap::new(),
        };
        file.write(&replacement).unwrap();

        let doc: Doc = file.read().unwrap().unwrap();
        assert_eq!(doc, replacement);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let file = StateFile::new(path);
        let result: Result<Option<Doc>> = file.read();
        assert!(result.is_err());
    }
}
