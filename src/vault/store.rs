//! File Store
//!
//! Reads and writes the entry collection as a JSON document.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Entry, VaultResult};

#[derive(Deserialize)]
struct EntriesDocument {
    #[serde(default)]
    entries: Vec<Entry>,
}

#[derive(Serialize)]
struct EntriesDocumentRef<'a> {
    entries: &'a [Entry],
}

pub struct FileStore;

impl FileStore {
    pub fn load(path: &Path) -> VaultResult<Vec<Entry>> {
        let data = fs::read_to_string(path)?;
        let document: EntriesDocument = serde_json::from_str(&data)?;
        Ok(document.entries)
    }

    pub fn save(path: &Path, entries: &[Entry]) -> VaultResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&EntriesDocumentRef { entries })?;
        fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::VaultError;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("entries.json");
        let entries = vec![
            Entry::new("Bank", "https://bank.example", "alice", "one"),
            Entry::new("Mail", "", "bob", "two"),
        ];

        FileStore::save(&path, &entries).unwrap();
        let loaded = FileStore::load(&path).unwrap();

        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileStore::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(VaultError::Io(_))));
    }

    #[test]
    fn test_load_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(FileStore::load(&path), Err(VaultError::Format(_))));
    }
}
