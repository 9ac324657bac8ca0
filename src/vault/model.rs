//! Data Model
//!
//! Ordered entry collection with a "modified since last save" flag.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::{Entry, VaultError, VaultResult};

#[derive(Debug, Default)]
pub struct DataModel {
    entries: Vec<Entry>,
    modified: bool,
    file_name: Option<PathBuf>,
}

impl DataModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, path: Option<PathBuf>) {
        self.file_name = path;
    }

    pub fn find(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Replace the whole collection with freshly loaded entries.
    pub fn load(&mut self, entries: Vec<Entry>, path: PathBuf) {
        self.entries = entries;
        self.file_name = Some(path);
        self.modified = false;
    }

    pub fn add(&mut self, entry: Entry) -> Uuid {
        let id = entry.id;
        self.entries.push(entry);
        self.modified = true;
        id
    }

    pub fn replace(&mut self, entry: Entry) -> VaultResult<()> {
        let slot = self
            .entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or(VaultError::NotFound)?;
        *slot = entry;
        self.modified = true;
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> VaultResult<Entry> {
        let idx = self.position(id)?;
        self.modified = true;
        Ok(self.entries.remove(idx))
    }

    /// Insert a copy right after the original and return the copy's id.
    pub fn duplicate(&mut self, id: Uuid) -> VaultResult<Uuid> {
        let idx = self.position(id)?;
        let copy = self.entries[idx].duplicate();
        let copy_id = copy.id;
        self.entries.insert(idx + 1, copy);
        self.modified = true;
        Ok(copy_id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.modified = false;
        self.file_name = None;
    }

    fn position(&self, id: Uuid) -> VaultResult<usize> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(VaultError::NotFound)
    }
}
