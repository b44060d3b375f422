//! Local JSON file backend.
//!
//! The whole list is stored as one JSON array; record-level operations
//! read the file, modify the list and write it back.

use std::fs;
use std::path::{Path, PathBuf};

use super::{BackendResult, InventoryBackend};
use crate::models::MedicineRecord;

/// Backend persisting the record list to a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InventoryBackend for JsonFileBackend {
    fn load_all(&self) -> BackendResult<Vec<MedicineRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn insert_one(&self, record: &MedicineRecord) -> BackendResult<()> {
        let mut records = self.load_all()?;
        records.push(record.clone());
        self.save_all(&records)
    }

    fn delete_one(&self, id: &str) -> BackendResult<bool> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save_all(&records)?;
        Ok(true)
    }

    fn save_all(&self, records: &[MedicineRecord]) -> BackendResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
