//! MedStock Core Library
//!
//! Local-first medicine inventory tracking with expiry and stock status.
//!
//! # Architecture
//!
//! ```text
//!   Backend (memory / JSON file / SQLite)
//!                 │ load_all (full snapshot)
//!                 ▼
//!          ┌─────────────┐      add / remove
//!          │ RecordStore │ ◄──────────────────── UI
//!          └──────┬──────┘
//!                 │
//!                 ▼
//!   query(term, status filter) ── Classifier(threshold_days, today)
//!                 │
//!                 ▼
//!     aggregate → Summary { total, expired, expiring_soon, low_stock }
//! ```
//!
//! # Status Rules
//!
//! Expired before Expiring Soon before Low Stock; the first match wins. The
//! `low_stock` counter is a plain quantity count and ignores that order.
//!
//! # Modules
//!
//! - [`models`]: Domain types (MedicineRecord, Status, Summary, etc.)
//! - [`inventory`]: Record store, classifier, query engine, aggregator
//! - [`backend`]: Persistence collaborators (in-memory, JSON file)
//! - [`db`]: SQLite database layer
//! - [`config`]: User settings
//! - [`export`]: JSON and CSV reports

pub mod backend;
pub mod config;
pub mod db;
pub mod export;
pub mod inventory;
pub mod models;

// Re-export commonly used types
pub use backend::{InventoryBackend, JsonFileBackend, MemoryBackend};
pub use config::Settings;
pub use db::Database;
pub use inventory::{classify, Classifier, Inventory, LoadState, RecordStore};
pub use models::{
    MedicineRecord, NewMedicine, Status, StatusCategory, StatusFilter, Summary,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedStockError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Load failed: {0}")]
    LoadFailed(String),
}

impl From<db::DbError> for MedStockError {
    fn from(e: db::DbError) -> Self {
        MedStockError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for MedStockError {
    fn from(e: serde_json::Error) -> Self {
        MedStockError::SerializationError(e.to_string())
    }
}

impl From<inventory::InventoryError> for MedStockError {
    fn from(e: inventory::InventoryError) -> Self {
        match e {
            inventory::InventoryError::Validation(_)
            | inventory::InventoryError::Store(_)
            | inventory::InventoryError::InvalidSettings(_) => {
                MedStockError::InvalidInput(e.to_string())
            }
            inventory::InventoryError::Backend(_) => MedStockError::DatabaseError(e.to_string()),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedStockError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedStockError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create an inventory database at the given path.
///
/// A load failure is reported as [`MedStockError::LoadFailed`] rather than
/// an empty inventory.
#[uniffi::export]
pub fn open_inventory(path: String) -> Result<Arc<MedStockCore>, MedStockError> {
    let db = Database::open(&path)?;
    MedStockCore::from_database(db)
}

/// Create an in-memory inventory (for testing and demos).
#[uniffi::export]
pub fn open_inventory_in_memory() -> Result<Arc<MedStockCore>, MedStockError> {
    let db = Database::open_in_memory()?;
    MedStockCore::from_database(db)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe inventory wrapper for FFI.
#[derive(uniffi::Object)]
pub struct MedStockCore {
    inventory: Arc<Mutex<Inventory<Database>>>,
}

impl MedStockCore {
    fn from_database(db: Database) -> Result<Arc<Self>, MedStockError> {
        let settings = db.load_settings()?;
        let mut inventory = Inventory::new(db, settings)?;
        inventory
            .load()
            .map_err(|e| MedStockError::LoadFailed(e.to_string()))?;
        Ok(Arc::new(Self {
            inventory: Arc::new(Mutex::new(inventory)),
        }))
    }
}

#[uniffi::export]
impl MedStockCore {
    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Validate and add a medicine. Returns the stored record with its new id.
    pub fn add_medicine(&self, input: FfiNewMedicine) -> Result<FfiMedicine, MedStockError> {
        let mut inventory = self.inventory.lock()?;
        let record = inventory.add(input.into())?;
        Ok(record.into())
    }

    /// Delete a medicine by id. Unknown ids return `false`.
    pub fn remove_medicine(&self, id: String) -> Result<bool, MedStockError> {
        let mut inventory = self.inventory.lock()?;
        Ok(inventory.remove(&id)?)
    }

    /// Get a medicine by id.
    pub fn get_medicine(&self, id: String) -> Result<Option<FfiMedicine>, MedStockError> {
        let inventory = self.inventory.lock()?;
        Ok(inventory.get(&id).cloned().map(Into::into))
    }

    /// Reload every record from the database.
    pub fn reload(&self) -> Result<u32, MedStockError> {
        let mut inventory = self.inventory.lock()?;
        let count = inventory
            .load()
            .map_err(|e| MedStockError::LoadFailed(e.to_string()))?;
        u32::try_from(count)
            .map_err(|_| MedStockError::LoadFailed(format!("record count {} exceeds u32", count)))
    }

    // =========================================================================
    // Query Operations
    // =========================================================================

    /// Filter by search term and status ("all", "expired", "warning", "low", "good").
    pub fn query(
        &self,
        search_term: String,
        status_filter: String,
    ) -> Result<Vec<FfiMedicineRow>, MedStockError> {
        let filter: StatusFilter = status_filter
            .parse()
            .map_err(MedStockError::InvalidInput)?;
        let inventory = self.inventory.lock()?;
        let classifier = inventory.classifier();
        Ok(inventory
            .query(&search_term, filter)
            .into_iter()
            .map(|record| FfiMedicineRow::new(record, classifier.classify(record)))
            .collect())
    }

    /// Summary counters over the whole inventory.
    pub fn summary(&self) -> Result<FfiSummary, MedStockError> {
        let inventory = self.inventory.lock()?;
        Ok(inventory.summary().into())
    }

    /// Summary counters over the records matching a query.
    pub fn query_summary(
        &self,
        search_term: String,
        status_filter: String,
    ) -> Result<FfiSummary, MedStockError> {
        let filter: StatusFilter = status_filter
            .parse()
            .map_err(MedStockError::InvalidInput)?;
        let inventory = self.inventory.lock()?;
        let filtered = inventory.query(&search_term, filter);
        Ok(inventory.summary_of(filtered).into())
    }

    /// Look up a scanned batch code.
    pub fn lookup_batch(&self, code: String) -> Result<FfiMedicineRow, MedStockError> {
        let inventory = self.inventory.lock()?;
        let record = inventory
            .lookup_batch(&code)
            .ok_or_else(|| MedStockError::NotFound(code.clone()))?;
        Ok(FfiMedicineRow::new(record, inventory.status_of(record)))
    }

    /// Batch codes resembling `code`, best first.
    pub fn suggest_batches(&self, code: String, limit: u32) -> Result<Vec<FfiMedicine>, MedStockError> {
        let inventory = self.inventory.lock()?;
        Ok(inventory
            .suggest_batches(&code, limit as usize)
            .into_iter()
            .map(|s| s.record.clone().into())
            .collect())
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn get_settings(&self) -> Result<FfiSettings, MedStockError> {
        let inventory = self.inventory.lock()?;
        Ok(inventory.settings().clone().into())
    }

    /// Validate and persist new settings, then apply them.
    ///
    /// Nothing changes in memory if the write fails.
    pub fn update_settings(&self, settings: FfiSettings) -> Result<(), MedStockError> {
        let mut inventory = self.inventory.lock()?;
        let settings: Settings = settings.into();
        settings
            .validate()
            .map_err(|e| MedStockError::InvalidInput(e.to_string()))?;
        inventory.backend().save_settings(&settings)?;
        inventory.set_settings(settings)?;
        Ok(())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export the inventory report as JSON.
    pub fn export_report_json(&self) -> Result<String, MedStockError> {
        let inventory = self.inventory.lock()?;
        Ok(inventory.report().to_json()?)
    }

    /// Export the inventory report as CSV.
    pub fn export_report_csv(&self) -> Result<String, MedStockError> {
        let inventory = self.inventory.lock()?;
        Ok(inventory.report().to_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe medicine record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicine {
    pub id: String,
    pub name: String,
    pub batch_number: String,
    pub expiry_date: String,
    pub quantity: u32,
}

impl From<MedicineRecord> for FfiMedicine {
    fn from(record: MedicineRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            batch_number: record.batch_number,
            expiry_date: record.expiry_date.format(models::DATE_FORMAT).to_string(),
            quantity: record.quantity,
        }
    }
}

/// FFI-safe form input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewMedicine {
    pub name: String,
    pub batch_number: String,
    pub expiry_date: String,
    pub quantity: String,
}

impl From<FfiNewMedicine> for NewMedicine {
    fn from(input: FfiNewMedicine) -> Self {
        NewMedicine {
            name: input.name,
            batch_number: input.batch_number,
            expiry_date: input.expiry_date,
            quantity: input.quantity,
        }
    }
}

/// FFI-safe table row: record plus derived status.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicineRow {
    pub medicine: FfiMedicine,
    pub status: String,
    pub status_label: String,
    pub days_left: Option<i64>,
}

impl FfiMedicineRow {
    fn new(record: &MedicineRecord, status: Status) -> Self {
        Self {
            medicine: record.clone().into(),
            status: status.badge().to_string(),
            status_label: status.label().to_string(),
            days_left: status.days_left(),
        }
    }
}

/// FFI-safe summary counters.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSummary {
    pub total: u32,
    pub expired: u32,
    pub expiring_soon: u32,
    pub low_stock: u32,
}

impl From<Summary> for FfiSummary {
    fn from(summary: Summary) -> Self {
        Self {
            total: summary.total,
            expired: summary.expired,
            expiring_soon: summary.expiring_soon,
            low_stock: summary.low_stock,
        }
    }
}

/// FFI-safe settings.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSettings {
    pub threshold_days: i64,
    pub notifications_enabled: bool,
    pub sort_by_expiry_on_load: bool,
}

impl From<Settings> for FfiSettings {
    fn from(settings: Settings) -> Self {
        Self {
            threshold_days: settings.threshold_days,
            notifications_enabled: settings.notifications_enabled,
            sort_by_expiry_on_load: settings.sort_by_expiry_on_load,
        }
    }
}

impl From<FfiSettings> for Settings {
    fn from(settings: FfiSettings) -> Self {
        Settings {
            threshold_days: settings.threshold_days,
            notifications_enabled: settings.notifications_enabled,
            sort_by_expiry_on_load: settings.sort_by_expiry_on_load,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, batch: &str, expiry: &str, qty: &str) -> FfiNewMedicine {
        FfiNewMedicine {
            name: name.into(),
            batch_number: batch.into(),
            expiry_date: expiry.into(),
            quantity: qty.into(),
        }
    }

    #[test]
    fn test_ffi_add_query_remove() {
        let core = open_inventory_in_memory().unwrap();

        let added = core
            .add_medicine(form("Amoxicillin", "AMX456", "2099-01-01", "5"))
            .unwrap();
        core.add_medicine(form("Paracetamol", "BATCH123", "2099-01-01", "20"))
            .unwrap();

        let rows = core.query("amox".into(), "all".into()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, "low");
        assert_eq!(rows[0].status_label, "Low Stock");

        let summary = core.summary().unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.low_stock, 1);

        assert!(core.remove_medicine(added.id.clone()).unwrap());
        assert!(!core.remove_medicine(added.id).unwrap());
        assert_eq!(core.summary().unwrap().total, 1);
    }

    #[test]
    fn test_ffi_rejects_bad_input() {
        let core = open_inventory_in_memory().unwrap();

        let result = core.add_medicine(form("", "B1", "2099-01-01", "1"));
        assert!(matches!(result, Err(MedStockError::InvalidInput(_))));

        let result = core.query("".into(), "recalled".into());
        assert!(matches!(result, Err(MedStockError::InvalidInput(_))));
    }

    #[test]
    fn test_ffi_lookup_batch() {
        let core = open_inventory_in_memory().unwrap();
        core.add_medicine(form("Cetirizine", "CTZ789", "2000-01-01", "0"))
            .unwrap();

        let row = core.lookup_batch("ctz789".into()).unwrap();
        assert_eq!(row.status, "expired");

        assert!(matches!(
            core.lookup_batch("CTZ780".into()),
            Err(MedStockError::NotFound(_))
        ));
        assert_eq!(core.suggest_batches("CTZ780".into(), 3).unwrap().len(), 1);
    }

    #[test]
    fn test_ffi_settings_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db").to_string_lossy().to_string();

        {
            let core = open_inventory(path.clone()).unwrap();
            core.update_settings(FfiSettings {
                threshold_days: 90,
                notifications_enabled: false,
                sort_by_expiry_on_load: true,
            })
            .unwrap();
            core.add_medicine(form("Paracetamol", "BATCH123", "2099-01-01", "20"))
                .unwrap();
        }

        let core = open_inventory(path).unwrap();
        assert_eq!(core.get_settings().unwrap().threshold_days, 90);
        assert_eq!(core.summary().unwrap().total, 1);

        let negative = FfiSettings {
            threshold_days: -1,
            notifications_enabled: true,
            sort_by_expiry_on_load: false,
        };
        assert!(core.update_settings(negative).is_err());
    }

    #[test]
    fn test_ffi_failed_settings_write_keeps_current() {
        let core = open_inventory_in_memory().unwrap();
        core.inventory
            .lock()
            .unwrap()
            .backend()
            .conn()
            .execute_batch("DROP TABLE settings")
            .unwrap();

        let result = core.update_settings(FfiSettings {
            threshold_days: 90,
            notifications_enabled: false,
            sort_by_expiry_on_load: false,
        });
        assert!(matches!(result, Err(MedStockError::DatabaseError(_))));

        let current = core.get_settings().unwrap();
        assert_eq!(current.threshold_days, 30);
        assert!(current.notifications_enabled);
    }

    #[test]
    fn test_ffi_open_rejects_stored_invalid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db");
        {
            let db = Database::open(&path).unwrap();
            db.set_setting("user_settings", r#"{"threshold_days": -5}"#)
                .unwrap();
        }

        let result = open_inventory(path.to_string_lossy().to_string());
        assert!(matches!(result, Err(MedStockError::DatabaseError(_))));
    }

    #[test]
    fn test_ffi_reload_returns_count() {
        let core = open_inventory_in_memory().unwrap();
        assert_eq!(core.reload().unwrap(), 0);

        core.add_medicine(form("Paracetamol", "BATCH123", "2099-01-01", "20"))
            .unwrap();
        core.add_medicine(form("Amoxicillin", "AMX456", "2099-01-01", "5"))
            .unwrap();
        assert_eq!(core.reload().unwrap(), 2);
    }

    #[test]
    fn test_ffi_export() {
        let core = open_inventory_in_memory().unwrap();
        core.add_medicine(form("Paracetamol", "BATCH123", "2099-01-01", "20"))
            .unwrap();

        let csv = core.export_report_csv().unwrap();
        assert!(csv.contains("Paracetamol,BATCH123,2099-01-01,20,Good"));

        let json = core.export_report_json().unwrap();
        assert!(json.contains("\"total\": 1"));
    }
}
