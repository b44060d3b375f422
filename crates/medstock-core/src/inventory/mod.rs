//! Inventory tracking: record store, status classification, querying and
//! summary counts.
//!
//! Pipeline: Backend load → Record Store → Query (uses Classifier) → Aggregate

mod aggregator;
mod classifier;
mod lookup;
mod query;
mod store;

pub use aggregator::*;
pub use classifier::*;
pub use lookup::*;
pub use query::*;
pub use store::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::backend::{BackendError, InventoryBackend};
use crate::config::Settings;
use crate::export::InventoryReport;
use crate::models::{MedicineRecord, NewMedicine, Status, StatusFilter, Summary, ValidationError};

/// Inventory errors.
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Outcome of the most recent full load from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No load attempted yet
    NotLoaded,
    /// Store holds the backend's records
    Loaded { count: usize },
    /// Last load failed; store keeps its previous contents
    Failed { reason: String },
}

/// Record store bound to a persistence backend and user settings.
pub struct Inventory<B> {
    backend: B,
    store: RecordStore,
    settings: Settings,
    load_state: LoadState,
    reference_date: Option<NaiveDate>,
}

impl<B: InventoryBackend> Inventory<B> {
    /// Create an inventory with an empty store. Call [`Inventory::load`] to fill it.
    pub fn new(backend: B, settings: Settings) -> InventoryResult<Self> {
        settings
            .validate()
            .map_err(|e| InventoryError::InvalidSettings(e.to_string()))?;
        Ok(Self {
            backend,
            store: RecordStore::new(),
            settings,
            load_state: LoadState::NotLoaded,
            reference_date: None,
        })
    }

    /// Create an inventory and load it from the backend.
    pub fn open(backend: B, settings: Settings) -> InventoryResult<Self> {
        let mut inventory = Self::new(backend, settings)?;
        inventory.load()?;
        Ok(inventory)
    }

    // =========================================================================
    // Store Mutation
    // =========================================================================

    /// Replace the store contents with the backend's records.
    ///
    /// On failure the previous contents are kept and the load state records
    /// the reason.
    pub fn load(&mut self) -> InventoryResult<usize> {
        let result = self
            .backend
            .load_all()
            .map_err(InventoryError::from)
            .and_then(|records| self.install(records));

        match result {
            Ok(count) => {
                tracing::info!(count, "Loaded inventory");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Inventory load failed");
                self.load_state = LoadState::Failed {
                    reason: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// Install a full snapshot pushed by a live-updating backend.
    pub fn apply_snapshot(&mut self, records: Vec<MedicineRecord>) -> InventoryResult<usize> {
        let count = self.install(records)?;
        tracing::debug!(count, "Applied inventory snapshot");
        Ok(count)
    }

    fn install(&mut self, records: Vec<MedicineRecord>) -> InventoryResult<usize> {
        self.store.replace_all(records)?;
        if self.settings.sort_by_expiry_on_load {
            self.store.sort_by_expiry();
        }
        let count = self.store.len();
        self.load_state = LoadState::Loaded { count };
        Ok(count)
    }

    /// Validate form input, assign a fresh id and add the record at the tail.
    pub fn add(&mut self, input: NewMedicine) -> InventoryResult<MedicineRecord> {
        let record = input.into_record().map_err(|e| {
            tracing::warn!(error = %e, "Rejected medicine input");
            e
        })?;
        self.add_record(record.clone())?;
        Ok(record)
    }

    /// Add an already-validated record.
    ///
    /// The backend is written first; the store is untouched if it fails.
    pub fn add_record(&mut self, record: MedicineRecord) -> InventoryResult<()> {
        if self.store.contains(&record.id) {
            return Err(StoreError::DuplicateId(record.id).into());
        }
        self.backend.insert_one(&record)?;
        tracing::debug!(id = %record.id, name = %record.name, "Added medicine");
        self.store.add(record)?;
        Ok(())
    }

    /// Delete a record by id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> InventoryResult<bool> {
        if !self.store.contains(id) {
            return Ok(false);
        }
        self.backend.delete_one(id)?;
        let removed = self.store.remove(id);
        tracing::debug!(id, removed, "Removed medicine");
        Ok(removed)
    }

    /// Write the current store contents back to the backend.
    pub fn save(&self) -> InventoryResult<()> {
        self.backend.save_all(self.store.all())?;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current records in store order.
    pub fn records(&self) -> &[MedicineRecord] {
        self.store.all()
    }

    pub fn get(&self, id: &str) -> Option<&MedicineRecord> {
        self.store.get(id)
    }

    /// Classifier for the configured threshold and reference date.
    pub fn classifier(&self) -> Classifier {
        match self.reference_date {
            Some(today) => Classifier::new(self.settings.threshold_days, today),
            None => Classifier::current(self.settings.threshold_days),
        }
    }

    pub fn status_of(&self, record: &MedicineRecord) -> Status {
        self.classifier().classify(record)
    }

    /// Filter the store by search term and status.
    pub fn query(&self, search_term: &str, status_filter: StatusFilter) -> Vec<&MedicineRecord> {
        query(self.store.all(), search_term, status_filter, &self.classifier())
    }

    /// Summary counts over the whole store.
    pub fn summary(&self) -> Summary {
        aggregate(self.store.all(), &self.classifier())
    }

    /// Summary counts over a subset, such as a query result.
    pub fn summary_of<'a, I>(&self, records: I) -> Summary
    where
        I: IntoIterator<Item = &'a MedicineRecord>,
    {
        aggregate(records, &self.classifier())
    }

    /// Exact batch code lookup.
    pub fn lookup_batch(&self, code: &str) -> Option<&MedicineRecord> {
        self.store.find_by_batch(code)
    }

    /// Near-miss batch codes, best first.
    pub fn suggest_batches(&self, code: &str, limit: usize) -> Vec<BatchSuggestion<'_>> {
        suggest_batches(self.store.all(), code, limit)
    }

    /// Report of every record with its status and the summary counts.
    pub fn report(&self) -> InventoryReport {
        InventoryReport::build(self.store.all(), &self.classifier())
    }

    // =========================================================================
    // Settings & State
    // =========================================================================

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings after validating them.
    pub fn set_settings(&mut self, settings: Settings) -> InventoryResult<()> {
        settings
            .validate()
            .map_err(|e| InventoryError::InvalidSettings(e.to_string()))?;
        self.settings = settings;
        Ok(())
    }

    pub fn set_threshold_days(&mut self, threshold_days: i64) -> InventoryResult<()> {
        self.set_settings(Settings {
            threshold_days,
            ..self.settings.clone()
        })
    }

    /// Pin the date used for classification. `None` follows the local clock.
    pub fn set_reference_date(&mut self, date: Option<NaiveDate>) {
        self.reference_date = date;
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
