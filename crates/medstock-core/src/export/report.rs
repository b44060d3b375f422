//! Inventory report export (JSON / CSV).

use serde::{Deserialize, Serialize};

use crate::inventory::{aggregate, Classifier};
use crate::models::{MedicineRecord, StatusCategory, Summary, DATE_FORMAT};

/// Snapshot of the inventory with derived statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryReport {
    /// Export timestamp
    pub exported_at: String,
    /// Date the statuses were computed for
    pub as_of: String,
    /// Expiring-soon threshold in effect
    pub threshold_days: i64,
    /// Summary counters
    pub summary: Summary,
    /// One row per record, in store order
    pub rows: Vec<ReportRow>,
}

/// Single report line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub id: String,
    pub name: String,
    pub batch_number: String,
    pub expiry_date: String,
    pub quantity: u32,
    pub status: StatusCategory,
    /// Days until expiry, only for expiring-soon rows
    pub days_left: Option<i64>,
}

impl InventoryReport {
    /// Build a report over `records` using `classifier`.
    pub fn build(records: &[MedicineRecord], classifier: &Classifier) -> Self {
        let rows = records
            .iter()
            .map(|record| {
                let status = classifier.classify(record);
                ReportRow {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    batch_number: record.batch_number.clone(),
                    expiry_date: record.expiry_date.format(DATE_FORMAT).to_string(),
                    quantity: record.quantity,
                    status: status.category(),
                    days_left: status.days_left(),
                }
            })
            .collect();

        Self {
            exported_at: chrono::Utc::now().to_rfc3339(),
            as_of: classifier.today.format(DATE_FORMAT).to_string(),
            threshold_days: classifier.threshold_days,
            summary: aggregate(records, classifier),
            rows,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("id,name,batch_number,expiry_date,quantity,status,days_left\n");

        for row in &self.rows {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&row.id),
                escape_csv(&row.name),
                escape_csv(&row.batch_number),
                row.expiry_date,
                row.quantity,
                escape_csv(row.status.label()),
                row.days_left.map(|d| d.to_string()).unwrap_or_default(),
            ));
        }

        csv
    }
}

/// Escape a value for CSV.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
