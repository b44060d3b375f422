//! Summary counters shown above the inventory table.

use serde::{Deserialize, Serialize};

/// Aggregate counts over a record set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of records in the set
    pub total: u32,
    /// Records classified as expired
    pub expired: u32,
    /// Records classified as expiring soon
    pub expiring_soon: u32,
    /// Records with ten or fewer units, regardless of expiry
    pub low_stock: u32,
}
