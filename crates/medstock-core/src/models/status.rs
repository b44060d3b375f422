//! Derived status types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status category of a record (derived, never stored).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// Past its expiry date
    Expired,
    /// Expires within the configured threshold
    ExpiringSoon,
    /// Ten units or fewer on hand
    LowStock,
    /// Nothing to act on
    Good,
}

impl StatusCategory {
    /// All categories in precedence order.
    pub const ALL: [StatusCategory; 4] = [
        StatusCategory::Expired,
        StatusCategory::ExpiringSoon,
        StatusCategory::LowStock,
        StatusCategory::Good,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            StatusCategory::Expired => "Expired",
            StatusCategory::ExpiringSoon => "Expiring Soon",
            StatusCategory::LowStock => "Low Stock",
            StatusCategory::Good => "Good",
        }
    }

    /// Short badge key used by the table view.
    pub fn badge(&self) -> &'static str {
        match self {
            StatusCategory::Expired => "expired",
            StatusCategory::ExpiringSoon => "warning",
            StatusCategory::LowStock => "low",
            StatusCategory::Good => "good",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatusCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expired" => Ok(StatusCategory::Expired),
            "warning" | "expiring_soon" | "expiring soon" => Ok(StatusCategory::ExpiringSoon),
            "low" | "low_stock" | "low stock" => Ok(StatusCategory::LowStock),
            "good" => Ok(StatusCategory::Good),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

/// Classification result for a single record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Status {
    Expired,
    ExpiringSoon {
        /// Whole days until expiry (0 means expires today)
        days_left: i64,
    },
    LowStock,
    Good,
}

impl Status {
    pub fn category(&self) -> StatusCategory {
        match self {
            Status::Expired => StatusCategory::Expired,
            Status::ExpiringSoon { .. } => StatusCategory::ExpiringSoon,
            Status::LowStock => StatusCategory::LowStock,
            Status::Good => StatusCategory::Good,
        }
    }

    pub fn label(&self) -> &'static str {
        self.category().label()
    }

    pub fn badge(&self) -> &'static str {
        self.category().badge()
    }

    /// Days until expiry, only carried by `ExpiringSoon`.
    pub fn days_left(&self) -> Option<i64> {
        match self {
            Status::ExpiringSoon { days_left } => Some(*days_left),
            _ => None,
        }
    }
}

/// Status filter applied by a query.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusFilter {
    /// No filtering by status
    #[default]
    All,
    /// Only records whose status falls in this category
    Only(StatusCategory),
}

impl StatusFilter {
    pub fn accepts(&self, category: StatusCategory) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl From<StatusCategory> for StatusFilter {
    fn from(category: StatusCategory) -> Self {
        StatusFilter::Only(category)
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        trimmed.parse().map(StatusFilter::Only)
    }
}
