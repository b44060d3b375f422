//! SQLite schema definition.

/// Complete database schema for medstock.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Medicines
-- ============================================================================

CREATE TABLE IF NOT EXISTS medicines (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    batch_number TEXT NOT NULL,
    expiry_date TEXT NOT NULL,                   -- YYYY-MM-DD
    quantity INTEGER NOT NULL CHECK (quantity >= 0),
    position INTEGER NOT NULL,                   -- display order, tail = max
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_medicines_position ON medicines(position);
CREATE INDEX IF NOT EXISTS idx_medicines_batch ON medicines(batch_number COLLATE NOCASE);
CREATE INDEX IF NOT EXISTS idx_medicines_expiry ON medicines(expiry_date);

-- ============================================================================
-- Settings
-- ============================================================================

CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
