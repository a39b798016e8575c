use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Table – the raw, header-inferred dataset
// ---------------------------------------------------------------------------

/// A parsed CSV: ordered column names and rows of string fields.
/// Every row holds exactly `columns.len()` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table { columns, rows }
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LabeledText – one cleaned row
// ---------------------------------------------------------------------------

/// A cleaned row. Field order is the CSV header order: `target,text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabeledText {
    pub target: String,
    pub text: String,
}
