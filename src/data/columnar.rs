//! Columnar storage for scalar row dimensions.
//!
//! Each dimension (`"value"`, `"weight"`, ...) is a contiguous `f64` column
//! indexed by raw row position, so scans over one dimension stay cache-friendly.

use std::collections::HashMap;

/// A single scalar column. Missing cells are `None`.
#[derive(Debug, Clone, Default)]
pub struct Column {
    cells: Vec<Option<f64>>,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, raw: usize, value: f64) {
        if raw >= self.cells.len() {
            self.cells.resize(raw + 1, None);
        }
        self.cells[raw] = Some(value);
    }

    pub fn get(&self, raw: usize) -> Option<f64> {
        self.cells.get(raw).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Manages the scalar columns of one store.
#[derive(Debug, Default, Clone)]
pub struct ColumnStore {
    /// Mapping from dimension name -> Column
    columns: HashMap<String, Column>,
}

impl ColumnStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, raw: usize, dimension: &str, value: f64) {
        self.columns
            .entry(dimension.to_string())
            .or_default()
            .set(raw, value);
    }

    pub fn get_value(&self, raw: usize, dimension: &str) -> Option<f64> {
        self.columns.get(dimension).and_then(|col| col.get(raw))
    }

    /// Optimized batch read for a single dimension
    pub fn get_column(&self, dimension: &str) -> Option<&Column> {
        self.columns.get(dimension)
    }

    /// Dimension names, sorted
    pub fn dimensions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
