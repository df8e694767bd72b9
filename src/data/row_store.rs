//! In-memory row store with a filterable, reorderable active set

use super::columnar::ColumnStore;
use super::{BackingStore, RowFilter};
use crate::graph::{GraphError, GraphResult, PropertyMap, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Initial contents of one row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    /// Scalar dimensions
    #[serde(default)]
    pub values: HashMap<String, f64>,
    /// Per-row configuration tree
    #[serde(default)]
    pub config: PropertyMap,
    /// Per-row visual attributes
    #[serde(default)]
    pub visuals: PropertyMap,
    /// Initial layout state
    #[serde(default)]
    pub layout: Option<PropertyValue>,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, dimension: impl Into<String>, value: f64) -> Self {
        self.values.insert(dimension.into(), value);
        self
    }

    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn with_visual(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.visuals.insert(key.into(), value.into());
        self
    }
}

/// Tabular store backing a graph's nodes or edges.
///
/// Rows are addressed two ways: by *raw* position (append order, never
/// changes) and by *projection* (position in the active set). All rows are
/// active after `push_row` until a filter, selection or sort narrows or
/// reorders the active set.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    columns: ColumnStore,
    configs: Vec<PropertyValue>,
    visuals: Vec<PropertyMap>,
    layouts: Vec<Option<PropertyValue>>,
    /// Store-level visuals inherited by every row
    parent_visuals: PropertyMap,
    /// Raw positions of the active rows, in active order
    active: Vec<usize>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row and make it active. Returns its raw position.
    pub fn push_row(&mut self, record: RowRecord) -> usize {
        let raw = self.configs.len();
        for (dimension, value) in &record.values {
            self.columns.set_value(raw, dimension, *value);
        }
        self.configs.push(PropertyValue::Map(record.config));
        self.visuals.push(record.visuals);
        self.layouts.push(record.layout);
        self.active.push(raw);
        raw
    }

    /// Total number of rows, active or not
    pub fn row_count(&self) -> usize {
        self.configs.len()
    }

    /// Raw positions of the active rows, in active order
    pub fn active_rows(&self) -> &[usize] {
        &self.active
    }

    /// Scalar value by raw position, ignoring the active set
    pub fn raw_value(&self, raw: usize, dimension: &str) -> Option<f64> {
        self.columns.get_value(raw, dimension)
    }

    pub fn columns(&self) -> &ColumnStore {
        &self.columns
    }

    pub fn set_parent_visual(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.parent_visuals.insert(key.into(), value.into());
    }

    /// Re-activate every row in raw order
    pub fn reset(&mut self) {
        self.active = (0..self.row_count()).collect();
    }

    /// Narrow the active set to rows whose `dimension` satisfies `predicate`.
    /// Rows without a value for `dimension` are dropped.
    pub fn filter_by_value<F>(&mut self, dimension: &str, mut predicate: F)
    where
        F: FnMut(f64) -> bool,
    {
        let columns = &self.columns;
        self.active.retain(|&raw| {
            columns
                .get_value(raw, dimension)
                .map_or(false, &mut predicate)
        });
    }

    /// Replace the active set with an explicit ordering of raw positions
    pub fn select(&mut self, raw_positions: Vec<usize>) -> GraphResult<()> {
        let rows = self.row_count();
        let mut seen = vec![false; rows];
        for &raw in &raw_positions {
            if raw >= rows {
                return Err(GraphError::RowOutOfRange { raw, rows });
            }
            if seen[raw] {
                return Err(GraphError::DuplicateRow(raw));
            }
            seen[raw] = true;
        }
        self.active = raw_positions;
        Ok(())
    }

    /// Reorder the active set by `dimension`; rows without a value sort last
    pub fn sort_by_value(&mut self, dimension: &str, descending: bool) {
        let columns = &self.columns;
        self.active.sort_by(|&a, &b| {
            match (columns.get_value(a, dimension), columns.get_value(b, dimension)) {
                (Some(x), Some(y)) if descending => y.total_cmp(&x),
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
    }

    fn raw(&self, projection: usize) -> Option<usize> {
        self.active.get(projection).copied()
    }
}

impl BackingStore for RowStore {
    fn active_row_count(&self) -> usize {
        self.active.len()
    }

    fn raw_position_of(&self, active_index: usize) -> Option<usize> {
        self.raw(active_index)
    }

    fn configuration_for(&self, projection: usize, path: Option<&str>) -> Option<&PropertyValue> {
        let config = self.configs.get(self.raw(projection)?)?;
        match path {
            Some(path) => config.lookup(path),
            None => Some(config),
        }
    }

    fn scalar_value(&self, dimension: &str, projection: usize) -> Option<f64> {
        self.columns.get_value(self.raw(projection)?, dimension)
    }

    fn visual(&self, projection: usize, key: &str, ignore_parent: bool) -> Option<&PropertyValue> {
        let own = self
            .raw(projection)
            .and_then(|raw| self.visuals.get(raw))
            .and_then(|visuals| visuals.get(key));
        if own.is_some() || ignore_parent {
            return own;
        }
        self.parent_visual(key)
    }

    fn parent_visual(&self, key: &str) -> Option<&PropertyValue> {
        self.parent_visuals.get(key)
    }

    fn set_visual(&mut self, projection: usize, key: &str, value: PropertyValue) {
        if let Some(raw) = self.raw(projection) {
            self.visuals[raw].insert(key.to_string(), value);
        }
    }

    fn layout(&self, projection: usize) -> Option<&PropertyValue> {
        self.layouts.get(self.raw(projection)?)?.as_ref()
    }

    fn set_layout(&mut self, projection: usize, layout: PropertyValue, merge: bool) {
        let Some(raw) = self.raw(projection) else {
            return;
        };
        match &mut self.layouts[raw] {
            Some(existing) if merge => existing.merge(layout),
            slot => *slot = Some(layout),
        }
    }
}

impl RowFilter for RowStore {
    fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize) -> bool,
    {
        self.active.retain(|&raw| keep(raw));
    }
}
