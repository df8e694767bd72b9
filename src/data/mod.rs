//! Backing-store contract
//!
//! The graph never owns its row data. Node and edge attributes (scalar
//! dimensions, configuration, visuals, layout) live in a tabular store whose
//! *active* row set can be filtered or reordered independently of the graph.
//! Projection indices on nodes and edges address rows of that active set.
//!
//! [`RowStore`] is the in-memory implementation used by document loading and
//! the CLI; callers with their own tables implement [`BackingStore`] directly.

pub mod columnar;
pub mod row_store;

pub use columnar::{Column, ColumnStore};
pub use row_store::{RowRecord, RowStore};

use crate::graph::PropertyValue;

/// Read/write access to the rows behind a graph's nodes or edges.
///
/// Every `projection` argument is a position in the current active row set.
/// Positions outside that set yield `None` or are ignored.
pub trait BackingStore {
    /// Number of rows currently active
    fn active_row_count(&self) -> usize;

    /// Raw (pre-filter) position of the row at `active_index`
    fn raw_position_of(&self, active_index: usize) -> Option<usize>;

    /// Row configuration, optionally narrowed by a dotted `path`
    fn configuration_for(&self, projection: usize, path: Option<&str>) -> Option<&PropertyValue>;

    /// Scalar value of `dimension` on the row
    fn scalar_value(&self, dimension: &str, projection: usize) -> Option<f64>;

    /// Visual attribute of the row; falls back to store-level visuals unless `ignore_parent`.
    /// A `projection` outside the active set still gets the fallback.
    fn visual(&self, projection: usize, key: &str, ignore_parent: bool) -> Option<&PropertyValue>;

    /// Store-level visual shared by every row
    fn parent_visual(&self, _key: &str) -> Option<&PropertyValue> {
        None
    }

    fn set_visual(&mut self, projection: usize, key: &str, value: PropertyValue);

    fn layout(&self, projection: usize) -> Option<&PropertyValue>;

    /// Store layout state; with `merge`, map layouts are merged key by key
    fn set_layout(&mut self, projection: usize, layout: PropertyValue, merge: bool);

    /// Raw position of the row addressed by `projection`
    fn raw_index_of(&self, projection: usize) -> Option<usize> {
        self.raw_position_of(projection)
    }
}

/// Stores whose active row set can be narrowed in place.
pub trait RowFilter: BackingStore {
    /// Keep only the active rows whose raw position satisfies `keep`,
    /// preserving their relative order.
    fn retain_rows<F>(&mut self, keep: F)
    where
        F: FnMut(usize) -> bool;
}
