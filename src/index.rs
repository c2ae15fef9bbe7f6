use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::column::ColumnData;
use crate::value::Value;

/// A secondary hash index over one column.
///
/// Maps every distinct value to the row positions holding it, in row order.
/// Floats are keyed by their bit pattern after folding `-0.0` into `0.0`;
/// NaN rows are never inserted since no lookup could ever equal them.
#[derive(Debug, Clone)]
pub enum Index {
    Int(FxHashMap<i64, Vec<usize>>),
    Float(FxHashMap<u64, Vec<usize>>),
    Text(FxHashMap<Arc<str>, Vec<usize>>),
}

fn float_key(value: f64) -> Option<u64> {
    if value.is_nan() {
        return None;
    }
    // -0.0 == 0.0 natively, so both must land on the same key
    let value = if value == 0.0 { 0.0 } else { value };
    Some(value.to_bits())
}

impl Index {
    /// Builds the index by inserting every `(value, row)` pair in row order.
    pub fn build(data: &ColumnData) -> Self {
        match data {
            ColumnData::Int(values) => {
                let mut entries: FxHashMap<i64, Vec<usize>> = FxHashMap::default();
                for (row, value) in values.iter().enumerate() {
                    entries.entry(*value).or_default().push(row);
                }
                Self::Int(entries)
            }
            ColumnData::Float(values) => {
                let mut entries: FxHashMap<u64, Vec<usize>> = FxHashMap::default();
                for (row, value) in values.iter().enumerate() {
                    if let Some(key) = float_key(*value) {
                        entries.entry(key).or_default().push(row);
                    }
                }
                Self::Float(entries)
            }
            ColumnData::Text(values) => {
                let mut entries: FxHashMap<Arc<str>, Vec<usize>> = FxHashMap::default();
                for (row, value) in values.iter().enumerate() {
                    entries.entry(Arc::clone(value)).or_default().push(row);
                }
                Self::Text(entries)
            }
        }
    }

    /// Returns the rows holding `key`, or an empty slice when nothing matches
    /// (including a key whose type differs from the indexed column).
    pub fn lookup(&self, key: &Value) -> &[usize] {
        match (self, key) {
            (Self::Int(_), Value::Int(k)) => self.lookup_int(*k),
            (Self::Float(_), Value::Float(k)) => self.lookup_float(*k),
            (Self::Text(_), Value::Text(k)) => self.lookup_text(k),
            _ => &[],
        }
    }

    pub fn lookup_int(&self, key: i64) -> &[usize] {
        match self {
            Self::Int(entries) => entries.get(&key).map(Vec::as_slice).unwrap_or(&[]),
            _ => &[],
        }
    }

    pub fn lookup_float(&self, key: f64) -> &[usize] {
        match (self, float_key(key)) {
            (Self::Float(entries), Some(key)) => {
                entries.get(&key).map(Vec::as_slice).unwrap_or(&[])
            }
            _ => &[],
        }
    }

    pub fn lookup_text(&self, key: &str) -> &[usize] {
        match self {
            Self::Text(entries) => entries.get(key).map(Vec::as_slice).unwrap_or(&[]),
            _ => &[],
        }
    }

    /// Number of distinct indexed values.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(entries) => entries.len(),
            Self::Float(entries) => entries.len(),
            Self::Text(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
