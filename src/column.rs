use std::sync::Arc;

use bitvec::prelude::*;

use crate::comparison::Comparison;
use crate::data_type::DataType;
use crate::error::{Result, StoreError};
use crate::index::Index;
use crate::relation::ColumnSignature;
use crate::value::Value;

/// Physical storage for column data.
/// Each variant wraps a collection of a specific type to ensure contiguous memory
/// allocation (columnar storage).
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Vector of 64-bit integers.
    Int(Vec<i64>),
    /// Vector of 64-bit floats.
    Float(Vec<f64>),
    /// Vector of thread-safe atomic reference-counted strings.
    Text(Vec<Arc<str>>),
}

impl ColumnData {
    /// Creates empty storage for the given type, with room for `capacity` values.
    pub fn with_capacity(data_type: DataType, capacity: usize) -> Self {
        match data_type {
            DataType::Int => Self::Int(Vec::with_capacity(capacity)),
            DataType::Float => Self::Float(Vec::with_capacity(capacity)),
            DataType::Text => Self::Text(Vec::with_capacity(capacity)),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Self::Int(_) => DataType::Int,
            Self::Float(_) => DataType::Float,
            Self::Text(_) => DataType::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieves the value at `row_idx`, or `None` if it is out of bounds.
    pub fn get(&self, row_idx: usize) -> Option<Value> {
        match self {
            Self::Int(v) => v.get(row_idx).map(|i| Value::Int(*i)),
            Self::Float(v) => v.get(row_idx).map(|f| Value::Float(*f)),
            Self::Text(v) => v.get(row_idx).map(|s| Value::Text(Arc::clone(s))),
        }
    }

    /// Appends a value, handing it back if its type does not match.
    fn push(&mut self, value: Value) -> std::result::Result<(), Value> {
        match (self, value) {
            (Self::Int(col), Value::Int(v)) => col.push(v),
            (Self::Float(col), Value::Float(v)) => col.push(v),
            (Self::Text(col), Value::Text(v)) => col.push(v),
            (_, value) => return Err(value),
        }
        Ok(())
    }

    /// Gathers the values at `rows`, in the given order. Positions may repeat.
    ///
    /// # Panics
    /// Panics if a position is out of bounds.
    pub fn take(&self, rows: &[usize]) -> Self {
        match self {
            Self::Int(v) => Self::Int(rows.iter().map(|&r| v[r]).collect()),
            Self::Float(v) => Self::Float(rows.iter().map(|&r| v[r]).collect()),
            Self::Text(v) => Self::Text(rows.iter().map(|&r| Arc::clone(&v[r])).collect()),
        }
    }

    /// Evaluates `value[i] OP bound` for every row and returns the hits as a bitmap.
    ///
    /// Returns `None` when `bound` does not have the column's type.
    pub fn matches(&self, comparison: Comparison, bound: &Value) -> Option<BitVec> {
        let mask: BitVec = match (self, bound) {
            (Self::Int(v), Value::Int(b)) => v.iter().map(|x| comparison.holds(x, b)).collect(),
            (Self::Float(v), Value::Float(b)) => {
                v.iter().map(|x| comparison.holds(x, b)).collect()
            }
            (Self::Text(v), Value::Text(b)) => {
                v.iter().map(|x| comparison.holds::<str>(x, b)).collect()
            }
            _ => return None,
        };
        Some(mask)
    }
}

/// Represents a column within a relation.
/// It combines the signature (name, type) with the values and an optional
/// secondary index over them.
///
/// The values sit behind an [Arc]: cloning a column (as a projection does)
/// shares them, and any later write copies them first, so a projection never
/// observes mutations of its source.
#[derive(Debug, Clone)]
pub struct Column {
    signature: ColumnSignature,
    data: Arc<ColumnData>,
    index: Option<Arc<Index>>,
}

impl Column {
    /// Creates a new, empty column with the specified name and data type.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self::from_data(name, ColumnData::with_capacity(data_type, 0))
    }

    /// Wraps already populated storage; the type is taken from the storage.
    pub fn from_data(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            signature: ColumnSignature::new(name, data.data_type()),
            data: Arc::new(data),
            index: None,
        }
    }

    pub fn signature(&self) -> &ColumnSignature {
        &self.signature
    }

    pub fn name(&self) -> &str {
        &self.signature.name
    }

    pub fn data_type(&self) -> DataType {
        self.signature.data_type
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Appends a new value to the end of the column.
    ///
    /// An existing index is *not* updated; indexed columns must not be
    /// mutated once the index is built.
    ///
    /// # Errors
    /// Returns an error if the value's type does not match the column's data type.
    ///
    /// # Example
    /// ```
    /// # use colstore::{Column, DataType, Value};
    /// let mut col = Column::new("age", DataType::Int);
    /// col.push(Value::Int(30)).unwrap();
    ///
    /// assert_eq!(col.len(), 1);
    /// assert!(col.push(Value::from("thirty")).is_err());
    /// ```
    pub fn push(&mut self, value: Value) -> Result<()> {
        let found = value.data_type();
        Arc::make_mut(&mut self.data)
            .push(value)
            .map_err(|_| StoreError::ValueTypeMismatch {
                column: self.signature.name.clone(),
                expected: self.signature.data_type,
                found,
            })
    }

    /// Returns the number of rows currently stored in the column.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if there is no row in the column, else false.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieves the value at the specified row index.
    ///
    /// Returns `None` if it is out of bounds.
    pub fn get(&self, row_idx: usize) -> Option<Value> {
        self.data.get(row_idx)
    }

    /// Retrieves the value at the specified row index.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn value_at(&self, row_idx: usize) -> Value {
        match self.get(row_idx) {
            Some(value) => value,
            None => panic!(
                "row {row_idx} out of range for column '{}' with {} rows",
                self.name(),
                self.len()
            ),
        }
    }

    /// Builds the secondary index over the current values.
    ///
    /// Returns `false` and does nothing if the column is already indexed.
    pub fn build_index(&mut self) -> bool {
        if self.index.is_some() {
            return false;
        }
        self.index = Some(Arc::new(Index::build(&self.data)));
        true
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    pub fn index(&self) -> Option<&Index> {
        self.index.as_deref()
    }

    /// Rows holding `key`, in row order. Empty when there is no index or no match.
    pub fn index_lookup(&self, key: &Value) -> &[usize] {
        match &self.index {
            Some(index) => index.lookup(key),
            None => &[],
        }
    }

    /// Copies the rows at `rows` into a fresh, unindexed column with the same
    /// signature.
    pub fn take(&self, rows: &[usize]) -> Self {
        Self {
            signature: self.signature.clone(),
            data: Arc::new(self.data.take(rows)),
            index: None,
        }
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.signature.name = name;
    }
}
