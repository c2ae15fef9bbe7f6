use log::{debug, warn};

use crate::column::Column;
use crate::comparison::Comparison;
use crate::data_type::DataType;
use crate::error::{Result, StoreError};
use crate::value::Value;

/// Column signature: the name and type of a column.
///
/// Columns are looked up by name only. Duplicate names inside one relation
/// are allowed but ambiguous: the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnSignature {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnSignature {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub columns: Vec<ColumnSignature>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnSignature>) -> Self {
        Self { columns }
    }
}

impl FromIterator<ColumnSignature> for Schema {
    fn from_iter<I: IntoIterator<Item = ColumnSignature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A named relation: an ordered list of typed columns of equal length.
///
/// Every operator ([Relation::scan], [Relation::select], [Relation::index_scan]
/// and the joins) returns a fresh relation. Only [Relation::make_index] and
/// [Relation::insert] modify the receiver.
#[derive(Debug, Clone)]
pub struct Relation {
    pub name: String,
    columns: Vec<Column>,
}

impl Relation {
    /// Creates an empty relation with one column per signature.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        let columns = schema
            .columns
            .into_iter()
            .map(|sig| Column::new(sig.name, sig.data_type))
            .collect();
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Assembles a relation from populated columns.
    ///
    /// # Errors
    /// Returns [StoreError::ColumnLength] if the columns do not all have the
    /// same number of rows.
    pub fn from_columns(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|col| col.len() != expected) {
                return Err(StoreError::ColumnLength {
                    column: bad.name().to_string(),
                    expected,
                    found: bad.len(),
                });
            }
        }
        Ok(Self {
            name: name.into(),
            columns,
        })
    }

    /// Assembles a relation whose columns are known to have equal length.
    pub(crate) fn assemble(name: String, columns: Vec<Column>) -> Self {
        debug_assert!(columns.windows(2).all(|w| w[0].len() == w[1].len()));
        Self { name, columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn schema(&self) -> Schema {
        self.columns.iter().map(|col| col.signature().clone()).collect()
    }

    /// Ordered column names, as shown in a table header.
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Number of rows. A relation without columns has no rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Appends a row. The row is checked in full before any column is touched.
    ///
    /// # Errors
    /// Returns an error if the row length or any value type does not match
    /// the schema.
    pub fn insert(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(StoreError::RowLength {
                expected: self.columns.len(),
                found: values.len(),
            });
        }
        if let Some((col, value)) = self
            .columns
            .iter()
            .zip(&values)
            .find(|(col, value)| value.data_type() != col.data_type())
        {
            return Err(StoreError::ValueTypeMismatch {
                column: col.name().to_string(),
                expected: col.data_type(),
                found: value.data_type(),
            });
        }
        for (col, value) in self.columns.iter_mut().zip(values) {
            col.push(value)?;
        }
        Ok(())
    }

    pub fn get_row(&self, row_idx: usize) -> Option<Vec<Value>> {
        if self.row_count() <= row_idx {
            return None;
        }
        self.columns.iter().map(|col| col.get(row_idx)).collect()
    }

    /// Lazily materializes every row, in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.row_count()).map(|row| {
            self.columns
                .iter()
                .map(|col| col.value_at(row))
                .collect()
        })
    }

    pub fn get_col(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name() == name)
    }

    pub fn get_col_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|col| col.name() == name)
    }

    /// Position of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name() == name)
    }

    pub(crate) fn resolve(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| StoreError::unknown_column(&self.name, name))
    }

    /// Projects the requested columns, in the requested order.
    ///
    /// Unknown names are skipped with a warning; a name requested twice
    /// yields the column twice. The projected columns share storage with
    /// the source.
    ///
    /// ```
    /// # use colstore::{ColumnSignature, DataType, Relation, Schema, Value};
    /// let mut rel = Relation::new(
    ///     "students",
    ///     Schema::new(vec![
    ///         ColumnSignature::new("id", DataType::Int),
    ///         ColumnSignature::new("name", DataType::Text),
    ///     ]),
    /// );
    /// rel.insert(vec![Value::Int(1), Value::from("Meyer")]).unwrap();
    ///
    /// let names = rel.scan(&["name", "missing"]);
    /// assert_eq!(names.header(), vec!["name"]);
    /// assert_eq!(names.row_count(), 1);
    /// ```
    pub fn scan<S: AsRef<str>>(&self, names: &[S]) -> Relation {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            match self.get_col(name) {
                Some(col) => columns.push(col.clone()),
                None => warn!(
                    "unable to find column '{name}' in '{}'; skipping this column",
                    self.name
                ),
            }
        }
        Relation {
            name: format!("scan of {}", self.name),
            columns,
        }
    }

    /// Keeps the rows where `column OP value` holds, preserving row order.
    ///
    /// # Errors
    /// Returns an error if the column does not exist or `value` does not have
    /// the column's type.
    pub fn select(
        &self,
        column: &str,
        comparison: Comparison,
        value: &Value,
    ) -> Result<Relation> {
        let col = &self.columns[self.resolve(column)?];
        let mask = col
            .data()
            .matches(comparison, value)
            .ok_or_else(|| StoreError::ValueTypeMismatch {
                column: column.to_string(),
                expected: col.data_type(),
                found: value.data_type(),
            })?;
        let rows: Vec<usize> = mask.iter_ones().collect();
        debug!(
            "select {column} {comparison} {value} on '{}': {} of {} rows",
            self.name,
            rows.len(),
            self.row_count()
        );
        Ok(self.take_rows(format!("select from {}", self.name), &rows))
    }

    /// Builds the secondary index on `column` if it does not exist yet.
    ///
    /// Returns whether an index was built by this call.
    ///
    /// # Errors
    /// Returns an error if the column does not exist.
    pub fn make_index(&mut self, column: &str) -> Result<bool> {
        let idx = self.resolve(column)?;
        let built = self.columns[idx].build_index();
        if built {
            debug!("built index on '{}'.'{column}'", self.name);
        }
        Ok(built)
    }

    /// Returns the rows whose `column` equals `key`, through the column's index.
    ///
    /// The index is built first if needed. Rows come back in the order the
    /// index stores them, which is ascending row order. A key of another type
    /// than the column simply matches nothing.
    ///
    /// # Errors
    /// Returns an error if the column does not exist.
    pub fn index_scan(&mut self, column: &str, key: &Value) -> Result<Relation> {
        self.make_index(column)?;
        let col = &self.columns[self.resolve(column)?];
        let rows = col.index_lookup(key).to_vec();
        Ok(self.take_rows(format!("index scan on {}", self.name), &rows))
    }

    /// New relation with the same schema holding the rows at `rows`.
    pub(crate) fn take_rows(&self, name: String, rows: &[usize]) -> Relation {
        Relation {
            name,
            columns: self.columns.iter().map(|col| col.take(rows)).collect(),
        }
    }
}
