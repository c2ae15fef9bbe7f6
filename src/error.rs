use thiserror::Error;

use crate::comparison::Comparison;
use crate::data_type::DataType;
use crate::join::JoinAlgorithm;

/// Errors returned by the store, its relations and the join engine.
///
/// Every variant is raised before any row is produced, so an operator either
/// returns a complete result or nothing at all.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no relation with name '{0}'")]
    UnknownRelation(String),

    #[error("relation '{relation}' has no column '{column}'")]
    UnknownColumn { relation: String, column: String },

    #[error("join key types do not match: {left} vs {right}")]
    JoinTypeMismatch { left: DataType, right: DataType },

    #[error("column '{column}' holds {expected} values, got {found}")]
    ValueTypeMismatch {
        column: String,
        expected: DataType,
        found: DataType,
    },

    #[error("row has {found} values while the relation has {expected} columns")]
    RowLength { expected: usize, found: usize },

    #[error("column '{column}' has {found} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("unknown comparison operator '{0}'")]
    UnknownComparison(String),

    #[error("{algorithm} join does not support comparison '{comparison}'")]
    UnsupportedComparison {
        algorithm: JoinAlgorithm,
        comparison: Comparison,
    },

    #[error("unknown join algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub(crate) fn unknown_column(relation: &str, column: &str) -> Self {
        Self::UnknownColumn {
            relation: relation.to_string(),
            column: column.to_string(),
        }
    }
}
