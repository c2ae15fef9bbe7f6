pub mod column;
pub mod comparison;
pub mod data_type;
pub mod error;
pub mod index;
pub mod join;
pub mod loader;
pub mod printer;
pub mod relation;
pub mod store;
pub mod value;

pub use column::{Column, ColumnData};
pub use comparison::Comparison;
pub use data_type::DataType;
pub use error::{Result, StoreError};
pub use index::Index;
pub use join::JoinAlgorithm;
pub use relation::{ColumnSignature, Relation, Schema};
pub use store::ColumnStore;
pub use value::Value;
