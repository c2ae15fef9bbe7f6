use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use log::{debug, info};

use crate::comparison::Comparison;
use crate::error::{Result, StoreError};
use crate::join::{self, JoinAlgorithm};
use crate::loader;
use crate::relation::{Relation, Schema};

/// The catalog: owns every named relation and runs joins between them by
/// name.
#[derive(Default)]
pub struct ColumnStore {
    /// Relation names to relations. Names are unique.
    relations: HashMap<String, Relation>,
}

impl ColumnStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            relations: HashMap::default(),
        }
    }

    /// Creates an empty relation and registers it under `name`, replacing
    /// any relation already registered there.
    ///
    /// # Example
    /// ```
    /// use colstore::{ColumnSignature, ColumnStore, DataType, Schema, Value};
    ///
    /// let mut store = ColumnStore::new();
    /// let schema = Schema::new(vec![ColumnSignature::new("id", DataType::Int)]);
    /// store.create_relation("users", schema).insert(vec![Value::Int(7)]).unwrap();
    ///
    /// assert_eq!(store.get_relation("users").unwrap().row_count(), 1);
    /// ```
    pub fn create_relation(&mut self, name: impl Into<String>, schema: Schema) -> &mut Relation {
        let name = name.into();
        self.insert_relation(Relation::new(name, schema))
    }

    /// Registers an already built relation (a load or join result, say)
    /// under its own name, replacing any previous one.
    pub fn insert_relation(&mut self, relation: Relation) -> &mut Relation {
        match self.relations.entry(relation.name.clone()) {
            Entry::Occupied(mut entry) => {
                debug!("replacing relation '{}'", entry.key());
                entry.insert(relation);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(relation),
        }
    }

    /// Looks a relation up by name.
    ///
    /// # Errors
    /// [StoreError::UnknownRelation] if nothing is registered under `name`.
    pub fn get_relation(&self, name: &str) -> Result<&Relation> {
        self.relations
            .get(name)
            .ok_or_else(|| StoreError::UnknownRelation(name.to_string()))
    }

    pub fn get_relation_mut(&mut self, name: &str) -> Result<&mut Relation> {
        self.relations
            .get_mut(name)
            .ok_or_else(|| StoreError::UnknownRelation(name.to_string()))
    }

    /// Removes a relation and hands it back.
    pub fn drop_relation(&mut self, name: &str) -> Result<Relation> {
        self.relations
            .remove(name)
            .ok_or_else(|| StoreError::UnknownRelation(name.to_string()))
    }

    /// Names of all registered relations, in no particular order.
    pub fn list_relations(&self) -> Vec<&str> {
        self.relations.keys().map(String::as_str).collect()
    }

    /// Loads a CSV file (see [loader::load_csv]) and registers it under the
    /// file stem.
    pub fn load(&mut self, path: impl AsRef<Path>, delimiter: u8) -> Result<&Relation> {
        let relation = loader::load_csv(path, delimiter)?;
        info!(
            "loaded relation '{}' ({} rows)",
            relation.name,
            relation.row_count()
        );
        Ok(self.insert_relation(relation))
    }

    /// Runs `algorithm` between two registered relations.
    ///
    /// For [JoinAlgorithm::IndexNestedLoop] the index on the right key column
    /// is built and kept on the stored relation, so later joins reuse it.
    pub fn join(
        &mut self,
        algorithm: JoinAlgorithm,
        left: &str,
        left_col: &str,
        right: &str,
        right_col: &str,
        comparison: Comparison,
    ) -> Result<Relation> {
        if algorithm == JoinAlgorithm::IndexNestedLoop {
            if comparison != Comparison::Eq {
                return Err(StoreError::UnsupportedComparison {
                    algorithm,
                    comparison,
                });
            }
            return self.index_nested_loop_join(left, left_col, right, right_col);
        }
        join::join(
            algorithm,
            self.get_relation(left)?,
            left_col,
            self.get_relation(right)?,
            right_col,
            comparison,
        )
    }

    pub fn nested_loop_join(
        &self,
        left: &str,
        left_col: &str,
        right: &str,
        right_col: &str,
        comparison: Comparison,
    ) -> Result<Relation> {
        join::nested_loop_join(
            self.get_relation(left)?,
            left_col,
            self.get_relation(right)?,
            right_col,
            comparison,
        )
    }

    /// Equality join through a hash index on `right.right_col`, which is
    /// created on the stored relation if it is missing.
    ///
    /// Key columns and types are checked before any index is built.
    pub fn index_nested_loop_join(
        &mut self,
        left: &str,
        left_col: &str,
        right: &str,
        right_col: &str,
    ) -> Result<Relation> {
        join::check_keys(
            self.get_relation(left)?,
            left_col,
            self.get_relation(right)?,
            right_col,
        )?;
        self.get_relation_mut(right)?.make_index(right_col)?;
        join::index_nested_loop_join(
            self.get_relation(left)?,
            left_col,
            self.get_relation(right)?,
            right_col,
        )
    }

    pub fn hash_join(
        &self,
        left: &str,
        left_col: &str,
        right: &str,
        right_col: &str,
        comparison: Comparison,
    ) -> Result<Relation> {
        join::hash_join(
            self.get_relation(left)?,
            left_col,
            self.get_relation(right)?,
            right_col,
            comparison,
        )
    }

    pub fn parallel_hash_join(
        &self,
        left: &str,
        left_col: &str,
        right: &str,
        right_col: &str,
        comparison: Comparison,
    ) -> Result<Relation> {
        join::parallel_hash_join(
            self.get_relation(left)?,
            left_col,
            self.get_relation(right)?,
            right_col,
            comparison,
        )
    }
}
