//! The join engine.
//!
//! All four algorithms share one contract: the result schema is the left
//! schema followed by the right schema, the left key column renamed with a
//! ` (first)` suffix and the right key column with ` (second)`. Each result
//! row is a left row followed by a right row. Key columns are resolved and
//! their types compared before any row is touched.
//!
//! The predicate is always evaluated as `right OP left`.
//!
//! # Hash join caveat
//!
//! [hash_join] and [parallel_hash_join] only compare rows that fall into the
//! same hash bucket. That is complete for `==`, but for `<`, `>`, `<=`, `>=`
//! and `!=` rows whose keys hash to different buckets are never compared, so
//! those joins may return fewer rows than [nested_loop_join]. Use the nested
//! loop join when an ordering join must be exhaustive.

use std::fmt;
use std::hash::Hasher;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHasher;

use crate::column::{Column, ColumnData};
use crate::comparison::Comparison;
use crate::error::{Result, StoreError};
use crate::index::Index;
use crate::relation::Relation;

const FIRST_SUFFIX: &str = " (first)";
const SECOND_SUFFIX: &str = " (second)";

/// The join strategies. Picking one is up to the caller; there is no planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinAlgorithm {
    NestedLoop,
    IndexNestedLoop,
    Hash,
    ParallelHash,
}

impl JoinAlgorithm {
    pub const ALL: [JoinAlgorithm; 4] = [
        JoinAlgorithm::NestedLoop,
        JoinAlgorithm::IndexNestedLoop,
        JoinAlgorithm::Hash,
        JoinAlgorithm::ParallelHash,
    ];

    fn cli_name(self) -> &'static str {
        match self {
            Self::NestedLoop => "nested-loop",
            Self::IndexNestedLoop => "index-nested-loop",
            Self::Hash => "hash",
            Self::ParallelHash => "parallel-hash",
        }
    }

    /// Name given to the relations this algorithm produces.
    pub fn result_name(self) -> &'static str {
        match self {
            Self::NestedLoop => "NestedLoopJoin",
            Self::IndexNestedLoop => "IndexNestedLoopJoin",
            Self::Hash => "HashJoin",
            Self::ParallelHash => "ParallelHashJoin",
        }
    }
}

impl FromStr for JoinAlgorithm {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algo| algo.cli_name() == s)
            .ok_or_else(|| StoreError::UnknownAlgorithm(s.to_string()))
    }
}

impl fmt::Display for JoinAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

/// Runs `algorithm` over two relations.
///
/// # Errors
/// Fails on unknown key columns, mismatched key types, or a comparison other
/// than `==` for [JoinAlgorithm::IndexNestedLoop].
pub fn join(
    algorithm: JoinAlgorithm,
    left: &Relation,
    left_col: &str,
    right: &Relation,
    right_col: &str,
    comparison: Comparison,
) -> Result<Relation> {
    match algorithm {
        JoinAlgorithm::NestedLoop => {
            nested_loop_join(left, left_col, right, right_col, comparison)
        }
        JoinAlgorithm::IndexNestedLoop => {
            if comparison != Comparison::Eq {
                return Err(StoreError::UnsupportedComparison {
                    algorithm,
                    comparison,
                });
            }
            index_nested_loop_join(left, left_col, right, right_col)
        }
        JoinAlgorithm::Hash => hash_join(left, left_col, right, right_col, comparison),
        JoinAlgorithm::ParallelHash => {
            parallel_hash_join(left, left_col, right, right_col, comparison)
        }
    }
}

/// Compares every left row with every right row.
///
/// Supports all six comparisons. O(|left| * |right|).
pub fn nested_loop_join(
    left: &Relation,
    left_col: &str,
    right: &Relation,
    right_col: &str,
    comparison: Comparison,
) -> Result<Relation> {
    let keys = JoinKeys::resolve(left, left_col, right, right_col)?;
    let pairs = match (keys.left.data(), keys.right.data()) {
        (ColumnData::Int(l), ColumnData::Int(r)) => nested_loop(l, r, comparison),
        (ColumnData::Float(l), ColumnData::Float(r)) => nested_loop(l, r, comparison),
        (ColumnData::Text(l), ColumnData::Text(r)) => nested_loop(l, r, comparison),
        _ => return Err(keys.mismatch()),
    };
    Ok(keys.materialize(JoinAlgorithm::NestedLoop, &pairs))
}

/// Equality join that looks every left key up in a hash index over the
/// right key column.
///
/// Uses the right column's index when it has one (see
/// [Relation::make_index]); otherwise a throwaway index is built for this
/// call.
pub fn index_nested_loop_join(
    left: &Relation,
    left_col: &str,
    right: &Relation,
    right_col: &str,
) -> Result<Relation> {
    let keys = JoinKeys::resolve(left, left_col, right, right_col)?;

    let transient;
    let index = match keys.right.index() {
        Some(index) => index,
        None => {
            debug!(
                "no index on '{}'.'{right_col}', building one for this join",
                right.name
            );
            transient = Index::build(keys.right.data());
            &transient
        }
    };

    let pairs: Vec<(usize, usize)> = match keys.left.data() {
        ColumnData::Int(l) => probe_index(l, |k| index.lookup_int(*k)),
        ColumnData::Float(l) => probe_index(l, |k| index.lookup_float(*k)),
        ColumnData::Text(l) => probe_index(l, |k| index.lookup_text(k)),
    };
    Ok(keys.materialize(JoinAlgorithm::IndexNestedLoop, &pairs))
}

/// Single-threaded hash join.
///
/// The relation with fewer rows is hashed (the right one on a tie); the other
/// is probed row by row. See the module docs for the caveat on non-equality
/// comparisons.
pub fn hash_join(
    left: &Relation,
    left_col: &str,
    right: &Relation,
    right_col: &str,
    comparison: Comparison,
) -> Result<Relation> {
    run_hash_join(left, left_col, right, right_col, comparison, false)
}

/// Hash join whose probe phase runs on the rayon pool.
///
/// Each probe row collects its matches on its own; the per-row lists are
/// concatenated in probe row order, so the output is identical to
/// [hash_join].
pub fn parallel_hash_join(
    left: &Relation,
    left_col: &str,
    right: &Relation,
    right_col: &str,
    comparison: Comparison,
) -> Result<Relation> {
    run_hash_join(left, left_col, right, right_col, comparison, true)
}

fn run_hash_join(
    left: &Relation,
    left_col: &str,
    right: &Relation,
    right_col: &str,
    comparison: Comparison,
    parallel: bool,
) -> Result<Relation> {
    let keys = JoinKeys::resolve(left, left_col, right, right_col)?;
    let side = BuildSide::choose(left.row_count(), right.row_count());
    let (build, probe) = match side {
        BuildSide::Left => (keys.left, keys.right),
        BuildSide::Right => (keys.right, keys.left),
    };
    debug!(
        "hash join: building on {side:?} '{}' ({} rows), probing {} rows",
        build.name(),
        build.len(),
        probe.len()
    );

    let ctx = ProbeContext {
        side,
        comparison,
        parallel,
    };
    let pairs = match (build.data(), probe.data()) {
        (ColumnData::Int(b), ColumnData::Int(p)) => ctx.run(b, p),
        (ColumnData::Float(b), ColumnData::Float(p)) => ctx.run(b, p),
        (ColumnData::Text(b), ColumnData::Text(p)) => ctx.run(b, p),
        _ => return Err(keys.mismatch()),
    };
    let algorithm = if parallel {
        JoinAlgorithm::ParallelHash
    } else {
        JoinAlgorithm::Hash
    };
    Ok(keys.materialize(algorithm, &pairs))
}

/// Resolves both key columns and checks their types without joining.
pub(crate) fn check_keys(
    left: &Relation,
    left_col: &str,
    right: &Relation,
    right_col: &str,
) -> Result<()> {
    JoinKeys::resolve(left, left_col, right, right_col).map(|_| ())
}

/// The two resolved key columns plus what is needed to build the result.
struct JoinKeys<'a> {
    left_rel: &'a Relation,
    right_rel: &'a Relation,
    left: &'a Column,
    right: &'a Column,
    left_idx: usize,
    right_idx: usize,
}

impl<'a> JoinKeys<'a> {
    fn resolve(
        left_rel: &'a Relation,
        left_col: &str,
        right_rel: &'a Relation,
        right_col: &str,
    ) -> Result<Self> {
        let left_idx = left_rel.resolve(left_col)?;
        let right_idx = right_rel.resolve(right_col)?;
        let keys = Self {
            left_rel,
            right_rel,
            left: &left_rel.columns()[left_idx],
            right: &right_rel.columns()[right_idx],
            left_idx,
            right_idx,
        };
        if keys.left.data_type() != keys.right.data_type() {
            return Err(keys.mismatch());
        }
        Ok(keys)
    }

    fn mismatch(&self) -> StoreError {
        StoreError::JoinTypeMismatch {
            left: self.left.data_type(),
            right: self.right.data_type(),
        }
    }

    /// Builds the result relation from `(left_row, right_row)` pairs, in order.
    fn materialize(&self, algorithm: JoinAlgorithm, pairs: &[(usize, usize)]) -> Relation {
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = pairs.iter().copied().unzip();
        let left_cols = result_columns(self.left_rel, self.left_idx, FIRST_SUFFIX, &left_rows);
        let right_cols =
            result_columns(self.right_rel, self.right_idx, SECOND_SUFFIX, &right_rows);
        debug!(
            "{algorithm} join of '{}' and '{}' produced {} rows",
            self.left_rel.name,
            self.right_rel.name,
            pairs.len()
        );
        Relation::assemble(
            algorithm.result_name().to_string(),
            left_cols.chain(right_cols).collect(),
        )
    }
}

fn result_columns<'a>(
    rel: &'a Relation,
    key_idx: usize,
    suffix: &'a str,
    rows: &'a [usize],
) -> impl Iterator<Item = Column> + 'a {
    rel.columns().iter().enumerate().map(move |(i, col)| {
        let mut out = col.take(rows);
        if i == key_idx {
            out.rename(format!("{}{suffix}", col.name()));
        }
        out
    })
}

fn nested_loop<T: PartialOrd>(
    left: &[T],
    right: &[T],
    comparison: Comparison,
) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, l) in left.iter().enumerate() {
        for (j, r) in right.iter().enumerate() {
            if comparison.holds(r, l) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

fn probe_index<'i, T>(left: &[T], lookup: impl Fn(&T) -> &'i [usize]) -> Vec<(usize, usize)> {
    left.iter()
        .enumerate()
        .flat_map(|(i, key)| lookup(key).iter().map(move |&j| (i, j)))
        .collect()
}

/// Bucket hash of a join key: integers hash to themselves, floats to their
/// nearest integer, text to a 64-bit content hash.
trait BucketHash {
    fn bucket_hash(&self) -> i64;
}

impl BucketHash for i64 {
    fn bucket_hash(&self) -> i64 {
        *self
    }
}

impl BucketHash for f64 {
    fn bucket_hash(&self) -> i64 {
        self.round() as i64
    }
}

impl BucketHash for Arc<str> {
    fn bucket_hash(&self) -> i64 {
        let mut hasher = FxHasher::default();
        hasher.write(self.as_bytes());
        hasher.finish() as i64
    }
}

fn bucket_of(hash: i64, size: usize) -> usize {
    (hash % size as i64).unsigned_abs() as usize
}

/// One bucket per build row; each bucket lists build rows in ascending order.
struct HashTable {
    buckets: Vec<Vec<usize>>,
}

impl HashTable {
    fn build<T: BucketHash>(keys: &[T]) -> Self {
        let mut buckets = vec![Vec::new(); keys.len()];
        for (row, key) in keys.iter().enumerate() {
            buckets[bucket_of(key.bucket_hash(), keys.len())].push(row);
        }
        Self { buckets }
    }

    fn candidates<T: BucketHash>(&self, key: &T) -> &[usize] {
        if self.buckets.is_empty() {
            return &[];
        }
        &self.buckets[bucket_of(key.bucket_hash(), self.buckets.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildSide {
    Left,
    Right,
}

impl BuildSide {
    fn choose(left_rows: usize, right_rows: usize) -> Self {
        if left_rows < right_rows {
            Self::Left
        } else {
            Self::Right
        }
    }
}

struct ProbeContext {
    side: BuildSide,
    comparison: Comparison,
    parallel: bool,
}

impl ProbeContext {
    /// Returns `(left_row, right_row)` pairs ordered by probe row, then build row.
    fn run<T>(&self, build: &[T], probe: &[T]) -> Vec<(usize, usize)>
    where
        T: BucketHash + PartialOrd + Sync,
    {
        let table = HashTable::build(build);
        let probe_row = |p: usize| -> Vec<(usize, usize)> {
            let key = &probe[p];
            table
                .candidates(key)
                .iter()
                .filter(|&&b| self.holds(&build[b], key))
                .map(|&b| self.orient(b, p))
                .collect()
        };

        if self.parallel {
            let per_row: Vec<Vec<(usize, usize)>> =
                (0..probe.len()).into_par_iter().map(probe_row).collect();
            per_row.into_iter().flatten().collect()
        } else {
            (0..probe.len()).flat_map(probe_row).collect()
        }
    }

    fn holds<T: PartialOrd>(&self, build: &T, probe: &T) -> bool {
        match self.side {
            BuildSide::Left => self.comparison.holds(probe, build),
            BuildSide::Right => self.comparison.holds(build, probe),
        }
    }

    fn orient(&self, build_row: usize, probe_row: usize) -> (usize, usize) {
        match self.side {
            BuildSide::Left => (build_row, probe_row),
            BuildSide::Right => (probe_row, build_row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn relation(name: &str, columns: Vec<(&str, ColumnData)>) -> Relation {
        Relation::from_columns(
            name,
            columns
                .into_iter()
                .map(|(col, data)| Column::from_data(col, data))
                .collect(),
        )
        .unwrap()
    }

    fn text(values: &[&str]) -> ColumnData {
        ColumnData::Text(values.iter().map(|s| Arc::from(*s)).collect())
    }

    fn sorted_rows(rel: &Relation) -> Vec<String> {
        let mut rows: Vec<String> = rel
            .rows()
            .map(|row| {
                row.iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect();
        rows.sort();
        rows
    }

    fn scenario() -> (Relation, Relation) {
        let a = relation(
            "A",
            vec![("id", ColumnData::Int(vec![1, 2])), ("name", text(&["x", "y"]))],
        );
        let b = relation(
            "B",
            vec![("id", ColumnData::Int(vec![2, 3])), ("v", text(&["p", "q"]))],
        );
        (a, b)
    }

    #[test]
    fn test_hash_join_scenario() {
        let (a, b) = scenario();

        let result = hash_join(&a, "id", &b, "id", Comparison::Eq).unwrap();

        assert_eq!(result.name, "HashJoin");
        assert_eq!(result.header(), vec!["id (first)", "name", "id (second)", "v"]);
        assert_eq!(result.row_count(), 1);
        assert_eq!(
            result.get_row(0),
            Some(vec![
                Value::Int(2),
                Value::from("y"),
                Value::Int(2),
                Value::from("p"),
            ])
        );
    }

    #[test]
    fn test_equality_joins_agree_for_every_type() {
        let cases = [
            (
                ColumnData::Int(vec![1, 2, 2, 3, -4]),
                ColumnData::Int(vec![2, 3, 3, 5, -4, 2]),
            ),
            (
                ColumnData::Float(vec![1.5, 2.0, 2.5, 2.5, -0.5]),
                ColumnData::Float(vec![2.5, 2.4, -0.5, 1.5]),
            ),
            (
                text(&["Anna", "Bert", "Anna", "Cora"]),
                text(&["Cora", "Anna", "Dora", "Anna", "Bert", "Emil"]),
            ),
        ];

        for (l, r) in cases {
            let left_len = l.len();
            let right_len = r.len();
            let left = relation(
                "L",
                vec![("k", l), ("pos", ColumnData::Int((0..left_len as i64).collect()))],
            );
            let right = relation(
                "R",
                vec![("k", r), ("pos", ColumnData::Int((0..right_len as i64).collect()))],
            );

            let nl = nested_loop_join(&left, "k", &right, "k", Comparison::Eq).unwrap();
            let inl = index_nested_loop_join(&left, "k", &right, "k").unwrap();
            let hash = hash_join(&left, "k", &right, "k", Comparison::Eq).unwrap();
            let swapped = hash_join(&right, "k", &left, "k", Comparison::Eq).unwrap();

            assert!(nl.row_count() > 0);
            assert_eq!(sorted_rows(&nl), sorted_rows(&inl));
            assert_eq!(sorted_rows(&nl), sorted_rows(&hash));
            assert_eq!(swapped.row_count(), nl.row_count());
        }
    }

    #[test]
    fn test_nested_loop_compares_right_against_left() {
        let left = relation("L", vec![("x", ColumnData::Int(vec![1, 5]))]);
        let right = relation("R", vec![("y", ColumnData::Int(vec![3, 7]))]);

        // right < left: only (5, 3)
        let lt = nested_loop_join(&left, "x", &right, "y", Comparison::Lt).unwrap();
        assert_eq!(lt.rows().collect::<Vec<_>>(), vec![vec![Value::Int(5), Value::Int(3)]]);

        let ne = nested_loop_join(&left, "x", &right, "y", Comparison::Ne).unwrap();
        assert_eq!(ne.row_count(), 4);
    }

    #[test]
    fn test_nested_loop_output_order() {
        let left = relation("L", vec![("k", ColumnData::Int(vec![2, 1, 2]))]);
        let right = relation("R", vec![("k", ColumnData::Int(vec![1, 2, 2]))]);

        let result = nested_loop_join(&left, "k", &right, "k", Comparison::Eq).unwrap();
        let index = index_nested_loop_join(&left, "k", &right, "k").unwrap();

        let pairs: Vec<Vec<Value>> = result.rows().collect();
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs, index.rows().collect::<Vec<_>>());
    }

    #[test]
    fn test_index_join_reuses_existing_index() {
        let left = relation("L", vec![("k", ColumnData::Int(vec![5, 7]))]);
        let mut right = relation("R", vec![("k", ColumnData::Int(vec![5, 3, 5, 7]))]);
        right.make_index("k").unwrap();

        let result = index_nested_loop_join(&left, "k", &right, "k").unwrap();

        assert_eq!(result.name, "IndexNestedLoopJoin");
        assert_eq!(result.header(), vec!["k (first)", "k (second)"]);
        assert_eq!(result.row_count(), 3);
        assert!(right.get_col("k").unwrap().has_index());
    }

    #[test]
    fn test_type_mismatch_is_rejected_up_front() {
        let left = relation("L", vec![("k", ColumnData::Int(vec![1]))]);
        let right = relation("R", vec![("k", text(&["1"]))]);

        for algorithm in JoinAlgorithm::ALL {
            let result = join(algorithm, &left, "k", &right, "k", Comparison::Eq);
            assert!(
                matches!(result, Err(StoreError::JoinTypeMismatch { .. })),
                "{algorithm}"
            );
        }
    }

    #[test]
    fn test_unknown_key_column() {
        let (a, b) = scenario();

        let result = hash_join(&a, "id", &b, "missing", Comparison::Eq);
        assert!(matches!(
            result,
            Err(StoreError::UnknownColumn { ref relation, ref column })
                if relation == "B" && column == "missing"
        ));
    }

    #[test]
    fn test_index_join_rejects_ordering_comparison() {
        let (a, b) = scenario();

        let result = join(JoinAlgorithm::IndexNestedLoop, &a, "id", &b, "id", Comparison::Lt);
        assert!(matches!(result, Err(StoreError::UnsupportedComparison { .. })));
    }

    #[test]
    fn test_build_side_choice() {
        assert_eq!(BuildSide::choose(1, 2), BuildSide::Left);
        assert_eq!(BuildSide::choose(2, 2), BuildSide::Right);
        assert_eq!(BuildSide::choose(3, 2), BuildSide::Right);
    }

    #[test]
    fn test_hash_join_schema_is_left_then_right_whatever_the_build_side() {
        let small = relation("S", vec![("k", ColumnData::Int(vec![1])), ("s", text(&["a"]))]);
        let large = relation(
            "B",
            vec![("k", ColumnData::Int(vec![1, 1, 2])), ("b", text(&["p", "q", "r"]))],
        );

        let small_left = hash_join(&small, "k", &large, "k", Comparison::Eq).unwrap();
        assert_eq!(small_left.header(), vec!["k (first)", "s", "k (second)", "b"]);
        assert_eq!(
            small_left.rows().map(|r| r[3].to_string()).collect::<Vec<_>>(),
            vec!["p", "q"]
        );

        let small_right = hash_join(&large, "k", &small, "k", Comparison::Eq).unwrap();
        assert_eq!(small_right.header(), vec!["k (first)", "b", "k (second)", "s"]);
        assert_eq!(small_right.row_count(), 2);
    }

    #[test]
    fn test_hash_join_ordering_comparison_is_subset_of_nested_loop() {
        let left = relation("L", vec![("k", ColumnData::Int(vec![1, 2, 3, 4, 5, 6]))]);
        let right = relation("R", vec![("k", ColumnData::Int(vec![2, 4, 6, 8]))]);

        for cmp in Comparison::ALL {
            let nl = sorted_rows(&nested_loop_join(&left, "k", &right, "k", cmp).unwrap());
            let hash = sorted_rows(&hash_join(&left, "k", &right, "k", cmp).unwrap());
            assert!(hash.iter().all(|row| nl.contains(row)), "{cmp}");
        }
    }

    #[test]
    fn test_negative_and_fractional_keys_stay_in_range() {
        let left = relation("L", vec![("k", ColumnData::Int(vec![i64::MIN, -7, 0]))]);
        let right = relation("R", vec![("k", ColumnData::Int(vec![-7, i64::MIN, 9, 0]))]);
        let result = hash_join(&left, "k", &right, "k", Comparison::Eq).unwrap();
        assert_eq!(result.row_count(), 3);

        let left = relation("L", vec![("k", ColumnData::Float(vec![-2.5, 0.49, f64::NAN]))]);
        let right = relation(
            "R",
            vec![("k", ColumnData::Float(vec![0.49, -2.5, f64::NAN, 1.0]))],
        );
        let result = hash_join(&left, "k", &right, "k", Comparison::Eq).unwrap();
        assert_eq!(result.row_count(), 2);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sizes = [(0, 0), (0, 3), (1, 1), (1, 4), (5000, 1200)];

        for (left_rows, right_rows) in sizes {
            let left = relation(
                "L",
                vec![
                    ("k", ColumnData::Int((0..left_rows).map(|i| i % 97).collect())),
                    ("tag", ColumnData::Int((0..left_rows).collect())),
                ],
            );
            let right = relation(
                "R",
                vec![
                    ("k", ColumnData::Int((0..right_rows).map(|i| (i * 7) % 101).collect())),
                    ("tag", ColumnData::Int((0..right_rows).collect())),
                ],
            );

            for cmp in [Comparison::Eq, Comparison::Ne, Comparison::Le] {
                let seq = hash_join(&left, "k", &right, "k", cmp).unwrap();
                let par = parallel_hash_join(&left, "k", &right, "k", cmp).unwrap();

                assert_eq!(par.name, "ParallelHashJoin");
                assert_eq!(par.header(), seq.header());
                assert_eq!(
                    par.rows().collect::<Vec<_>>(),
                    seq.rows().collect::<Vec<_>>(),
                    "{left_rows}x{right_rows} {cmp}"
                );
            }
        }
    }

    #[test]
    fn test_parallel_text_join() {
        let names = ["Anna", "Bert", "Cora", "Dora"];
        let left = relation(
            "L",
            vec![(
                "name",
                ColumnData::Text((0..400).map(|i| Arc::from(names[i % 4])).collect()),
            )],
        );
        let right = relation("R", vec![("name", text(&["Cora", "Emil", "Anna"]))]);

        let seq = hash_join(&left, "name", &right, "name", Comparison::Eq).unwrap();
        let par = parallel_hash_join(&left, "name", &right, "name", Comparison::Eq).unwrap();

        assert_eq!(seq.row_count(), 200);
        assert_eq!(par.rows().collect::<Vec<_>>(), seq.rows().collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_relations() {
        let empty = relation("E", vec![("k", ColumnData::Int(vec![]))]);
        let full = relation("F", vec![("k", ColumnData::Int(vec![1, 2]))]);

        for algorithm in JoinAlgorithm::ALL {
            let a = join(algorithm, &empty, "k", &full, "k", Comparison::Eq).unwrap();
            let b = join(algorithm, &full, "k", &empty, "k", Comparison::Eq).unwrap();
            assert_eq!(a.row_count(), 0);
            assert_eq!(b.row_count(), 0);
            assert_eq!(a.column_count(), 2);
        }
    }

    #[test]
    fn test_algorithm_names() {
        for algorithm in JoinAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<JoinAlgorithm>().unwrap(), algorithm);
        }
        assert!("merge".parse::<JoinAlgorithm>().is_err());
    }
}
