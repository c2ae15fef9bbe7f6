//! CSV ingestion: turns a delimited file with a header row into a typed
//! [Relation].
//!
//! Each column gets the narrowest type every one of its fields parses as:
//! integer, then float, then text. A file with a header and no data rows
//! therefore yields integer columns.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use log::debug;

use crate::column::{Column, ColumnData};
use crate::error::Result;
use crate::relation::Relation;

/// Loads `path` into a relation named after the file stem
/// (`data/students.csv` becomes `students`).
pub fn load_csv(path: impl AsRef<Path>, delimiter: u8) -> Result<Relation> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    let file = File::open(path)?;
    load_reader(name, file, delimiter)
}

/// Loads delimited text from any reader into a relation called `name`.
///
/// ```
/// use colstore::{loader, DataType};
///
/// let csv = "ID;Nachname;Durchschnitt\n1;Meyer;1.7\n2;Schulz;2.3\n";
/// let rel = loader::load_reader("students", csv.as_bytes(), b';').unwrap();
///
/// assert_eq!(rel.row_count(), 2);
/// assert_eq!(rel.get_col("Durchschnitt").unwrap().data_type(), DataType::Float);
/// ```
pub fn load_reader<R: Read>(name: impl Into<String>, reader: R, delimiter: u8) -> Result<Relation> {
    let name = name.into();
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    let header = reader.headers()?.clone();
    let records = reader
        .records()
        .collect::<std::result::Result<Vec<StringRecord>, csv::Error>>()?;

    let columns = header
        .iter()
        .enumerate()
        .map(|(idx, col_name)| Column::from_data(col_name, infer_column(&records, idx)))
        .collect();
    let relation = Relation::from_columns(name, columns)?;

    debug!(
        "loaded '{}': {} rows, {} columns",
        relation.name,
        relation.row_count(),
        relation.column_count()
    );
    Ok(relation)
}

fn infer_column(records: &[StringRecord], idx: usize) -> ColumnData {
    if let Some(ints) = parse_all::<i64>(records, idx) {
        return ColumnData::Int(ints);
    }
    let numeric = records.iter().all(|r| looks_numeric(&r[idx]));
    if let Some(floats) = numeric.then(|| parse_all::<f64>(records, idx)).flatten() {
        return ColumnData::Float(floats);
    }
    ColumnData::Text(records.iter().map(|r| r[idx].into()).collect())
}

fn parse_all<T: FromStr>(records: &[StringRecord], idx: usize) -> Option<Vec<T>> {
    records.iter().map(|r| r[idx].parse().ok()).collect()
}

// keeps words like "inf" or "NaN" out of float columns
fn looks_numeric(field: &str) -> bool {
    field.bytes().any(|b| b.is_ascii_digit())
        && field
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::DataType;
    use crate::error::StoreError;
    use crate::value::Value;
    use std::io::Write;

    const STUDENTS: &str = "\
ID,Vorname,Nachname,Alter,Durchschnitt
1,Anna,Meyer,22,1.7
2,Bert,Schulz,25,2.3
3,Cora,Meyer,21,1
";

    #[test]
    fn test_infers_column_types() {
        let rel = load_reader("students", STUDENTS.as_bytes(), b',').unwrap();

        let types: Vec<DataType> = rel.columns().iter().map(Column::data_type).collect();
        assert_eq!(
            types,
            vec![
                DataType::Int,
                DataType::Text,
                DataType::Text,
                DataType::Int,
                DataType::Float
            ]
        );
        assert_eq!(rel.row_count(), 3);
        assert_eq!(
            rel.get_row(2),
            Some(vec![
                Value::Int(3),
                Value::from("Cora"),
                Value::from("Meyer"),
                Value::Int(21),
                Value::Float(1.0),
            ])
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let rel = load_reader("t", "a;b\n1;x\n2;y\n".as_bytes(), b';').unwrap();

        assert_eq!(rel.header(), vec!["a", "b"]);
        assert_eq!(rel.get_col("a").unwrap().data_type(), DataType::Int);
    }

    #[test]
    fn test_header_only_gives_empty_int_columns() {
        let rel = load_reader("empty", "a,b\n".as_bytes(), b',').unwrap();

        assert_eq!(rel.column_count(), 2);
        assert_eq!(rel.row_count(), 0);
        assert!(rel.columns().iter().all(|c| c.data_type() == DataType::Int));
    }

    #[test]
    fn test_special_float_words_stay_text() {
        let rel = load_reader("t", "name\nNaN\ninf\n".as_bytes(), b',').unwrap();
        assert_eq!(rel.columns()[0].data_type(), DataType::Text);

        let rel = load_reader("t", "x\n-1.5\n2e3\n".as_bytes(), b',').unwrap();
        assert_eq!(rel.columns()[0].data_type(), DataType::Float);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let result = load_reader("bad", "a,b\n1,2\n3\n".as_bytes(), b',');
        assert!(matches!(result, Err(StoreError::Csv(_))));
    }

    #[test]
    fn test_load_csv_names_relation_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(STUDENTS.as_bytes()).unwrap();

        let rel = load_csv(&path, b',').unwrap();

        assert_eq!(rel.name, "students");
        assert_eq!(rel.row_count(), 3);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_csv(dir.path().join("nope.csv"), b',');
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
