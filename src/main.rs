use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::debug;

use colstore::{ColumnStore, Comparison, DataType, JoinAlgorithm, Relation, Value};

/// Load CSV files into an in-memory column store, then print, filter or
/// join them.
#[derive(Parser)]
#[command(name = "colstore", version, about)]
struct Cli {
    /// Field delimiter of the input files
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter, global = true)]
    delimiter: u8,

    /// Worker threads for the parallel hash join (defaults to one per core)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one or more relations
    Show {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Keep only rows where COLUMN OP VALUE holds
        #[arg(long = "where", num_args = 3, value_names = ["COLUMN", "OP", "VALUE"])]
        filter: Option<Vec<String>>,

        /// Columns to print, comma separated
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
    /// Join two relations and print the result
    Join {
        left: PathBuf,
        left_col: String,
        right: PathBuf,
        right_col: String,

        /// nested-loop, index-nested-loop, hash or parallel-hash
        #[arg(short, long, default_value = "hash")]
        algorithm: JoinAlgorithm,

        /// ==, !=, <, >, <= or >=, evaluated as `right OP left`
        #[arg(long, default_value = "==")]
        op: Comparison,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
        debug!("rayon pool sized to {threads} threads");
    }

    let mut store = ColumnStore::new();
    match cli.command {
        Command::Show {
            files,
            filter,
            columns,
        } => {
            for file in files {
                let relation = store.load(&file, cli.delimiter)?;
                let relation = match &filter {
                    Some(filter) => apply_filter(relation, filter)?,
                    None => relation.clone(),
                };
                let relation = if columns.is_empty() {
                    relation
                } else {
                    relation.scan(&columns)
                };
                println!("{}\n{relation}", relation.name);
            }
        }
        Command::Join {
            left,
            left_col,
            right,
            right_col,
            algorithm,
            op,
        } => {
            let left = store.load(&left, cli.delimiter)?.name.clone();
            let right = store.load(&right, cli.delimiter)?.name.clone();
            let joined = store.join(algorithm, &left, &left_col, &right, &right_col, op)?;
            println!("{joined}");
            println!("{} rows", joined.row_count());
        }
    }
    Ok(())
}

fn apply_filter(relation: &Relation, filter: &[String]) -> Result<Relation, Box<dyn Error>> {
    let [column, op, raw] = filter else {
        return Err("--where takes COLUMN OP VALUE".into());
    };
    let comparison: Comparison = op.parse()?;
    let data_type = relation
        .get_col(column)
        .map(|c| c.data_type())
        .ok_or_else(|| format!("relation '{}' has no column '{column}'", relation.name))?;
    let value = match data_type {
        DataType::Int => Value::Int(raw.parse()?),
        DataType::Float => Value::Float(raw.parse()?),
        DataType::Text => Value::from(raw.as_str()),
    };
    Ok(relation.select(column, comparison, &value)?)
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
    }
}
