use std::{fmt, io::Read, path::Path, str::FromStr};

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{config::Settings, record::ProblemSolution};

pub const DEFAULT_INPUT: &str = "solve_times.csv";

/// Value of the flag column marking a row as an accepted run
pub const ACCEPTED_FLAG: i64 = 1;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid schema: {0}")]
    Schema(String),
    #[error("Line {line}: missing {column} at index {index}, row has {len} fields")]
    MissingField {
        line: u64,
        column: Column,
        index: usize,
        len: usize,
    },
    #[error("Line {line}: invalid {column} {value:?} at index {index}: {reason}")]
    InvalidField {
        line: u64,
        column: Column,
        index: usize,
        value: String,
        reason: String,
    },
    #[error("Line {line}: problem {name} has zero prize, ratio is undefined")]
    ZeroPrize { line: u64, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    NumNodes,
    SolutionTime,
    UpperBound,
    Prize,
    Accepted,
    Name,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::NumNodes,
        Column::SolutionTime,
        Column::UpperBound,
        Column::Prize,
        Column::Accepted,
        Column::Name,
    ];
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Column::NumNodes => "num_nodes",
            Column::SolutionTime => "solution_time",
            Column::UpperBound => "upper_bound",
            Column::Prize => "prize",
            Column::Accepted => "accepted",
            Column::Name => "name",
        };
        f.write_str(name)
    }
}

/// Zero-based position of every field in a data row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub num_nodes: usize,
    pub solution_time: usize,
    pub upper_bound: usize,
    pub prize: usize,
    pub accepted: usize,
    pub name: usize,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            solution_time: 1,
            upper_bound: 2,
            prize: 3,
            accepted: 4,
            name: 5,
        }
    }
}

impl Schema {
    pub fn index(&self, column: Column) -> usize {
        match column {
            Column::NumNodes => self.num_nodes,
            Column::SolutionTime => self.solution_time,
            Column::UpperBound => self.upper_bound,
            Column::Prize => self.prize,
            Column::Accepted => self.accepted,
            Column::Name => self.name,
        }
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        for (i, a) in Column::ALL.iter().enumerate() {
            for b in &Column::ALL[i + 1..] {
                if self.index(*a) == self.index(*b) {
                    return Err(LoadError::Schema(format!(
                        "{a} and {b} both map to index {}",
                        self.index(*a)
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Reads the whole file, then parses it with [`load_from_reader`]
pub async fn load(path: &Path, settings: &Settings) -> Result<Vec<ProblemSolution>, LoadError> {
    let data = tokio::fs::read(path).await?;
    debug!("Read {} bytes from {path:?}", data.len());
    load_from_reader(data.as_slice(), settings)
}

/// Parses benchmark rows, skipping the header and every row not flagged as accepted
pub fn load_from_reader<R: Read>(
    mut reader: R,
    settings: &Settings,
) -> Result<Vec<ProblemSolution>, LoadError> {
    let schema = &settings.schema;
    schema.validate()?;

    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    let blank_line = first_blank_line(&data);
    let blank_row = |line| LoadError::MissingField {
        line,
        column: Column::Accepted,
        index: schema.accepted,
        len: 0,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_slice());

    let mut records = Vec::new();
    let mut skipped = 0;
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if let Some(blank) = blank_line
            && line > blank
        {
            return Err(blank_row(blank));
        }
        let row = Row {
            record: &row,
            line,
            schema,
        };

        if !row.accepted()? {
            skipped += 1;
            continue;
        }

        let name = row.field(Column::Name)?.to_owned();
        let num_nodes = row.parse(Column::NumNodes)?;
        let solution_time = row.parse(Column::SolutionTime)?;
        let upper_bound = row.parse(Column::UpperBound)?;
        let prize: f64 = row.parse(Column::Prize)?;
        if prize == 0.0 {
            return Err(LoadError::ZeroPrize { line, name });
        }

        let solution = ProblemSolution::new(name, num_nodes, solution_time, upper_bound, prize);
        if let Some(warning) = solution.bound_warning(settings.ratio_bound) {
            warn!("{warning}");
        }
        records.push(solution);
    }

    if let Some(blank) = blank_line {
        return Err(blank_row(blank));
    }

    debug!("Loaded {} records, skipped {skipped}", records.len());
    Ok(records)
}

/// First empty line after the header, outside quotes. The csv reader skips these silently
fn first_blank_line(data: &[u8]) -> Option<u64> {
    let mut line = 1;
    let mut line_start = true;
    let mut in_quotes = false;
    let mut seen_row = false;
    for (i, &b) in data.iter().enumerate() {
        if line_start && !in_quotes {
            let rest = &data[i..];
            if rest.starts_with(b"\n") || rest.starts_with(b"\r\n") {
                if seen_row {
                    return Some(line);
                }
            } else {
                seen_row = true;
            }
        }
        line_start = false;
        match b {
            b'"' => in_quotes = !in_quotes,
            b'\n' => {
                line += 1;
                line_start = true;
            }
            _ => {}
        }
    }
    None
}

struct Row<'a> {
    record: &'a StringRecord,
    line: u64,
    schema: &'a Schema,
}

impl<'a> Row<'a> {
    fn field(&self, column: Column) -> Result<&'a str, LoadError> {
        let index = self.schema.index(column);
        self.record.get(index).ok_or(LoadError::MissingField {
            line: self.line,
            column,
            index,
            len: self.record.len(),
        })
    }

    fn parse<T>(&self, column: Column) -> Result<T, LoadError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = self.field(column)?;
        value
            .trim()
            .parse()
            .map_err(|e: T::Err| self.invalid(column, value, e.to_string()))
    }

    /// Any integer is a valid flag, only [`ACCEPTED_FLAG`] accepts the row
    fn accepted(&self) -> Result<bool, LoadError> {
        let value = self.field(Column::Accepted)?;
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.invalid(Column::Accepted, value, "not an integer".to_owned()));
        }
        Ok(trimmed.parse::<i64>().is_ok_and(|flag| flag == ACCEPTED_FLAG))
    }

    fn invalid(&self, column: Column, value: &str, reason: String) -> LoadError {
        LoadError::InvalidField {
            line: self.line,
            column,
            index: self.schema.index(column),
            value: value.to_owned(),
            reason,
        }
    }
}
