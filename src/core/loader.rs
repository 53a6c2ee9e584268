//! Delimited-text loader.
//!
//! Cells are typed per column the way a dataframe reader would: a column
//! whose non-empty cells are all numeric becomes JSON numbers, anything else
//! stays text. Empty cells become `null`.

use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};
use serde_json::{Number, Value};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy)]
pub struct LoaderOptions {
    pub delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Text,
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind = ColumnKind::Integer;
    for cell in cells {
        let cell = cell.trim();
        if cell.is_empty() || cell.parse::<i64>().is_ok() {
            continue;
        }
        match cell.parse::<f64>() {
            Ok(v) if v.is_finite() => kind = ColumnKind::Float,
            _ => return ColumnKind::Text,
        }
    }
    kind
}

fn to_value(cell: &str, kind: ColumnKind) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match kind {
        ColumnKind::Text => Value::String(cell.to_string()),
        ColumnKind::Integer | ColumnKind::Float => {
            let trimmed = cell.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                Value::from(i)
            } else {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
    }
}

/// Repeated column names keep the first column under the plain name and
/// suffix later copies: `Gmail`, `Gmail.1`, `Gmail.2`.
fn dedup_headers(raw: &csv::StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    raw.iter()
        .map(|name| {
            let mut candidate = name.to_string();
            let mut n = 1;
            while seen.contains(&candidate) {
                candidate = format!("{}.{}", name, n);
                n += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// Parses a header row plus data rows into records, in file order.
pub fn load_records(bytes: &[u8], options: &LoaderOptions) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(bytes);

    let headers = dedup_headers(reader.headers()?);
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(EtlError::MissingHeader);
    }

    let rows = reader
        .records()
        .collect::<std::result::Result<Vec<csv::StringRecord>, csv::Error>>()?;

    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|i| infer_kind(rows.iter().map(|row| row.get(i).unwrap_or(""))))
        .collect();
    tracing::debug!("Read {} columns, {} data rows", headers.len(), rows.len());

    let records = rows
        .iter()
        .map(|row| {
            let data: HashMap<String, Value> = headers
                .iter()
                .zip(kinds.iter())
                .zip(row.iter())
                .map(|((header, kind), cell)| (header.clone(), to_value(cell, *kind)))
                .collect();
            Record { data }
        })
        .collect();

    Ok(records)
}
