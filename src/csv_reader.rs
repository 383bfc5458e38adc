// CSV input for the command line tool

use anyhow::{anyhow, Context, Result};
use std::io::{self, Read};

/// Raw CSV table: header names plus string cells
#[derive(Debug, Clone, PartialEq)]
pub struct CsvData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// How a column is referred to on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSelector {
    /// Header name, matched case-insensitively
    Name(String),
    /// 1-based position
    Index(usize),
}

/// Read CSV (with a header row) from stdin
pub fn read_csv_from_stdin() -> Result<CsvData> {
    read_csv(io::stdin().lock())
}

/// Read CSV (with a header row) from any reader
pub fn read_csv<R: Read>(reader: R) -> Result<CsvData> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV row {}", i + 1))?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(CsvData { headers, rows })
}

/// A purely numeric selector is a 1-based index, anything else a name
pub fn parse_column_selector(selector: &str) -> ColumnSelector {
    match selector.parse::<usize>() {
        Ok(index) => ColumnSelector::Index(index),
        Err(_) => ColumnSelector::Name(selector.to_string()),
    }
}

/// Extract one column as numbers, returning the header name with it
pub fn extract_column(data: &CsvData, selector: ColumnSelector) -> Result<(String, Vec<f64>)> {
    let index = match &selector {
        ColumnSelector::Name(name) => data
            .headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("Column '{}' not found", name))?,
        ColumnSelector::Index(0) => anyhow::bail!("Column indices start at 1"),
        ColumnSelector::Index(i) if *i > data.headers.len() => anyhow::bail!(
            "Column index {} out of range (CSV has {} columns)",
            i,
            data.headers.len()
        ),
        ColumnSelector::Index(i) => i - 1,
    };

    let name = data.headers[index].clone();
    let values = data
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let cell = row.get(index).map(String::as_str).unwrap_or("");
            cell.parse::<f64>().with_context(|| {
                format!(
                    "Failed to parse '{}' as number in column '{}' at row {}",
                    cell,
                    name,
                    row_idx + 1
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((name, values))
}
