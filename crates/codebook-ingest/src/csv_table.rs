use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use codebook_model::DataTable;

use crate::error::{LoadError, Result};

/// Delimiter used by the respondent data exports.
pub const DEFAULT_DELIMITER: u8 = b';';

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a delimited respondent data file. The first record is the header.
///
/// Blank lines and rows with only empty cells are skipped; short rows are
/// padded to the header width. Cells past the header width are dropped
/// with a warning.
pub fn read_data_table(path: &Path, delimiter: u8) -> Result<DataTable> {
    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    let mut table = DataTable::new(headers);
    let width = table.column_count();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.len() > width {
            warn!(
                path = %path.display(),
                line = record.position().map(csv::Position::line),
                cells = record.len(),
                columns = width,
                "row is wider than the header; extra cells dropped"
            );
        }
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        table.push_row(row);
    }
    debug!(
        path = %path.display(),
        columns = table.column_count(),
        rows = table.row_count(),
        "loaded data table"
    );
    Ok(table)
}
