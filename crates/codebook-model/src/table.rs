use serde::{Deserialize, Serialize};

/// Respondent data as loaded from a delimited file.
///
/// Cells are kept as trimmed text; interpretation is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Values of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(move |row| row.get(idx).map(String::as_str).unwrap_or("")),
        )
    }
}
