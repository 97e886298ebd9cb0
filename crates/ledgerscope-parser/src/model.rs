use indexmap::IndexMap;

use crate::errors::ParseWarning;

/// One data line keyed by header name. Cells missing from the line hold `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: IndexMap<String, String>,
}

impl Row {
    /// Zips `values` positionally against `headers`. Extra values are dropped
    /// and missing ones default to the empty string. With duplicate headers the
    /// later value wins while the key keeps its first position.
    pub fn from_fields(headers: &[String], values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        let mut cells = IndexMap::with_capacity(headers.len());
        for header in headers {
            cells.insert(header.clone(), values.next().unwrap_or_default());
        }
        Self { cells }
    }

    pub fn get(&self, header: &str) -> &str {
        self.cells.get(header).map(String::as_str).unwrap_or("")
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|value| value.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(header, value)| (header.as_str(), value.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `row` for `header`, or `None` when the row index is out of range.
    pub fn value(&self, row: usize, header: &str) -> Option<&str> {
        self.rows.get(row).map(|r| r.get(header))
    }

    /// Every row's value for `header`, in row order.
    pub fn column_values<'a>(&'a self, header: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows.iter().map(move |row| row.get(header))
    }
}

#[derive(Debug, Clone)]
pub struct ParsedDataset {
    pub dataset: Dataset,
    pub warnings: Vec<ParseWarning>,
}
