use crate::process::reader::TextEncoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Column names from the header row, as the vendor wrote them (duplicates suffixed `.N`).
    pub headers: Vec<String>,
    /// Each data row, padded so every row has exactly `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
    /// The encoding the file was successfully decoded with.
    pub encoding: TextEncoding,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (`row`, `col`); empty when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Suffix repeated header names with `.1`, `.2`, … so every column name is distinct.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());
    for h in headers {
        let mut candidate = h.clone();
        let mut n = 0;
        while seen.contains(&candidate) {
            n += 1;
            candidate = format!("{}.{}", h, n);
        }
        seen.push(candidate);
    }
    seen
}
