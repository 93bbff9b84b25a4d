//! In-memory rectangular text table, the shape of a delimited file before
//! any typing is applied.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RawTable { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn with_first_header(mut self, label: &str) -> RawTable {
        if let Some(first) = self.headers.first_mut() {
            *first = label.to_string();
        }
        self
    }

    /// Swap rows and columns. The header row is treated as row zero, so the
    /// first column of the input becomes the header row of the output.
    /// Short rows are padded with empty cells.
    pub fn transpose(&self) -> RawTable {
        let width = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        let mut columns: Vec<Vec<String>> = Vec::with_capacity(width);
        for col in 0..width {
            let column: Vec<String> = std::iter::once(&self.headers)
                .chain(self.rows.iter())
                .map(|row| row.get(col).cloned().unwrap_or_default())
                .collect();
            columns.push(column);
        }

        let mut iter = columns.into_iter();
        let headers = iter.next().unwrap_or_default();
        RawTable {
            headers,
            rows: iter.collect(),
        }
    }
}
