#![deny(unsafe_code)]

use std::collections::BTreeMap;

/// An ordered, text-valued table as read from a delimited export.
///
/// Columns keep the order they were read in; every row holds exactly one
/// cell per column. No type coercion happens here: cells stay text until a
/// processing step explicitly parses them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from columns and rows, squaring every row to the
    /// column count (short rows are padded with empty cells, long rows
    /// truncated).
    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Append a row, squared to the column count.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    pub fn set_cell(&mut self, row: usize, column: usize, value: String) {
        if let Some(cells) = self.rows.get_mut(row)
            && let Some(cell) = cells.get_mut(column)
        {
            *cell = value;
        }
    }

    /// Append a column at the end, squared to the row count.
    pub fn append_column(&mut self, name: String, mut values: Vec<String>) {
        values.resize(self.rows.len(), String::new());
        self.columns.push(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    pub fn rename_column(&mut self, column: usize, name: String) {
        if let Some(slot) = self.columns.get_mut(column) {
            *slot = name;
        }
    }

    /// Remove the columns at the given positions. Positions refer to the
    /// layout before the call; duplicates are ignored.
    pub fn remove_columns(&mut self, positions: &[usize]) {
        let mut sorted: Vec<usize> = positions
            .iter()
            .copied()
            .filter(|&p| p < self.columns.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        for &position in sorted.iter().rev() {
            self.columns.remove(position);
            for row in &mut self.rows {
                row.remove(position);
            }
        }
    }

    /// Position of the column with exactly this name.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Case-insensitive column-name lookup, built once per table.
///
/// Replaces repeated linear header scans; when two columns share a
/// lower-cased name the first occurrence wins. The index is a snapshot:
/// rebuild it after any structural mutation of the table.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    by_lower: BTreeMap<String, usize>,
}

impl ColumnIndex {
    pub fn new(table: &Table) -> Self {
        let mut by_lower = BTreeMap::new();
        for (position, name) in table.columns.iter().enumerate() {
            by_lower.entry(name.to_lowercase()).or_insert(position);
        }
        Self { by_lower }
    }

    /// Resolve a column name case-insensitively to its position.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.by_lower.get(&name.to_lowercase()).copied()
    }
}
