//! In-memory tabular projection of a worksheet.
//!
//! DESIGN
//! ======
//! A `Table` is a header row of column names plus rows of string cells.
//! Every row is kept exactly as wide as the header. Remote reads, uploaded
//! workbooks and new partner records all pass through this type, so
//! concatenation is the only merge operation: it aligns columns by name
//! and never sorts or deduplicates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Empty table with the given header.
    #[must_use]
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { columns: columns.into_iter().map(Into::into).collect(), rows: Vec::new() }
    }

    /// Build a table from a header and rows. Short rows are padded with
    /// empty cells; cells beyond the header width are dropped.
    #[must_use]
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self { columns, rows: Vec::with_capacity(rows.len()) };
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Interpret a raw grid whose first row is the header.
    #[must_use]
    pub fn from_grid(grid: Vec<Vec<String>>) -> Self {
        let mut rows = grid.into_iter();
        let Some(columns) = rows.next() else {
            return Self::default();
        };
        Self::from_rows(columns, rows.collect())
    }

    /// Header row followed by data rows.
    #[must_use]
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(self.columns.clone());
        grid.extend(self.rows.iter().cloned());
        grid
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (the header is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// Append `other` below `self`.
    ///
    /// The result keeps `self`'s columns in order, then any columns only
    /// `other` has. Cells a side does not have are left empty.
    #[must_use]
    pub fn concat(self, other: Table) -> Table {
        let Self { mut columns, rows } = self;

        let positions: Vec<usize> = other
            .columns
            .iter()
            .map(|name| match columns.iter().position(|c| c == name) {
                Some(index) => index,
                None => {
                    columns.push(name.clone());
                    columns.len() - 1
                }
            })
            .collect();

        let width = columns.len();
        let mut merged = Vec::with_capacity(rows.len() + other.rows.len());
        for mut row in rows {
            row.resize(width, String::new());
            merged.push(row);
        }
        for row in other.rows {
            let mut aligned = vec![String::new(); width];
            for (cell, &position) in row.into_iter().zip(&positions) {
                aligned[position] = cell;
            }
            merged.push(aligned);
        }

        Table { columns, rows: merged }
    }

    /// Whether some row carries every `(column, value)` pair. A column the
    /// table lacks only matches an empty value.
    #[must_use]
    pub fn contains_row(&self, cells: &[(&str, &str)]) -> bool {
        let lookups: Vec<(Option<usize>, &str)> = cells
            .iter()
            .map(|(name, value)| (self.columns.iter().position(|c| c == name), *value))
            .collect();

        self.rows.iter().any(|row| {
            lookups.iter().all(|(position, value)| match position {
                Some(index) => row.get(*index).map_or("", String::as_str) == *value,
                None => value.is_empty(),
            })
        })
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
