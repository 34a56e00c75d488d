//! Tabular reader/writer boundary used by the named matrix.
//!
//! The core owns no file format. Persistence collaborators adapt whatever
//! they read (CSV, spreadsheets, database rows) to [`TableSource`] and
//! accept output through [`TableSink`]; [`MemoryTable`] is the in-crate
//! implementation for collaborators that already hold rows in memory, and
//! for tests.

use crate::error::TableError;

/// Row-major tabular input: one header row of column names, then data rows
/// whose first cell is the row name.
pub trait TableSource {
    fn headers(&mut self) -> Result<Vec<String>, TableError>;

    /// Next data row, or `None` when exhausted.
    fn next_row(&mut self) -> Result<Option<Vec<String>>, TableError>;
}

/// Row-major tabular output.
pub trait TableSink {
    fn write_row(&mut self, cells: &[String]) -> Result<(), TableError>;
}

/// Warnings accumulated while importing a table into a named matrix.
///
/// None of these abort the import: unknown names are skipped, malformed
/// numeric cells are dropped, and missing names simply leave defaults in
/// place. The caller decides whether any of it matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableReport {
    /// Row names present in the source but not in the row universe.
    pub unknown_rows: Vec<String>,
    /// Header names present in the source but not in the column universe.
    pub unknown_columns: Vec<String>,
    /// Row universe members the source never mentioned.
    pub missing_rows: Vec<String>,
    /// Column universe members the source never mentioned.
    pub missing_columns: Vec<String>,
    /// Non-blank cells that failed to parse as numbers.
    pub malformed_cells: usize,
}

impl TableReport {
    /// True when the import matched the matrix exactly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unknown_rows.is_empty()
            && self.unknown_columns.is_empty()
            && self.missing_rows.is_empty()
            && self.missing_columns.is_empty()
            && self.malformed_cells == 0
    }
}

/// In-memory table, usable as both source and sink.
///
/// As a sink, the first written row becomes the header and subsequent rows
/// become data rows. As a source it replays them; [`reset`](Self::reset)
/// rewinds for another pass.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    cursor: usize,
}

impl MemoryTable {
    #[must_use]
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            header,
            rows,
            cursor: 0,
        }
    }

    /// Convenience constructor from string literals.
    #[must_use]
    pub fn from_rows(header: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            header.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Rewind the source cursor to the first data row.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl TableSource for MemoryTable {
    fn headers(&mut self) -> Result<Vec<String>, TableError> {
        Ok(self.header.clone())
    }

    fn next_row(&mut self) -> Result<Option<Vec<String>>, TableError> {
        let row = self.rows.get(self.cursor).cloned();
        if row.is_some() {
            self.cursor += 1;
        }
        Ok(row)
    }
}

impl TableSink for MemoryTable {
    fn write_row(&mut self, cells: &[String]) -> Result<(), TableError> {
        if self.header.is_empty() && self.rows.is_empty() {
            self.header = cells.to_vec();
        } else {
            self.rows.push(cells.to_vec());
        }
        Ok(())
    }
}
