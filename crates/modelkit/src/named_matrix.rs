//! Name-keyed matrix access and tabular import/export.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::dense_matrix::DenseMatrix;
use crate::error::{NameError, TableError};
use crate::index_set::NamedIndexSet;
use crate::indexed::{Indexed, Named};
use crate::table::{TableReport, TableSink, TableSource};

/// A [`DenseMatrix`] over named universes, adding name-keyed access and
/// row-major tabular interop.
///
/// Derefs to the inner matrix, so all index-keyed operations are available
/// directly.
#[derive(Debug, Clone)]
pub struct NamedMatrix<C: Indexed + Named, R: Indexed + Named> {
    matrix: DenseMatrix<C, R>,
    col_names: Arc<NamedIndexSet<C>>,
    row_names: Arc<NamedIndexSet<R>>,
}

impl<C: Indexed + Named, R: Indexed + Named> NamedMatrix<C, R> {
    #[must_use]
    pub fn new(cols: Arc<NamedIndexSet<C>>, rows: Arc<NamedIndexSet<R>>) -> Self {
        Self::with_initial(cols, rows, 0.0)
    }

    #[must_use]
    pub fn with_initial(
        cols: Arc<NamedIndexSet<C>>,
        rows: Arc<NamedIndexSet<R>>,
        initial: f64,
    ) -> Self {
        let matrix =
            DenseMatrix::with_initial(cols.index_set().clone(), rows.index_set().clone(), initial);
        Self {
            matrix,
            col_names: cols,
            row_names: rows,
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &Arc<NamedIndexSet<C>> {
        &self.col_names
    }

    #[must_use]
    pub fn row_names(&self) -> &Arc<NamedIndexSet<R>> {
        &self.row_names
    }

    /// Cell value by names; `None` when either name is unknown.
    #[must_use]
    pub fn get_named(&self, col: &str, row: &str) -> Option<f64> {
        let col = self.col_names.for_name(col)?;
        let row = self.row_names.for_name(row)?;
        Some(self.matrix.get(col, row))
    }

    /// Write a cell by names.
    pub fn put_named(&mut self, col: &str, row: &str, value: f64) -> Result<(), NameError> {
        let col = self
            .col_names
            .for_name(col)
            .ok_or_else(|| NameError::UnknownColumn(col.to_string()))?;
        let row = self
            .row_names
            .for_name(row)
            .ok_or_else(|| NameError::UnknownRow(row.to_string()))?;
        self.matrix.put(col, row, value);
        Ok(())
    }

    /// Import values from a row-major table.
    ///
    /// The header row carries column names (its first cell is the row-label
    /// column and is ignored); each data row leads with its row name. Blank
    /// cells leave the default in place, malformed numeric cells are
    /// skipped and counted, and names unknown to either universe are
    /// skipped. All of it lands in the returned [`TableReport`] rather than
    /// aborting the import.
    pub fn read_table<S: TableSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<TableReport, TableError> {
        let headers = source.headers()?;
        let mut report = TableReport::default();

        // Resolve header names to ordinal column positions once up front.
        let mut header_cols: Vec<Option<usize>> = vec![None; headers.len()];
        for (i, name) in headers.iter().enumerate().skip(1) {
            match self.col_names.name_position(name) {
                Some(position) => header_cols[i] = Some(position),
                None => report.unknown_columns.push(name.clone()),
            }
        }

        let mut seen_rows = vec![false; self.row_names.len()];
        while let Some(cells) = source.next_row()? {
            let Some(row_name) = cells.first() else {
                continue;
            };
            let Some(row_pos) = self.row_names.name_position(row_name) else {
                report.unknown_rows.push(row_name.clone());
                continue;
            };
            seen_rows[row_pos] = true;
            for (i, cell) in cells.iter().enumerate().skip(1) {
                let Some(col_pos) = header_cols.get(i).copied().flatten() else {
                    continue;
                };
                if cell.trim().is_empty() {
                    continue;
                }
                match cell.trim().parse::<f64>() {
                    Ok(value) => {
                        // Positions were resolved from these universes, so
                        // both lookups hold.
                        if let (Some(col), Some(row)) =
                            (self.col_names.get(col_pos), self.row_names.get(row_pos))
                        {
                            self.matrix.put(col, row, value);
                        }
                    }
                    Err(_) => report.malformed_cells += 1,
                }
            }
        }

        for (position, key) in self.col_names.iter().enumerate() {
            if !header_cols.contains(&Some(position)) {
                report.missing_columns.push(key.name().to_string());
            }
        }
        for (position, key) in self.row_names.iter().enumerate() {
            if !seen_rows[position] {
                report.missing_rows.push(key.name().to_string());
            }
        }
        Ok(report)
    }

    /// Export to the mirror tabular layout, with a trailing `Total` column
    /// and a trailing `Total` row (grand total in the corner).
    pub fn write_table<S: TableSink + ?Sized>(&self, sink: &mut S) -> Result<(), TableError> {
        let mut cells = Vec::with_capacity(self.col_names.len() + 2);

        cells.push(String::new());
        for col in self.col_names.iter() {
            cells.push(col.name().to_string());
        }
        cells.push("Total".to_string());
        sink.write_row(&cells)?;

        for row in self.row_names.iter() {
            cells.clear();
            cells.push(row.name().to_string());
            for col in self.col_names.iter() {
                cells.push(self.matrix.get(col, row).to_string());
            }
            cells.push(self.matrix.row_total(row).to_string());
            sink.write_row(&cells)?;
        }

        cells.clear();
        cells.push("Total".to_string());
        for col in self.col_names.iter() {
            cells.push(self.matrix.col_total(col).to_string());
        }
        cells.push(self.matrix.total().to_string());
        sink.write_row(&cells)
    }
}

impl<C: Indexed + Named, R: Indexed + Named> Deref for NamedMatrix<C, R> {
    type Target = DenseMatrix<C, R>;

    fn deref(&self) -> &Self::Target {
        &self.matrix
    }
}

impl<C: Indexed + Named, R: Indexed + Named> DerefMut for NamedMatrix<C, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.matrix
    }
}
