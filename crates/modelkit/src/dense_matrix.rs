//! Two-axis dense container over independent column and row universes.
//!
//! Mirrors the scalar container across two axes: direct index-addressed
//! cell writes in hot loops, lazily recomputed aggregates behind three
//! independent dirty flags: unweighted totals (grand plus one container
//! per axis, repopulated by a single shared scan), weighted totals, and
//! global extrema.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use crate::cache::CacheState;
use crate::dense_map::{DenseMap, DoubleMap};
use crate::error::ShapeError;
use crate::index_set::IndexSet;
use crate::indexed::Indexed;

#[derive(Debug, Clone, Default)]
struct AxisTotals {
    grand: f64,
    by_col: Vec<f64>,
    by_row: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Extrema {
    max: f64,
    min: f64,
    /// Ordinal (column, row) positions of the extreme cells.
    max_cell: Option<(usize, usize)>,
    min_cell: Option<(usize, usize)>,
}

/// Dense matrix of `f64` cells keyed by a column universe and a row
/// universe, with cached row/column totals and optional per-axis
/// weightings.
#[derive(Debug, Clone)]
pub struct DenseMatrix<C: Indexed, R: Indexed> {
    cols: Arc<IndexSet<C>>,
    rows: Arc<IndexSet<R>>,
    num_cols: usize,
    num_rows: usize,
    /// Column-major: cell (c, r) lives at `c.index() * num_rows + r.index()`.
    data: Vec<f64>,
    initial: f64,
    col_weightings: Option<DoubleMap<C>>,
    row_weightings: Option<DoubleMap<R>>,
    totals: RefCell<AxisTotals>,
    totals_state: Cell<CacheState>,
    weighted: RefCell<AxisTotals>,
    weighted_state: Cell<CacheState>,
    extrema: Cell<Extrema>,
    extrema_state: Cell<CacheState>,
}

impl<C: Indexed, R: Indexed> DenseMatrix<C, R> {
    #[must_use]
    pub fn new(cols: Arc<IndexSet<C>>, rows: Arc<IndexSet<R>>) -> Self {
        Self::with_initial(cols, rows, 0.0)
    }

    #[must_use]
    pub fn with_initial(cols: Arc<IndexSet<C>>, rows: Arc<IndexSet<R>>, initial: f64) -> Self {
        let num_cols = cols.capacity();
        let num_rows = rows.capacity();
        Self {
            cols,
            rows,
            num_cols,
            num_rows,
            data: vec![initial; num_cols * num_rows],
            initial,
            col_weightings: None,
            row_weightings: None,
            totals: RefCell::new(AxisTotals::default()),
            totals_state: Cell::new(CacheState::Dirty),
            weighted: RefCell::new(AxisTotals::default()),
            weighted_state: Cell::new(CacheState::Dirty),
            extrema: Cell::new(Extrema::default()),
            extrema_state: Cell::new(CacheState::Dirty),
        }
    }

    #[must_use]
    pub fn cols(&self) -> &Arc<IndexSet<C>> {
        &self.cols
    }

    #[must_use]
    pub fn rows(&self) -> &Arc<IndexSet<R>> {
        &self.rows
    }

    /// Allocated column slots (`col max_index + 1`).
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Allocated row slots (`row max_index + 1`).
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Total allocated cell count, the denominator of
    /// [`average`](Self::average).
    #[must_use]
    pub fn size(&self) -> usize {
        self.num_cols * self.num_rows
    }

    /// Column key at an ordinal position.
    #[must_use]
    pub fn col_key(&self, position: usize) -> Option<&C> {
        self.cols.get(position)
    }

    /// Row key at an ordinal position.
    #[must_use]
    pub fn row_key(&self, position: usize) -> Option<&R> {
        self.rows.get(position)
    }

    #[inline]
    fn cell(&self, col: &C, row: &R) -> usize {
        col.index() * self.num_rows + row.index()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, col: &C, row: &R) -> f64 {
        self.data[self.cell(col, row)]
    }

    /// Read by raw index values rather than keys.
    #[inline]
    #[must_use]
    pub fn get_at(&self, col_index: usize, row_index: usize) -> f64 {
        self.data[col_index * self.num_rows + row_index]
    }

    #[inline]
    pub fn put(&mut self, col: &C, row: &R, value: f64) {
        let cell = self.cell(col, row);
        self.data[cell] = value;
        self.mark_dirty();
    }

    /// Write by raw index values rather than keys.
    #[inline]
    pub fn put_at(&mut self, col_index: usize, row_index: usize, value: f64) {
        self.data[col_index * self.num_rows + row_index] = value;
        self.mark_dirty();
    }

    #[inline]
    pub fn add(&mut self, col: &C, row: &R, amount: f64) {
        let cell = self.cell(col, row);
        self.data[cell] += amount;
        self.mark_dirty();
    }

    #[inline]
    pub fn increment(&mut self, col: &C, row: &R) {
        self.add(col, row, 1.0);
    }

    /// Overwrite every cell from a row-major slice (row by row, one value
    /// per allocated column slot). The slice length must equal
    /// [`size`](Self::size).
    pub fn put_row_major(&mut self, values: &[f64]) -> Result<(), ShapeError> {
        if values.len() != self.data.len() {
            return Err(ShapeError::LengthMismatch {
                expected: self.data.len(),
                got: values.len(),
            });
        }
        for row in 0..self.num_rows {
            for col in 0..self.num_cols {
                self.data[col * self.num_rows + row] = values[row * self.num_cols + col];
            }
        }
        self.mark_dirty();
        Ok(())
    }

    /// Reset every cell to the initial value.
    pub fn clear(&mut self) {
        self.data.fill(self.initial);
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.totals_state.set(CacheState::Dirty);
        self.weighted_state.set(CacheState::Dirty);
        self.extrema_state.set(CacheState::Dirty);
    }

    /// One shared scan repopulates the grand total and both per-axis total
    /// containers.
    fn refresh_totals(&self) {
        let mut totals = AxisTotals {
            grand: 0.0,
            by_col: vec![0.0; self.num_cols],
            by_row: vec![0.0; self.num_rows],
        };
        for col in self.cols.iter() {
            for row in self.rows.iter() {
                let value = self.get(col, row);
                totals.by_col[col.index()] += value;
                totals.by_row[row.index()] += value;
                totals.grand += value;
            }
        }
        *self.totals.borrow_mut() = totals;
        self.totals_state.set(CacheState::Clean);
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        if self.totals_state.get().is_dirty() {
            self.refresh_totals();
        }
        self.totals.borrow().grand
    }

    #[must_use]
    pub fn row_total(&self, row: &R) -> f64 {
        if self.totals_state.get().is_dirty() {
            self.refresh_totals();
        }
        self.totals.borrow().by_row[row.index()]
    }

    #[must_use]
    pub fn col_total(&self, col: &C) -> f64 {
        if self.totals_state.get().is_dirty() {
            self.refresh_totals();
        }
        self.totals.borrow().by_col[col.index()]
    }

    #[must_use]
    pub fn average(&self) -> f64 {
        self.total() / self.size() as f64
    }

    /// Column total over allocated row slots.
    #[must_use]
    pub fn col_average(&self, col: &C) -> f64 {
        self.col_total(col) / self.num_rows as f64
    }

    /// Row total over allocated column slots.
    #[must_use]
    pub fn row_average(&self, row: &R) -> f64 {
        self.row_total(row) / self.num_cols as f64
    }

    /// Attach (replacing any previous) column weightings. Dirties only the
    /// weighted family; unweighted totals stay cached.
    pub fn set_column_weightings(&mut self, weightings: DoubleMap<C>) -> Result<(), ShapeError> {
        if weightings.len() != self.num_cols {
            return Err(ShapeError::UniverseMismatch {
                left: self.num_cols,
                right: weightings.len(),
            });
        }
        self.col_weightings = Some(weightings);
        self.weighted_state.set(CacheState::Dirty);
        Ok(())
    }

    /// Attach (replacing any previous) row weightings. Dirties only the
    /// weighted family.
    pub fn set_row_weightings(&mut self, weightings: DoubleMap<R>) -> Result<(), ShapeError> {
        if weightings.len() != self.num_rows {
            return Err(ShapeError::UniverseMismatch {
                left: self.num_rows,
                right: weightings.len(),
            });
        }
        self.row_weightings = Some(weightings);
        self.weighted_state.set(CacheState::Dirty);
        Ok(())
    }

    /// Detach column weightings; the axis weight reverts to 1.
    pub fn clear_column_weightings(&mut self) {
        self.col_weightings = None;
        self.weighted_state.set(CacheState::Dirty);
    }

    /// Detach row weightings; the axis weight reverts to 1.
    pub fn clear_row_weightings(&mut self) {
        self.row_weightings = None;
        self.weighted_state.set(CacheState::Dirty);
    }

    /// Each cell contributes `value * row_weight * col_weight`; an axis
    /// without a weighting attached weighs 1.
    fn refresh_weighted(&self) {
        let mut totals = AxisTotals {
            grand: 0.0,
            by_col: vec![0.0; self.num_cols],
            by_row: vec![0.0; self.num_rows],
        };
        for col in self.cols.iter() {
            let col_weight = self.col_weightings.as_ref().map_or(1.0, |w| w.get(col));
            for row in self.rows.iter() {
                let row_weight = self.row_weightings.as_ref().map_or(1.0, |w| w.get(row));
                let value = self.get(col, row) * row_weight * col_weight;
                totals.by_col[col.index()] += value;
                totals.by_row[row.index()] += value;
                totals.grand += value;
            }
        }
        *self.weighted.borrow_mut() = totals;
        self.weighted_state.set(CacheState::Clean);
    }

    #[must_use]
    pub fn weighted_row_total(&self, row: &R) -> f64 {
        if self.weighted_state.get().is_dirty() {
            self.refresh_weighted();
        }
        self.weighted.borrow().by_row[row.index()]
    }

    #[must_use]
    pub fn weighted_col_total(&self, col: &C) -> f64 {
        if self.weighted_state.get().is_dirty() {
            self.refresh_weighted();
        }
        self.weighted.borrow().by_col[col.index()]
    }

    /// Weighted row total normalised by the column-weighting mass; falls
    /// back to the plain row average when no column weighting is attached.
    #[must_use]
    pub fn weighted_row_average(&self, row: &R) -> f64 {
        match &self.col_weightings {
            Some(weightings) => self.weighted_row_total(row) / weightings.total(),
            None => self.row_average(row),
        }
    }

    /// Weighted column total normalised by the row-weighting mass; falls
    /// back to the plain column average when no row weighting is attached.
    #[must_use]
    pub fn weighted_col_average(&self, col: &C) -> f64 {
        match &self.row_weightings {
            Some(weightings) => self.weighted_col_total(col) / weightings.total(),
            None => self.col_average(col),
        }
    }

    /// Snapshot of all weighted column totals as an independent container.
    #[must_use]
    pub fn weighted_col_totals(&self) -> DoubleMap<C> {
        if self.weighted_state.get().is_dirty() {
            self.refresh_weighted();
        }
        let totals = self.weighted.borrow();
        let mut out = DenseMap::new(self.cols.clone());
        for col in self.cols.iter() {
            out.put(col, totals.by_col[col.index()]);
        }
        out
    }

    /// Snapshot of all weighted row totals as an independent container.
    #[must_use]
    pub fn weighted_row_totals(&self) -> DoubleMap<R> {
        if self.weighted_state.get().is_dirty() {
            self.refresh_weighted();
        }
        let totals = self.weighted.borrow();
        let mut out = DenseMap::new(self.rows.clone());
        for row in self.rows.iter() {
            out.put(row, totals.by_row[row.index()]);
        }
        out
    }

    fn refresh_extrema(&self) {
        let mut extrema = Extrema::default();
        for (col_pos, col) in self.cols.iter().enumerate() {
            for (row_pos, row) in self.rows.iter().enumerate() {
                let value = self.get(col, row);
                if extrema.max_cell.is_none() || value > extrema.max {
                    extrema.max = value;
                    extrema.max_cell = Some((col_pos, row_pos));
                }
                if extrema.min_cell.is_none() || value < extrema.min {
                    extrema.min = value;
                    extrema.min_cell = Some((col_pos, row_pos));
                }
            }
        }
        self.extrema.set(extrema);
        self.extrema_state.set(CacheState::Clean);
    }

    fn extrema(&self) -> Extrema {
        if self.extrema_state.get().is_dirty() {
            self.refresh_extrema();
        }
        self.extrema.get()
    }

    /// Largest cell value (0 for an empty matrix).
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.extrema().max
    }

    /// Smallest cell value (0 for an empty matrix).
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.extrema().min
    }

    /// Column of the first cell (scan order: columns outer, rows inner)
    /// achieving the maximum.
    #[must_use]
    pub fn max_col(&self) -> Option<&C> {
        self.extrema().max_cell.and_then(|(c, _)| self.cols.get(c))
    }

    #[must_use]
    pub fn max_row(&self) -> Option<&R> {
        self.extrema().max_cell.and_then(|(_, r)| self.rows.get(r))
    }

    #[must_use]
    pub fn min_col(&self) -> Option<&C> {
        self.extrema().min_cell.and_then(|(c, _)| self.cols.get(c))
    }

    #[must_use]
    pub fn min_row(&self) -> Option<&R> {
        self.extrema().min_cell.and_then(|(_, r)| self.rows.get(r))
    }

    fn check_shape(&self, other: &Self) -> Result<(), ShapeError> {
        if self.data.len() != other.data.len() || self.num_rows != other.num_rows {
            return Err(ShapeError::UniverseMismatch {
                left: self.data.len(),
                right: other.data.len(),
            });
        }
        Ok(())
    }

    /// Overwrite `target`'s member cells with this matrix's values.
    pub fn copy_into(&self, target: &mut Self) -> Result<(), ShapeError> {
        self.check_shape(target)?;
        for col in self.cols.iter() {
            for row in self.rows.iter() {
                target.put(col, row, self.get(col, row));
            }
        }
        Ok(())
    }

    /// Add this matrix's member cells into `target`.
    pub fn add_into(&self, target: &mut Self) -> Result<(), ShapeError> {
        self.check_shape(target)?;
        for col in self.cols.iter() {
            for row in self.rows.iter() {
                target.add(col, row, self.get(col, row));
            }
        }
        Ok(())
    }

    /// Extract a row as an independent scalar container, a snapshot rather
    /// than a view. Mutating it never affects the matrix.
    #[must_use]
    pub fn get_row(&self, row: &R) -> DoubleMap<C> {
        let mut out = DenseMap::new(self.cols.clone());
        for col in self.cols.iter() {
            out.put(col, self.get(col, row));
        }
        out
    }

    /// Extract a column as an independent scalar container, a snapshot
    /// rather than a view.
    #[must_use]
    pub fn get_column(&self, col: &C) -> DoubleMap<R> {
        let mut out = DenseMap::new(self.rows.clone());
        for row in self.rows.iter() {
            out.put(row, self.get(col, row));
        }
        out
    }

    /// Fresh matrix with the same axes and initial value, no data and no
    /// weightings.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self::with_initial(self.cols.clone(), self.rows.clone(), self.initial)
    }
}
