//! Integration tests for the container subsystem
//!
//! Tests are organised by topic:
//! - `containers` - Scalar container semantics and cached aggregates
//! - `consume` - Drawing units from typed populations without replacement
//! - `matrix` - Two-axis totals, weightings, and extraction
//! - `named` - Name-keyed access and tabular import/export
//! - `sampling` - Roulette-wheel draws against the random service

mod matrix;
mod sampling;

use std::sync::Arc;

use crate::index_set::{IndexSet, NamedIndexSet};
use crate::indexed::{Indexed, Named};
use crate::random::RandomService;

/// Five-key universe standing in for "household types".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Col {
    A,
    B,
    C,
    D,
    E,
}

impl Indexed for Col {
    fn index(&self) -> usize {
        *self as usize
    }
}

impl Named for Col {
    fn name(&self) -> &str {
        match self {
            Col::A => "A",
            Col::B => "B",
            Col::C => "C",
            Col::D => "D",
            Col::E => "E",
        }
    }
}

pub(crate) const COLS: [Col; 5] = [Col::A, Col::B, Col::C, Col::D, Col::E];
pub(crate) const FOUR_COLS: [Col; 4] = [Col::A, Col::B, Col::C, Col::D];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Row {
    X,
    Y,
    Z,
}

impl Indexed for Row {
    fn index(&self) -> usize {
        *self as usize
    }
}

impl Named for Row {
    fn name(&self) -> &str {
        match self {
            Row::X => "X",
            Row::Y => "Y",
            Row::Z => "Z",
        }
    }
}

pub(crate) const ROWS: [Row; 3] = [Row::X, Row::Y, Row::Z];

pub(crate) fn cols() -> Arc<IndexSet<Col>> {
    IndexSet::shared(COLS).unwrap()
}

pub(crate) fn four_cols() -> Arc<IndexSet<Col>> {
    IndexSet::shared(FOUR_COLS).unwrap()
}

pub(crate) fn rows() -> Arc<IndexSet<Row>> {
    IndexSet::shared(ROWS).unwrap()
}

pub(crate) fn named_four_cols() -> Arc<NamedIndexSet<Col>> {
    NamedIndexSet::shared(FOUR_COLS).unwrap()
}

pub(crate) fn named_rows() -> Arc<NamedIndexSet<Row>> {
    NamedIndexSet::shared(ROWS).unwrap()
}

/// Random service that replays scripted draws, for deterministic
/// roulette-wheel assertions.
pub(crate) struct ScriptedDraws {
    uniform: Vec<f64>,
    ints: Vec<i64>,
    next_uniform: usize,
    next_int: usize,
}

impl ScriptedDraws {
    pub(crate) fn uniform(draws: &[f64]) -> Self {
        Self {
            uniform: draws.to_vec(),
            ints: Vec::new(),
            next_uniform: 0,
            next_int: 0,
        }
    }

    pub(crate) fn ints(draws: &[i64]) -> Self {
        Self {
            uniform: Vec::new(),
            ints: draws.to_vec(),
            next_uniform: 0,
            next_int: 0,
        }
    }
}

impl RandomService for ScriptedDraws {
    fn uniform01(&mut self) -> f64 {
        let draw = self.uniform[self.next_uniform];
        self.next_uniform += 1;
        draw
    }

    fn int_range(&mut self, lo: i64, hi: i64) -> i64 {
        let draw = self.ints[self.next_int];
        self.next_int += 1;
        assert!((lo..=hi).contains(&draw), "scripted draw outside range");
        draw
    }
}
