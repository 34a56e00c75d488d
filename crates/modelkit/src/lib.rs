//! Indexed numeric containers for agent-based simulation
//!
//! This crate provides the dense, array-backed associative structures that
//! simulation hot loops are built on:
//! - Immutable key universes ([`IndexSet`], [`NamedIndexSet`]) whose keys
//!   carry a stable small-integer identity
//! - Scalar containers ([`DoubleMap`], [`IntMap`]) with lazily cached
//!   totals, averages, and extrema
//! - A two-axis matrix ([`DenseMatrix`], [`NamedMatrix`]) with row/column
//!   totals, optional per-axis weightings, and tabular import/export
//! - Roulette-wheel sampling against an injected [`RandomService`]
//! - Config-layer descriptors for stochastic quantities ([`Distribution`])
//!   and deterministic response curves ([`Curve`])
//!
//! The point of these structures is to avoid general-purpose key/value
//! overhead where a fixed universe of typed keys is known up front: every
//! read and write is one array access, and derived statistics are paid for
//! once per mutation burst rather than per update.
//!
//! ```
//! use std::sync::Arc;
//! use modelkit::{DoubleMap, IndexSet, Indexed};
//!
//! #[derive(Debug, Clone, Copy)]
//! enum Household { Poor, Median, Wealthy }
//!
//! impl Indexed for Household {
//!     fn index(&self) -> usize { *self as usize }
//! }
//!
//! let types = IndexSet::shared([Household::Poor, Household::Median, Household::Wealthy])
//!     .expect("unique indices");
//! let mut wealth = DoubleMap::new(types);
//! wealth.put(&Household::Poor, 1_000.0);
//! wealth.put(&Household::Wealthy, 90_000.0);
//! assert_eq!(wealth.total(), 91_000.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod dense_map;
pub mod dense_matrix;
pub mod error;
pub mod index_set;
pub mod indexed;
pub mod named_matrix;
pub mod numeric;
pub mod random;
pub mod table;

// ============================================================================
// Collaborator-facing modules
// ============================================================================

pub mod curve;
pub mod distribution;
pub mod stats;

mod cache;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use curve::{Breakpoint, Curve, LinearInterpolator};
pub use dense_map::{DEFAULT_THRESHOLD, DenseMap, DoubleMap, IntMap};
pub use dense_matrix::DenseMatrix;
pub use distribution::Distribution;
pub use index_set::{IndexSet, NamedIndexSet};
pub use indexed::{Indexed, Named};
pub use named_matrix::NamedMatrix;
pub use numeric::Numeric;
pub use random::RandomService;
pub use table::{MemoryTable, TableReport, TableSink, TableSource};
