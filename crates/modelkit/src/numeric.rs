//! Scalar payloads storable in dense containers.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// The closed set of scalar types a container can hold.
///
/// Floating-point containers hold probability mass, scores, and rates;
/// integer containers hold typed population counts. Both share the same
/// aggregate machinery, which only needs zero/one constants, arithmetic,
/// ordering, and a lossy-but-adequate conversion to `f64` for averages and
/// roulette thresholds.
pub trait Numeric:
    Copy
    + PartialEq
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    fn to_f64(self) -> f64;
}

impl Numeric for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

impl Numeric for i64 {
    const ZERO: Self = 0;
    const ONE: Self = 1;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}
