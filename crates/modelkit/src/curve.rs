//! Deterministic response curves for model configuration.
//!
//! Where [`Distribution`](crate::distribution::Distribution) describes a
//! stochastic quantity, a [`Curve`] describes a deterministic response to a
//! scalar input (time, distance, a competitiveness score). Configs carry
//! the descriptor; evaluation is pure arithmetic, so degenerate parameters
//! yield non-finite values rather than errors.

use serde::{Deserialize, Serialize};

/// A deterministic function of one scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    /// Always yields `value`.
    Constant { value: f64 },
    /// Yields the input unchanged.
    Identity,
    /// `intercept + slope * x`.
    Linear { intercept: f64, slope: f64 },
    /// `x ^ exponent`.
    Power { exponent: f64 },
    /// `asymptote + scale * exp(rate * x)`.
    Exponential { asymptote: f64, scale: f64, rate: f64 },
    /// `a * (x - c)^p / (h^p + |(x - c)^p|) + d`, reaching half the
    /// asymptote at `x = c + h`. Even powers keep the output non-negative.
    /// With `normalise` and a non-zero `y_shift`, output is rescaled to
    /// `[-1, 1]` while keeping the turning point at the shift level.
    Sigmoid {
        asymptote: f64,
        half_point: f64,
        power: f64,
        x_shift: f64,
        y_shift: f64,
        normalise: bool,
    },
    /// Generalised logistic (Richards) curve
    /// `lower + (upper - lower) / (1 + q * exp(-rate * (x - midpoint)))^(1/v)`.
    Logistic {
        upper: f64,
        lower: f64,
        q: f64,
        rate: f64,
        midpoint: f64,
        v: f64,
    },
    /// Piecewise-linear interpolation between breakpoints.
    Interpolated(LinearInterpolator),
}

impl Curve {
    /// Simple logistic with `lower = 0`, `q = 0.5`, `v = 0.5`: give it a
    /// ceiling, a growth rate, and the time of maximum growth.
    #[must_use]
    pub fn logistic(upper: f64, rate: f64, midpoint: f64) -> Self {
        Curve::Logistic {
            upper,
            lower: 0.0,
            q: 0.5,
            rate,
            midpoint,
            v: 0.5,
        }
    }

    /// Evaluate the curve at `position`.
    #[must_use]
    pub fn value(&self, position: f64) -> f64 {
        match self {
            Curve::Constant { value } => *value,
            Curve::Identity => position,
            Curve::Linear { intercept, slope } => intercept + slope * position,
            Curve::Power { exponent } => position.powf(*exponent),
            Curve::Exponential {
                asymptote,
                scale,
                rate,
            } => asymptote + scale * (rate * position).exp(),
            Curve::Sigmoid {
                asymptote,
                half_point,
                power,
                x_shift,
                y_shift,
                normalise,
            } => {
                let shifted = (position - x_shift).powf(*power);
                let raw =
                    asymptote * shifted / (half_point.powf(*power) + shifted.abs()) + y_shift;
                if *y_shift != 0.0 && *normalise {
                    let span = if raw < *y_shift {
                        1.0 + y_shift
                    } else {
                        1.0 - y_shift
                    };
                    y_shift + (raw - y_shift) * span
                } else {
                    raw
                }
            }
            Curve::Logistic {
                upper,
                lower,
                q,
                rate,
                midpoint,
                v,
            } => {
                lower
                    + (upper - lower)
                        / (1.0 + q * (-rate * (position - midpoint)).exp()).powf(1.0 / v)
            }
            Curve::Interpolated(interpolator) => interpolator.value(position),
        }
    }
}

/// One `(position, level)` anchor of a [`LinearInterpolator`]. Ordering is
/// by position only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub position: f64,
    pub level: f64,
}

/// Piecewise-linear curve through a sorted set of breakpoints.
///
/// Sampling before the first breakpoint returns the first level and
/// sampling after the last returns the last level; the ends extend
/// horizontally. An empty interpolator evaluates to 0 everywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearInterpolator {
    breakpoints: Vec<Breakpoint>,
}

impl LinearInterpolator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpolator through the given `(position, level)` points.
    #[must_use]
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let mut interpolator = Self::new();
        for (position, level) in points {
            interpolator.add_point(*position, *level);
        }
        interpolator
    }

    /// Insert a breakpoint, keeping the set sorted by position. A point at
    /// an already-registered position is ignored.
    pub fn add_point(&mut self, position: f64, level: f64) {
        match self
            .breakpoints
            .binary_search_by(|bp| bp.position.total_cmp(&position))
        {
            Ok(_) => {}
            Err(i) => self.breakpoints.insert(i, Breakpoint { position, level }),
        }
    }

    /// Breakpoints in position order.
    #[must_use]
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Evaluate at `position`.
    #[must_use]
    pub fn value(&self, position: f64) -> f64 {
        let Some(first) = self.breakpoints.first() else {
            return 0.0;
        };
        if position < first.position {
            return first.level;
        }
        for pair in self.breakpoints.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if next.position > position {
                let fraction =
                    (position - previous.position) / (next.position - previous.position);
                return previous.level + fraction * (next.level - previous.level);
            }
        }
        self.breakpoints.last().map_or(0.0, |bp| bp.level)
    }
}
