use std::fmt;

/// Errors raised while building a key universe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSetError {
    /// Two keys supplied to one universe reported the same index
    DuplicateIndex { index: usize },
}

impl fmt::Display for IndexSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSetError::DuplicateIndex { index } => {
                write!(f, "two keys in one index set share index {index}")
            }
        }
    }
}

impl std::error::Error for IndexSetError {}

/// Errors raised when combining containers or loading raw arrays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Two containers built over universes of different capacity were combined
    UniverseMismatch { left: usize, right: usize },
    /// A raw slice disagreed with the container's allocated capacity
    LengthMismatch { expected: usize, got: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::UniverseMismatch { left, right } => {
                write!(
                    f,
                    "containers cover different universes ({left} vs {right} slots)"
                )
            }
            ShapeError::LengthMismatch { expected, got } => {
                write!(f, "expected {expected} values, got {got}")
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// Errors raised by name-keyed matrix access
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    UnknownColumn(String),
    UnknownRow(String),
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::UnknownColumn(name) => write!(f, "unknown column {name:?}"),
            NameError::UnknownRow(name) => write!(f, "unknown row {name:?}"),
        }
    }
}

impl std::error::Error for NameError {}

/// Errors raised by tabular sources and sinks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    Read(String),
    Write(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Read(msg) => write!(f, "table read failed: {msg}"),
            TableError::Write(msg) => write!(f, "table write failed: {msg}"),
        }
    }
}

impl std::error::Error for TableError {}

/// Errors raised when sampling a parameterised distribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionError {
    InvalidParameters {
        distribution: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for DistributionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionError::InvalidParameters {
                distribution,
                reason,
            } => {
                write!(f, "invalid {distribution} parameters: {reason}")
            }
        }
    }
}

impl std::error::Error for DistributionError {}
