use thiserror::Error;

use crate::value::ColumnType;

/// Errors that can occur when creating or mutating columns and tables.
///
/// Multi-step operations (row insertion, joins) do not roll back already
/// completed sub-steps; on error the table may be partially updated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("column type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ColumnType,
        found: ColumnType,
    },
    #[error("operand length mismatch: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },
    #[error("column '{name}' already exists")]
    DuplicateColumn { name: String },
    #[error("column '{name}' not found")]
    ColumnNotFound { name: String },
    #[error("{operation} is not defined for {column_type} columns")]
    NonNumericColumn {
        operation: &'static str,
        column_type: ColumnType,
    },
    #[error("division by zero at row {row}")]
    DivideByZero { row: usize },
    #[error("integer overflow at row {row}")]
    Overflow { row: usize },
    #[error("cannot sample {requested} rows without replacement from {available}")]
    SampleTooLarge { requested: usize, available: usize },
    #[error("split proportion must be strictly between 0 and 1, got {proportion}")]
    InvalidProportion { proportion: f64 },
}
