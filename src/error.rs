use std::fmt;

use thiserror::Error;

/// Matrix operations that validate their operands.
///
/// `Determinant` only appears in errors returned by `Matrix::determinant`, which
/// has no destination to invalidate and logs nothing. Its message reads
/// "Wrong array dimensions to calculate determinant!".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Multiply,
    Add,
    Subtract,
    Transpose,
    Determinant,
    Inverse,
}

impl Operation {
    /// Verb used in the failure message, e.g. "Wrong array dimensions to add!".
    pub fn verb(self) -> &'static str {
        match self {
            Operation::Multiply => "multiplicate",
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Transpose => "transpose",
            Operation::Determinant => "calculate determinant",
            Operation::Inverse => "inverse",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Failures reported by the matrix operations.
///
/// Every variant is raised after the destination matrix has been reset to the
/// canonical invalid value (`0×0`, no buffer), so callers can check either the
/// returned error or the destination.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// Operand dimensions violate the algebraic precondition of `op`.
    #[error("Wrong array dimensions to {op}!")]
    ShapeMismatch {
        op: Operation,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    /// An operand has zero rows or zero columns.
    #[error("Wrong array dimensions to {op}!")]
    DegenerateOperand { op: Operation, shape: (usize, usize) },
    /// The determinant was judged zero while inverting.
    #[error("Array determinant equals 0!")]
    SingularMatrix,
}

impl MatrixError {
    pub fn operation(&self) -> Operation {
        match self {
            MatrixError::ShapeMismatch { op, .. }
            | MatrixError::DegenerateOperand { op, .. } => *op,
            MatrixError::SingularMatrix => Operation::Inverse,
        }
    }
}

/// A flat buffer or row list that does not describe a rectangular matrix.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
pub struct ShapeError {
    pub rows: usize,
    pub cols: usize,
    pub len: usize,
}
