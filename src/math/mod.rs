//! Dense matrix storage and arithmetic.
//!
//! `Matrix<T>` owns a contiguous row-major buffer. The free functions write into a
//! caller-supplied destination, which lets a caller reuse one accumulator across
//! repeated calls without reallocating; the methods on `Matrix` return fresh values.
pub mod determinant;
pub mod inverse;
pub mod matrix;
pub mod ops;
pub mod scalar;

pub use determinant::determinant;
pub use inverse::{invert, invert_with};
pub use matrix::Matrix;
pub use ops::{add, multiply, subtract, transpose, transpose_in_place};
pub use scalar::Scalar;
