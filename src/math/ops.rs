//! Multiplication, addition, subtraction and transposition.
//!
//! Every operation writes into a caller-supplied destination. On invalid operands the
//! destination is reset to the canonical invalid value, a single error line is
//! logged and the call returns immediately with the error.

use crate::error::{MatrixError, Operation};
use crate::math::matrix::Matrix;
use crate::math::scalar::Scalar;

/// Invalidate `dest`, log the failure and hand the error back for `?`/`return`.
pub(crate) fn fail<T>(dest: &mut Matrix<T>, err: MatrixError) -> MatrixError {
    dest.invalidate();
    log::error!("{}", err);
    err
}

fn check_pair<T>(
    op: Operation,
    a: &Matrix<T>,
    b: &Matrix<T>,
    compatible: bool,
) -> Result<(), MatrixError> {
    if a.is_degenerate() {
        return Err(MatrixError::DegenerateOperand {
            op,
            shape: a.shape(),
        });
    }
    if b.is_degenerate() {
        return Err(MatrixError::DegenerateOperand {
            op,
            shape: b.shape(),
        });
    }
    if !compatible {
        return Err(MatrixError::ShapeMismatch {
            op,
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }
    Ok(())
}

/// `c = a · b`.
///
/// Requires `a.ncols() == b.nrows()`; `c` becomes `a.nrows() × b.ncols()`. The
/// destination is zeroed before accumulating, so a reused accumulator never leaks
/// values from an earlier call.
pub fn multiply<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
) -> Result<(), MatrixError> {
    if let Err(err) = check_pair(Operation::Multiply, a, b, a.ncols() == b.nrows()) {
        return Err(fail(c, err));
    }

    let (m, n) = (a.nrows(), b.ncols());
    c.ensure_shape(m, n);
    c.fill_zero();

    for i in 0..m {
        let a_row = a.row_slice(i);
        for j in 0..n {
            let mut acc = c[(i, j)];
            for (t, a_it) in a_row.iter().enumerate() {
                acc = *a_it * b[(t, j)] + acc;
            }
            c[(i, j)] = acc;
        }
    }
    Ok(())
}

fn zip_into<T, F>(
    op: Operation,
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
    f: F,
) -> Result<(), MatrixError>
where
    T: Scalar,
    F: Fn(T, T) -> T,
{
    if let Err(err) = check_pair(op, a, b, a.shape() == b.shape()) {
        return Err(fail(c, err));
    }

    c.ensure_shape(a.nrows(), a.ncols());
    for ((out, x), y) in c
        .as_mut_slice()
        .iter_mut()
        .zip(a.as_slice())
        .zip(b.as_slice())
    {
        *out = f(*x, *y);
    }
    Ok(())
}

/// `c = a + b`. Shapes must be equal.
pub fn add<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<(), MatrixError> {
    zip_into(Operation::Add, a, b, c, |x, y| x + y)
}

/// `c = a - b`. Shapes must be equal.
pub fn subtract<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
) -> Result<(), MatrixError> {
    zip_into(Operation::Subtract, a, b, c, |x, y| x - y)
}

/// `b = aᵀ`.
pub fn transpose<T: Scalar>(a: &Matrix<T>, b: &mut Matrix<T>) -> Result<(), MatrixError> {
    if a.is_degenerate() {
        let err = MatrixError::DegenerateOperand {
            op: Operation::Transpose,
            shape: a.shape(),
        };
        return Err(fail(b, err));
    }

    b.ensure_shape(a.ncols(), a.nrows());
    for i in 0..b.nrows() {
        for j in 0..b.ncols() {
            b[(i, j)] = a[(j, i)];
        }
    }
    Ok(())
}

/// `a = aᵀ`, for callers whose output is the input itself.
///
/// The result is built in a separate buffer and swapped in afterwards; resizing `a`
/// first would wipe the elements still to be read.
pub fn transpose_in_place<T: Scalar>(a: &mut Matrix<T>) -> Result<(), MatrixError> {
    if a.is_degenerate() {
        let err = MatrixError::DegenerateOperand {
            op: Operation::Transpose,
            shape: a.shape(),
        };
        return Err(fail(a, err));
    }

    let (rows, cols) = a.shape();
    let mut scratch = Vec::with_capacity(rows * cols);
    for j in 0..cols {
        for i in 0..rows {
            scratch.push(a[(i, j)]);
        }
    }
    a.replace_buffer(cols, rows, scratch);
    Ok(())
}

impl<T: Scalar> Matrix<T> {
    /// `self · rhs` as a new matrix.
    pub fn product(&self, rhs: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        let mut out = Matrix::invalid();
        multiply(self, rhs, &mut out)?;
        Ok(out)
    }

    /// `self + rhs` as a new matrix.
    pub fn sum(&self, rhs: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        let mut out = Matrix::invalid();
        add(self, rhs, &mut out)?;
        Ok(out)
    }

    /// `self - rhs` as a new matrix.
    pub fn difference(&self, rhs: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        let mut out = Matrix::invalid();
        subtract(self, rhs, &mut out)?;
        Ok(out)
    }

    pub fn transposed(&self) -> Result<Matrix<T>, MatrixError> {
        let mut out = Matrix::invalid();
        transpose(self, &mut out)?;
        Ok(out)
    }
}
