use crate::error::{MatrixError, Operation};
use crate::math::matrix::Matrix;
use crate::math::scalar::{alternating_sign, Scalar};

/// Copy the `(n-1)×(n-1)` minor of the row-major `n×n` buffer `src`, with row
/// `skip_row` and column `skip_col` removed, into `dst`.
///
/// Row and column offsets start at zero and become one once the removed index has
/// been passed, which shifts the remaining elements up and left.
pub(crate) fn extract_minor<T: Copy>(
    src: &[T],
    n: usize,
    skip_row: usize,
    skip_col: usize,
    dst: &mut [T],
) {
    let width = n - 1;
    let mut row_offset = 0;
    for m in 0..n {
        if m == skip_row {
            row_offset = 1;
            continue;
        }
        let mut col_offset = 0;
        for c in 0..n {
            if c == skip_col {
                col_offset = 1;
                continue;
            }
            dst[(m - row_offset) * width + (c - col_offset)] = src[m * n + c];
        }
    }
}

/// Determinant of the row-major `n×n` matrix stored in `buffer`, by cofactor
/// expansion along the first row.
///
/// Runs in O(n!) time with recursion depth `n`; only suitable for small orders.
/// Each level owns one `(n-1)²` scratch buffer that is freed on return.
///
/// # Panics
///
/// Panics if `n == 0` or `buffer` holds fewer than `n * n` elements.
pub fn determinant<T: Scalar>(buffer: &[T], n: usize) -> T {
    assert!(n > 0, "determinant of an order-0 matrix is undefined");
    assert!(
        buffer.len() >= n * n,
        "buffer of length {} is too short for a {}x{} matrix",
        buffer.len(),
        n,
        n
    );

    if n == 1 {
        return buffer[0];
    }

    let mut minor = vec![T::zero(); (n - 1) * (n - 1)];
    let mut det = T::zero();
    for c in 0..n {
        extract_minor(buffer, n, 0, c, &mut minor);
        det = det + alternating_sign::<T>(c) * (buffer[c] * determinant(&minor, n - 1));
    }
    det
}

impl<T: Scalar> Matrix<T> {
    /// Determinant of a non-degenerate square matrix.
    ///
    /// Unlike the operations with a destination, nothing is invalidated or logged
    /// here; the shape problem is only returned, as an error tagged
    /// `Operation::Determinant`.
    pub fn determinant(&self) -> Result<T, MatrixError> {
        let n = self.check_square(Operation::Determinant)?;
        Ok(determinant(self.as_slice(), n))
    }
}
