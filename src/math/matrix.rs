use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{MatrixError, Operation, ShapeError};
use crate::math::scalar::Scalar;

/// Dense row-major matrix that owns its element buffer.
///
/// The buffer holds exactly `rows * cols` elements and is empty whenever either
/// dimension is zero. A `0×0` matrix is the canonical invalid value that failed
/// operations leave in their destination.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

/// Number of elements in a `rows × cols` buffer, or `None` if it overflows `usize`.
#[inline]
fn element_count(rows: usize, cols: usize) -> Option<usize> {
    rows.checked_mul(cols)
}

fn element_count_or_panic(rows: usize, cols: usize) -> usize {
    element_count(rows, cols)
        .unwrap_or_else(|| panic!("capacity overflow for a {}x{} matrix", rows, cols))
}

impl<T: Scalar> Matrix<T> {
    /// Allocate a zero-filled `rows × cols` matrix.
    ///
    /// With `rows == 0` or `cols == 0` no buffer is allocated.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`; use [`Matrix::try_new`] to get an
    /// error instead.
    pub fn new(rows: usize, cols: usize) -> Self {
        let len = element_count_or_panic(rows, cols);
        Self {
            data: vec![T::zero(); len],
            rows,
            cols,
        }
    }

    /// Like [`Matrix::new`], but reports an overflowing shape as a [`ShapeError`].
    pub fn try_new(rows: usize, cols: usize) -> Result<Self, ShapeError> {
        let len = element_count(rows, cols).ok_or(ShapeError { rows, cols, len: 0 })?;
        Ok(Self {
            data: vec![T::zero(); len],
            rows,
            cols,
        })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols)
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Build a matrix from nested rows, rejecting jagged input.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let total = rows.iter().map(|r| r.as_ref().len()).sum();
        let mut data = Vec::with_capacity(total);
        for row in rows {
            data.extend_from_slice(row.as_ref());
        }
        if rows.iter().any(|r| r.as_ref().len() != ncols) {
            return Err(ShapeError {
                rows: nrows,
                cols: ncols,
                len: data.len(),
            });
        }
        Self::from_shape_vec((nrows, ncols), data)
    }

    /// Populate every element from `f(row, col)`.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut m = Self::new(rows, cols);
        for i in 0..m.rows {
            for j in 0..m.cols {
                m[(i, j)] = f(i, j);
            }
        }
        m
    }

    /// Resize to `rows × cols` when the current shape differs.
    ///
    /// Existing content is discarded (the buffer is zero-filled) on a resize. A buffer
    /// that already has the requested shape is left untouched, so an accumulator
    /// reused across calls is not reallocated. Returns `true` if a resize happened.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn ensure_shape(&mut self, rows: usize, cols: usize) -> bool {
        if self.rows == rows && self.cols == cols {
            return false;
        }
        let len = element_count_or_panic(rows, cols);
        self.data.clear();
        self.data.resize(len, T::zero());
        self.rows = rows;
        self.cols = cols;
        true
    }

    /// Overwrite every element with zero, keeping the shape.
    pub fn fill_zero(&mut self) {
        self.fill(T::zero());
    }

    pub fn fill(&mut self, value: T) {
        for v in self.data.iter_mut() {
            *v = value;
        }
    }

    /// Element-wise comparison within an absolute `tolerance`. Shapes must match.
    pub fn approx_eq(&self, other: &Matrix<T>, tolerance: T) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (*a - *b).abs() <= tolerance)
    }

    /// Validate that this matrix is a non-degenerate square, as determinant and
    /// inverse require.
    pub(crate) fn check_square(&self, op: Operation) -> Result<usize, MatrixError> {
        if self.is_degenerate() {
            return Err(MatrixError::DegenerateOperand {
                op,
                shape: self.shape(),
            });
        }
        if !self.is_square() {
            return Err(MatrixError::ShapeMismatch {
                op,
                lhs: self.shape(),
                rhs: (self.cols, self.rows),
            });
        }
        Ok(self.rows)
    }
}

impl<T> Matrix<T> {
    /// Wrap a row-major buffer. Fails if its length is not `rows * cols`, including
    /// when that product overflows.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if element_count(rows, cols) != Some(data.len()) {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// The canonical invalid value: `0×0` with no buffer.
    pub fn invalid() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols: 0,
        }
    }

    /// Free the buffer and reset both dimensions to zero.
    ///
    /// Releasing an already released matrix is a no-op.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.rows = 0;
        self.cols = 0;
    }

    /// Reset to the canonical invalid value after a failed operation.
    pub fn invalidate(&mut self) {
        self.release();
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// `true` unless this is the canonical invalid value.
    pub fn is_valid(&self) -> bool {
        !(self.rows == 0 && self.cols == 0)
    }

    /// `true` when either dimension is zero.
    pub fn is_degenerate(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Whether a backing buffer is currently held.
    pub fn is_allocated(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Capacity of the backing buffer, in elements.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols, "index out of bounds");
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn row_slice_mut(&mut self, row: usize) -> &mut [T] {
        let start = self.offset(row, 0);
        let cols = self.cols;
        &mut self.data[start..start + cols]
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact(0) panics, and a degenerate matrix has no rows to yield.
        let width = self.cols.max(1);
        self.data.chunks_exact(width)
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Install a new buffer with its shape, dropping the old one.
    pub(crate) fn replace_buffer(&mut self, rows: usize, cols: usize, data: Vec<T>) {
        debug_assert_eq!(data.len(), rows * cols);
        self.data = data;
        self.rows = rows;
        self.cols = cols;
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::invalid()
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.rows().enumerate() {
            write!(f, "[")?;
            for (j, value) in row.iter().enumerate() {
                write!(f, "{}", value)?;
                if j + 1 != row.len() {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
            if i + 1 != self.rows {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zero_filled() {
        let m: Matrix<f64> = Matrix::new(2, 3);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.as_slice().len(), 6);
        assert!(m.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn degenerate_shape_has_no_buffer() {
        let m: Matrix<f32> = Matrix::new(0, 4);
        assert_eq!(m.shape(), (0, 4));
        assert!(!m.is_allocated());
        assert!(m.is_degenerate());
        assert!(m.is_valid());
    }

    #[test]
    fn release_twice_is_harmless() {
        let mut m: Matrix<f64> = Matrix::identity(3);
        m.release();
        m.release();
        assert_eq!(m.shape(), (0, 0));
        assert!(!m.is_allocated());
        assert!(!m.is_valid());
    }

    #[test]
    fn ensure_shape_keeps_matching_buffer() {
        let mut m: Matrix<f64> = Matrix::identity(2);
        let ptr = m.as_slice().as_ptr();
        assert!(!m.ensure_shape(2, 2));
        assert_eq!(m.as_slice().as_ptr(), ptr);
        assert_eq!(m[(1, 1)], 1.0);
    }

    #[test]
    fn ensure_shape_discards_content_on_resize() {
        let mut m: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert!(m.ensure_shape(3, 2));
        assert_eq!(m.shape(), (3, 2));
        assert!(m.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn from_rows_rejects_jagged_input() {
        let rows = vec![vec![1.0f64, 2.0], vec![3.0]];
        let err = Matrix::from_rows(&rows).unwrap_err();
        assert_eq!(err.rows, 2);
        assert_eq!(err.cols, 2);
        assert_eq!(err.len, 3);
    }

    #[test]
    fn from_shape_vec_checks_length() {
        assert!(Matrix::from_shape_vec((2, 2), vec![1.0f32; 3]).is_err());
        let m = Matrix::from_shape_vec((2, 2), vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.row_slice(1), &[3.0, 4.0]);
    }

    #[test]
    fn from_shape_vec_rejects_overflowing_shape() {
        let err = Matrix::<f64>::from_shape_vec((usize::MAX / 2 + 1, 2), vec![]).unwrap_err();
        assert_eq!(err.rows, usize::MAX / 2 + 1);
        assert_eq!(err.cols, 2);
        assert_eq!(err.len, 0);
    }

    #[test]
    fn try_new_rejects_overflowing_shape() {
        assert!(Matrix::<f32>::try_new(usize::MAX, 3).is_err());
        assert_eq!(Matrix::<f32>::try_new(2, 3).unwrap().shape(), (2, 3));
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn new_panics_on_overflowing_shape() {
        let _ = Matrix::<f64>::new(usize::MAX, 2);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn ensure_shape_panics_on_overflowing_shape() {
        let mut m: Matrix<f64> = Matrix::identity(2);
        m.ensure_shape(2, usize::MAX);
    }

    #[test]
    fn display_renders_nested_rows() {
        let m: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "[[1, 2], [3, 4]]");
        assert_eq!(Matrix::<f64>::invalid().to_string(), "[]");
    }

    #[test]
    fn check_square_reports_shape_problems() {
        let m: Matrix<f64> = Matrix::new(2, 3);
        assert!(matches!(
            m.check_square(Operation::Inverse),
            Err(MatrixError::ShapeMismatch { .. })
        ));
        let empty: Matrix<f64> = Matrix::invalid();
        assert!(matches!(
            empty.check_square(Operation::Inverse),
            Err(MatrixError::DegenerateOperand { .. })
        ));
        assert_eq!(Matrix::<f64>::identity(4).check_square(Operation::Inverse), Ok(4));
    }
}
