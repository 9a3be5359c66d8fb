//! Matrix inversion through the adjugate.
//!
//! `A⁻¹ = adj(A) / det(A)`, where `adj(A)` is the transpose of the cofactor matrix.
//! Every cofactor costs one determinant of order `n-1`, so the total work grows
//! factorially with `n`.

use crate::config::MatrixConfig;
use crate::error::{MatrixError, Operation};
use crate::math::determinant::{determinant, extract_minor};
use crate::math::matrix::Matrix;
use crate::math::ops::{fail, transpose_in_place};
use crate::math::scalar::{alternating_sign, Scalar};

/// `b = a⁻¹`, treating only an exactly-zero determinant as singular.
pub fn invert<T: Scalar>(a: &Matrix<T>, b: &mut Matrix<T>) -> Result<(), MatrixError> {
    invert_with(a, b, &MatrixConfig::default())
}

/// `b = a⁻¹`, using `config.singularity` to reject singular input.
///
/// On a non-square or degenerate `a`, or a singular one, `b` is invalidated, the
/// failure is logged and the error returned before any division happens.
pub fn invert_with<T: Scalar>(
    a: &Matrix<T>,
    b: &mut Matrix<T>,
    config: &MatrixConfig,
) -> Result<(), MatrixError> {
    let n = match a.check_square(Operation::Inverse) {
        Ok(n) => n,
        Err(err) => return Err(fail(b, err)),
    };

    let det = determinant(a.as_slice(), n);
    if config.singularity.is_singular(det) {
        return Err(fail(b, MatrixError::SingularMatrix));
    }

    b.ensure_shape(n, n);

    if n == 1 {
        b[(0, 0)] = T::one() / a[(0, 0)];
        return Ok(());
    }

    let mut adjugate = cofactors(a, n);
    transpose_in_place(&mut adjugate)?;

    let inv_det = T::one() / det;
    for (out, c) in b.as_mut_slice().iter_mut().zip(adjugate.as_slice()) {
        *out = inv_det * *c;
    }
    Ok(())
}

/// Cofactor matrix of the `n×n` matrix `a`, `n >= 2`.
fn cofactors<T: Scalar>(a: &Matrix<T>, n: usize) -> Matrix<T> {
    let mut out = Matrix::new(n, n);
    let mut minor = vec![T::zero(); (n - 1) * (n - 1)];
    for i in 0..n {
        for j in 0..n {
            extract_minor(a.as_slice(), n, i, j, &mut minor);
            out[(i, j)] = alternating_sign::<T>(i + j) * determinant(&minor, n - 1);
        }
    }
    out
}

impl<T: Scalar> Matrix<T> {
    /// Inverse as a new matrix, with the exact-zero singularity check.
    pub fn inverse(&self) -> Result<Matrix<T>, MatrixError> {
        let mut out = Matrix::invalid();
        invert(self, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SingularityPolicy;
    use approx::assert_abs_diff_eq;

    #[test]
    fn inverse_of_two_by_two() {
        let a: Matrix<f64> = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
        let inv = a.inverse().unwrap();
        let expected = [0.6, -0.7, -0.2, 0.4];
        for (got, want) in inv.as_slice().iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*got, *want, epsilon = 1e-12);
        }
    }

    #[test]
    fn inverse_of_one_by_one() {
        let a: Matrix<f32> = Matrix::from_rows(&[[4.0]]).unwrap();
        let mut b = Matrix::invalid();
        invert(&a, &mut b).unwrap();
        assert_eq!(b.shape(), (1, 1));
        assert_eq!(b[(0, 0)], 0.25);
    }

    #[test]
    fn cofactors_carry_alternating_signs() {
        let a: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let c = cofactors(&a, 2);
        assert_eq!(c.as_slice(), &[4.0, -3.0, -2.0, 1.0]);
    }

    #[test]
    fn singular_matrix_invalidates_destination() {
        let a: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let mut b = Matrix::identity(2);
        let err = invert(&a, &mut b).unwrap_err();
        assert_eq!(err, MatrixError::SingularMatrix);
        assert_eq!(b.shape(), (0, 0));
        assert!(!b.is_allocated());
    }

    #[test]
    fn tolerance_policy_rejects_nearly_singular() {
        let a: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0], [1.0, 2.0 + 1e-14]]).unwrap();
        let mut b = Matrix::invalid();
        assert!(invert(&a, &mut b).is_ok());

        let config = MatrixConfig::new(SingularityPolicy::Tolerance { epsilon: 1e-10 });
        let err = invert_with(&a, &mut b, &config).unwrap_err();
        assert_eq!(err, MatrixError::SingularMatrix);
        assert!(!b.is_valid());
    }

    #[test]
    fn non_square_is_rejected() {
        let a: Matrix<f64> = Matrix::new(2, 3);
        let mut b = Matrix::identity(3);
        let err = invert(&a, &mut b).unwrap_err();
        assert_eq!(err.to_string(), "Wrong array dimensions to inverse!");
        assert!(!b.is_valid());
    }
}
