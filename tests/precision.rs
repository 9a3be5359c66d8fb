//! The same operations instantiated in single and double precision.

use approx::assert_abs_diff_eq;
use esp_matrix::{invert, multiply, Matrix, Real, RealMatrix, Scalar};

fn inverse_round_trip<T: Scalar>(tolerance: T) {
    let a: Matrix<T> = Matrix::from_fn(3, 3, |i, j| {
        T::cast_f64(if i == j { 4.0 } else { (i + 2 * j) as f64 * 0.5 })
    });
    let mut inv = Matrix::invalid();
    invert(&a, &mut inv).unwrap();
    let mut product = Matrix::invalid();
    multiply(&a, &inv, &mut product).unwrap();
    assert!(product.approx_eq(&Matrix::identity(3), tolerance));
}

#[test]
fn single_precision_inverse() {
    inverse_round_trip::<f32>(1e-5);
}

#[test]
fn double_precision_inverse() {
    inverse_round_trip::<f64>(1e-12);
}

#[test]
fn single_precision_determinant() {
    let a: Matrix<f32> = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
    assert_abs_diff_eq!(a.determinant().unwrap(), 10.0f32, epsilon = 1e-5);
}

#[test]
fn real_alias_follows_feature() {
    let m: RealMatrix = Matrix::identity(2);
    let det: Real = m.determinant().unwrap();
    assert_eq!(det, 1.0);
    #[cfg(feature = "f32")]
    assert_eq!(std::mem::size_of::<Real>(), 4);
    #[cfg(not(feature = "f32"))]
    assert_eq!(std::mem::size_of::<Real>(), 8);
}
