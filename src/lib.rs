//! esp-matrix: small dense-matrix arithmetic for resource-constrained targets.
//!
//! The crate provides one generic [`Matrix`] type plus multiplication, addition,
//! subtraction, transposition, determinant (cofactor expansion) and inversion
//! (adjugate over determinant). Failed operations reset their destination to the
//! canonical invalid `0×0` matrix, emit one `log::error!` line and return a
//! [`MatrixError`].
//!
//! The algorithms favour a small footprint over speed: determinant and inverse are
//! O(n!) and intended for small orders only.
pub mod config;
pub mod error;
pub mod math;

pub use config::{MatrixConfig, SingularityPolicy};
pub use error::{MatrixError, Operation, ShapeError};
pub use math::{
    add, determinant, invert, invert_with, multiply, subtract, transpose, transpose_in_place,
    Matrix, Scalar,
};

// Prevent selecting two incompatible precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; build with `--no-default-features --features f32` for single precision"
);

/// Default element precision, chosen by the `f32` / `f64` feature.
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(not(feature = "f32"))]
pub type Real = f64;

/// Matrix in the default precision.
pub type RealMatrix = Matrix<Real>;
