use std::fmt::{Debug, Display};

use num_traits::Float;

/// Element types a [`Matrix`](crate::math::Matrix) can hold.
///
/// Implemented for `f32` and `f64`; any other `Float` that is printable picks it up
/// through the blanket impl.
pub trait Scalar: Float + Debug + Display + Default + Send + Sync + 'static {
    /// Convert an `f64` constant (tolerances, config values) into this precision.
    fn cast_f64(value: f64) -> Self {
        <Self as num_traits::NumCast>::from(value).unwrap_or_else(Self::nan)
    }
}

impl<T> Scalar for T where T: Float + Debug + Display + Default + Send + Sync + 'static {}

/// `(-1)^k` in the matrix precision.
#[inline]
pub(crate) fn alternating_sign<T: Scalar>(k: usize) -> T {
    if k % 2 == 0 {
        T::one()
    } else {
        -T::one()
    }
}
