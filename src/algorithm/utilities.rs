//! # Utilities
//!
//! Tolerance comparisons shared by the algorithms.
use num_traits::Float;

/// Whether `value` is below `-epsilon`.
pub(crate) fn is_negative<F: Float>(value: F, epsilon: F) -> bool {
    debug_assert!(epsilon >= F::zero());

    value < -epsilon
}

/// Whether `value` is above `epsilon`.
pub(crate) fn is_positive<F: Float>(value: F, epsilon: F) -> bool {
    debug_assert!(epsilon >= F::zero());

    value > epsilon
}

/// Whether `value` lies strictly within `epsilon` of zero.
pub(crate) fn is_zero<F: Float>(value: F, epsilon: F) -> bool {
    debug_assert!(epsilon >= F::zero());

    value.abs() < epsilon
}

/// Round to a multiple of `1 / scale` and return the multiplier as an integer key.
///
/// Used to deduplicate points that differ only by rounding noise.
pub(crate) fn rounding_key<F: Float>(value: F, scale: F) -> i64 {
    (value * scale).round().to_i64().unwrap_or(i64::MAX)
}

#[cfg(test)]
mod test {
    use crate::algorithm::utilities::{is_negative, is_positive, is_zero, rounding_key};

    #[test]
    fn tolerances() {
        let epsilon = 1e-10_f64;
        assert!(is_negative(-1e-9, epsilon));
        assert!(!is_negative(-1e-11, epsilon));
        assert!(is_positive(1e-9, epsilon));
        assert!(!is_positive(1e-10, epsilon));
        assert!(is_zero(-1e-11, epsilon));
        assert!(!is_zero(1e-10, epsilon));
    }

    #[test]
    fn keys() {
        assert_eq!(rounding_key(2.0004_f64, 1000_f64), 2000);
        assert_eq!(rounding_key(1.9996_f64, 1000_f64), 2000);
        assert_eq!(rounding_key(-0.0001_f64, 1000_f64), 0);
    }
}
