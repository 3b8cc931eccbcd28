// Statistics helpers
//
// Small reductions over float slices shared by the metric functions.
// Callers are responsible for the empty-input policy; both helpers return
// NaN for an empty slice.

use num_traits::Float;
use std::cmp::Ordering;

/// Arithmetic mean of a slice (NaN when empty)
pub fn mean<F: Float>(data: &[F]) -> F {
    if data.is_empty() {
        return F::nan();
    }
    let sum = data.iter().fold(F::zero(), |acc, &x| acc + x);
    let count = <F as num_traits::NumCast>::from(data.len()).unwrap_or_else(F::infinity);
    sum / count
}

/// Median of a slice (NaN when empty or when any value is NaN)
///
/// For an even number of values this is the mean of the two middle values.
pub fn median<F: Float>(data: &[F]) -> F {
    if data.is_empty() || data.iter().any(|x| x.is_nan()) {
        return F::nan();
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let count = sorted.len();
    if count % 2 == 0 {
        let two = F::one() + F::one();
        (sorted[count / 2 - 1] + sorted[count / 2]) / two
    } else {
        sorted[count / 2]
    }
}
