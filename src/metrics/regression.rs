//! Error metrics between a ground-truth sequence and a forecast
//!
//! Every function pairs its two inputs by position and fails with
//! [`Error::ShapeMismatch`] when their lengths differ.

use crate::config::{EmptyInputPolicy, MetricsConfig};
use crate::error::{check_same_len, Error, Result};
use crate::stats;
use num_traits::Float;

/// Resolves zero-length input according to the configured policy.
///
/// Returns `Ok(Some(nan))` when the caller should short-circuit with NaN and
/// `Ok(None)` when there is data to reduce.
pub(crate) fn empty_input<F: Float>(
    metric: &str,
    len: usize,
    config: &MetricsConfig,
) -> Result<Option<F>> {
    if len > 0 {
        return Ok(None);
    }
    match config.empty_input {
        EmptyInputPolicy::Error => require_data(metric, len).map(|_| None),
        EmptyInputPolicy::Nan => {
            log::warn!("{} called with empty input, returning NaN", metric);
            Ok(Some(F::nan()))
        }
    }
}

fn require_data(metric: &str, len: usize) -> Result<()> {
    if len == 0 {
        return Err(Error::EmptyData(format!(
            "{} requires at least one observation",
            metric
        )));
    }
    Ok(())
}

fn len_as<F: Float>(len: usize) -> F {
    <F as num_traits::NumCast>::from(len).unwrap_or_else(F::infinity)
}

/// Per-element percentage errors `(actual - predicted) / actual`
///
/// Positions where `actual` is exactly zero yield zero instead of dividing by
/// zero, whatever the prediction is.
pub fn percentage_errors<F: Float>(actual: &[F], predicted: &[F]) -> Result<Vec<F>> {
    check_same_len(actual.len(), predicted.len())?;

    Ok(actual
        .iter()
        .zip(predicted.iter())
        .map(|(&a, &p)| if a == F::zero() { F::zero() } else { (a - p) / a })
        .collect())
}

/// Root Mean Square Percentage Error
///
/// `sqrt(mean(e_i^2))` where `e_i` comes from [`percentage_errors`]. Zero
/// actuals contribute no error, so an all-zero `actual` gives 0. The result is
/// not symmetric: only `actual` is used as the denominator.
///
/// # Example
/// ```
/// use rossmann_sales::metrics::rmspe;
///
/// let score: f64 = rmspe(&[100.0, 200.0], &[110.0, 180.0]).unwrap();
/// assert!((score - 0.1).abs() < 1e-12);
/// ```
pub fn rmspe<F: Float>(actual: &[F], predicted: &[F]) -> Result<F> {
    rmspe_with(actual, predicted, &MetricsConfig::default())
}

/// [`rmspe`] with an explicit configuration
pub fn rmspe_with<F: Float>(actual: &[F], predicted: &[F], config: &MetricsConfig) -> Result<F> {
    check_same_len(actual.len(), predicted.len())?;
    if let Some(nan) = empty_input("rmspe", actual.len(), config)? {
        return Ok(nan);
    }

    let zero_actuals = actual.iter().filter(|&&a| a == F::zero()).count();
    if zero_actuals == actual.len() {
        log::warn!("rmspe: every actual value is zero, result is 0");
    } else if zero_actuals > 0 {
        log::debug!(
            "rmspe: masked {} of {} zero-actual positions",
            zero_actuals,
            actual.len()
        );
    }

    let squared: Vec<F> = percentage_errors(actual, predicted)?
        .into_iter()
        .map(|e| e * e)
        .collect();
    Ok(stats::mean(&squared).sqrt())
}

/// Median absolute deviation between `x` and `y`
///
/// Despite the "MAD" name used for the Rossmann scoring, this is the
/// *median* of `|x_i - y_i|`, not the mean. Symmetric in its arguments.
///
/// # Example
/// ```
/// use rossmann_sales::metrics::mad;
///
/// // mean of the differences would be 1.5
/// assert_eq!(mad(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 10.0]).unwrap(), 0.0);
/// ```
pub fn mad<F: Float>(x: &[F], y: &[F]) -> Result<F> {
    mad_with(x, y, &MetricsConfig::default())
}

/// [`mad`] with an explicit configuration
pub fn mad_with<F: Float>(x: &[F], y: &[F], config: &MetricsConfig) -> Result<F> {
    check_same_len(x.len(), y.len())?;
    if let Some(nan) = empty_input("mad", x.len(), config)? {
        return Ok(nan);
    }

    let deviations: Vec<F> = x
        .iter()
        .zip(y.iter())
        .map(|(&a, &b)| (a - b).abs())
        .collect();
    Ok(stats::median(&deviations))
}

/// Mean Squared Error
///
/// # Arguments
/// * `y_true` - Observed values
/// * `y_pred` - Predicted values, paired with `y_true` by position
///
/// # Returns
/// * `Result<F>` - Mean of the squared differences, or `EmptyData` for empty input
pub fn mean_squared_error<F: Float>(y_true: &[F], y_pred: &[F]) -> Result<F> {
    check_same_len(y_true.len(), y_pred.len())?;
    require_data("mean_squared_error", y_true.len())?;

    let sum_squared_error = y_true
        .iter()
        .zip(y_pred.iter())
        .fold(F::zero(), |acc, (&t, &p)| {
            let error = t - p;
            acc + error * error
        });

    Ok(sum_squared_error / len_as::<F>(y_true.len()))
}

/// Mean Absolute Error
///
/// # Arguments
/// * `y_true` - Observed values
/// * `y_pred` - Predicted values, paired with `y_true` by position
///
/// # Returns
/// * `Result<F>` - Mean of the absolute differences, or `EmptyData` for empty input
pub fn mean_absolute_error<F: Float>(y_true: &[F], y_pred: &[F]) -> Result<F> {
    check_same_len(y_true.len(), y_pred.len())?;
    require_data("mean_absolute_error", y_true.len())?;

    let sum_absolute_error = y_true
        .iter()
        .zip(y_pred.iter())
        .fold(F::zero(), |acc, (&t, &p)| acc + (t - p).abs());

    Ok(sum_absolute_error / len_as::<F>(y_true.len()))
}

/// Root Mean Squared Error
///
/// # Arguments
/// * `y_true` - Observed values
/// * `y_pred` - Predicted values, paired with `y_true` by position
///
/// # Returns
/// * `Result<F>` - Square root of [`mean_squared_error`], in the unit of the inputs
pub fn root_mean_squared_error<F: Float>(y_true: &[F], y_pred: &[F]) -> Result<F> {
    let mse = mean_squared_error(y_true, y_pred)?;
    Ok(mse.sqrt())
}

/// Coefficient of determination (R^2)
///
/// # Arguments
/// * `y_true` - Observed values
/// * `y_pred` - Predicted values, paired with `y_true` by position
///
/// # Returns
/// * `Result<F>` - 1 for a perfect fit, lower (possibly negative) otherwise.
///   Constant `y_true` gives 1 when matched exactly and 0 otherwise.
pub fn r2_score<F: Float>(y_true: &[F], y_pred: &[F]) -> Result<F> {
    check_same_len(y_true.len(), y_pred.len())?;
    require_data("r2_score", y_true.len())?;

    let y_mean = stats::mean(y_true);

    let ss_tot = y_true.iter().fold(F::zero(), |acc, &t| {
        let diff = t - y_mean;
        acc + diff * diff
    });

    let ss_res = y_true
        .iter()
        .zip(y_pred.iter())
        .fold(F::zero(), |acc, (&t, &p)| {
            let error = t - p;
            acc + error * error
        });

    // constant truth: only a perfect prediction explains it
    if ss_tot == F::zero() {
        if ss_res == F::zero() {
            Ok(F::one())
        } else {
            Ok(F::zero())
        }
    } else {
        Ok(F::one() - ss_res / ss_tot)
    }
}
