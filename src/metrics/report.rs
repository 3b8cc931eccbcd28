//! Combined evaluation of a forecast against ground truth

use crate::config::MetricsConfig;
use crate::error::{check_same_len, Result};
use crate::metrics::regression::{self, empty_input};
use num_traits::Float;
use serde::{Deserialize, Deserializer, Serialize};

/// All error metrics for one pair of sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    /// Number of paired observations
    pub n: usize,
    /// Positions whose actual value is zero (masked out of RMSPE)
    pub zero_actuals: usize,
    /// Root Mean Square Percentage Error
    #[serde(deserialize_with = "nan_from_null")]
    pub rmspe: f64,
    /// Median absolute deviation
    #[serde(deserialize_with = "nan_from_null")]
    pub mad: f64,
    /// Mean Absolute Error
    #[serde(deserialize_with = "nan_from_null")]
    pub mae: f64,
    /// Root Mean Squared Error
    #[serde(deserialize_with = "nan_from_null")]
    pub rmse: f64,
}

/// JSON has no NaN; serde_json writes it as `null`, so read `null` back as NaN
fn nan_from_null<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl MetricReport {
    fn nan(n: usize) -> Self {
        MetricReport {
            n,
            zero_actuals: 0,
            rmspe: f64::NAN,
            mad: f64::NAN,
            mae: f64::NAN,
            rmse: f64::NAN,
        }
    }

    /// Serialize the report as JSON
    ///
    /// NaN metrics serialize as `null` and read back as NaN.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a report written by [`MetricReport::to_json`]
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Evaluate a forecast with the default configuration
pub fn evaluate<F: Float>(actual: &[F], predicted: &[F]) -> Result<MetricReport> {
    evaluate_with(actual, predicted, &MetricsConfig::default())
}

/// Evaluate a forecast, computing every metric in [`MetricReport`]
pub fn evaluate_with<F: Float>(
    actual: &[F],
    predicted: &[F],
    config: &MetricsConfig,
) -> Result<MetricReport> {
    check_same_len(actual.len(), predicted.len())?;
    if empty_input::<F>("evaluate", actual.len(), config)?.is_some() {
        return Ok(MetricReport::nan(0));
    }

    let to_f64 = |value: F| value.to_f64().unwrap_or(f64::NAN);

    Ok(MetricReport {
        n: actual.len(),
        zero_actuals: actual.iter().filter(|&&a| a == F::zero()).count(),
        rmspe: to_f64(regression::rmspe_with(actual, predicted, config)?),
        mad: to_f64(regression::mad_with(actual, predicted, config)?),
        mae: to_f64(regression::mean_absolute_error(actual, predicted)?),
        rmse: to_f64(regression::root_mean_squared_error(actual, predicted)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmptyInputPolicy;
    use crate::error::Error;

    #[test]
    fn test_evaluate() {
        let report = evaluate(&[100.0, 0.0, 200.0, 50.0], &[110.0, 30.0, 180.0, 50.0]).unwrap();
        assert_eq!(report.n, 4);
        assert_eq!(report.zero_actuals, 1);
        // squared errors 0.01, 0, 0.01, 0
        assert!((report.rmspe - 0.005f64.sqrt()).abs() < 1e-12);
        // |diffs| = 10, 30, 20, 0
        assert_eq!(report.mad, 15.0);
        assert_eq!(report.mae, 15.0);
        assert!((report.rmse - 350.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_empty() {
        assert!(matches!(
            evaluate::<f64>(&[], &[]),
            Err(Error::EmptyData(_))
        ));

        let config = MetricsConfig {
            empty_input: EmptyInputPolicy::Nan,
            ..MetricsConfig::default()
        };
        let report = evaluate_with::<f64>(&[], &[], &config).unwrap();
        assert_eq!(report.n, 0);
        assert!(report.rmspe.is_nan());
        assert!(report.mad.is_nan());
    }

    #[test]
    fn test_report_json() {
        let report = evaluate(&[1.0f32, 2.0], &[1.0, 2.0]).unwrap();
        let json = report.to_json().unwrap();
        let parsed: MetricReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.rmspe, 0.0);
    }

    #[test]
    fn test_report_json_keeps_nan() {
        let config = MetricsConfig {
            empty_input: EmptyInputPolicy::Nan,
            ..MetricsConfig::default()
        };
        let empty = evaluate_with::<f64>(&[], &[], &config).unwrap();
        let json = empty.to_json().unwrap();
        assert!(json.contains(r#""rmspe":null"#), "json = {}", json);

        let parsed = MetricReport::from_json(&json).unwrap();
        assert_eq!(parsed.n, 0);
        assert!(parsed.rmspe.is_nan());
        assert!(parsed.mad.is_nan());
        assert!(parsed.mae.is_nan());
        assert!(parsed.rmse.is_nan());

        let with_nan = evaluate(&[f64::NAN, 1.0], &[1.0, 1.0]).unwrap();
        let parsed = MetricReport::from_json(&with_nan.to_json().unwrap()).unwrap();
        assert_eq!(parsed.n, 2);
        assert!(parsed.rmspe.is_nan());
        assert!(parsed.mad.is_nan());
    }

    #[test]
    fn test_evaluate_length_mismatch() {
        assert!(matches!(
            evaluate(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(Error::ShapeMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }
}
