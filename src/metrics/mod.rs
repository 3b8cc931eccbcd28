//! Forecast error metrics
//!
//! [`rmspe`] and [`mad`] are the scores used to compare sales forecasts with
//! observed daily sales. [`regression`] also carries the usual absolute-scale
//! metrics, [`report`] bundles them, and [`grouped`] scores each store (or any
//! other key) separately.

pub mod grouped;
pub mod regression;
pub mod report;

pub use grouped::{
    evaluate_by_group, evaluate_by_group_with, mad_by_group, mad_by_group_with, rmspe_by_group,
    rmspe_by_group_with, GroupedReport,
};
pub use regression::{
    mad, mad_with, mean_absolute_error, mean_squared_error, percentage_errors, r2_score,
    rmspe, rmspe_with, root_mean_squared_error,
};
pub use report::{evaluate, evaluate_with, MetricReport};
