//! Error metrics for the Rossmann store sales forecasting data.
//!
//! ```
//! use rossmann_sales::metrics::{mad, rmspe};
//!
//! let actual = [100.0, 200.0];
//! let predicted = [110.0, 180.0];
//! let score: f64 = rmspe(&actual, &predicted).unwrap();
//! assert!((score - 0.1).abs() < 1e-12);
//! assert_eq!(mad(&actual, &predicted).unwrap(), 15.0);
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod stats;

// Re-export commonly used types
pub use config::{EmptyInputPolicy, MetricsConfig, MetricsConfigBuilder};
pub use error::{Error, Result};
pub use metrics::{evaluate, mad, rmspe, MetricReport};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
