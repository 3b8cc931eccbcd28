//! Loading metrics configuration from files

use rossmann_sales::config::{EmptyInputPolicy, MetricsConfig};
use rossmann_sales::metrics::rmspe_with;
use rossmann_sales::{Error, Result};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("rossmann_metrics_")
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp config");
    file
}

#[test]
fn test_load_toml() -> Result<()> {
    let file = write_config(".toml", "empty_input = \"nan\"\nparallel_min_groups = 4\n");
    let config = MetricsConfig::from_file(file.path())?;
    assert_eq!(config.empty_input, EmptyInputPolicy::Nan);
    assert_eq!(config.parallel_min_groups, 4);

    assert!(rmspe_with::<f64>(&[], &[], &config)?.is_nan());
    Ok(())
}

#[test]
fn test_load_yaml_and_json() -> Result<()> {
    let yaml = write_config(".yml", "empty_input: error\nparallel_min_groups: 16\n");
    let config = MetricsConfig::from_file(yaml.path())?;
    assert_eq!(config.empty_input, EmptyInputPolicy::Error);
    assert_eq!(config.parallel_min_groups, 16);

    let json = write_config(".json", r#"{"empty_input": "nan"}"#);
    let config = MetricsConfig::from_file(json.path())?;
    assert_eq!(config.empty_input, EmptyInputPolicy::Nan);
    assert_eq!(config.parallel_min_groups, 8);
    Ok(())
}

#[test]
fn test_round_trip_through_json() -> Result<()> {
    let config = MetricsConfig {
        empty_input: EmptyInputPolicy::Nan,
        parallel_min_groups: 3,
    };
    let text = serde_json::to_string(&config).expect("serialize config");
    assert_eq!(MetricsConfig::from_json_str(&text)?, config);
    Ok(())
}

#[test]
fn test_load_errors() {
    let broken = write_config(".toml", "empty_input = ");
    assert!(matches!(
        MetricsConfig::from_file(broken.path()),
        Err(Error::Config(_))
    ));

    let missing = std::env::temp_dir().join("rossmann_metrics_missing_config.toml");
    assert!(matches!(
        MetricsConfig::from_file(&missing),
        Err(Error::Io(_))
    ));

    let unknown = write_config(".ini", "empty_input = nan");
    assert!(matches!(
        MetricsConfig::from_file(unknown.path()),
        Err(Error::InvalidInput(_))
    ));
}
