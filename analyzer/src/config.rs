use crate::args::defaults::*;
use crate::error::AnalyzerError;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Analysis and chart defaults, optionally loaded from a TOML file.
/// Command line flags take precedence over every value here.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub throughput: ThroughputConfig,
    pub latency: LatencyConfig,
    pub block_interval: BlockIntervalConfig,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThroughputConfig {
    pub bucket_width_secs: f64,
    pub single_bucket_width_secs: f64,
    pub moving_average_window: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub trim_low: f64,
    pub trim_high: f64,
    pub log_scale: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlockIntervalConfig {
    pub slow_threshold_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub dark: bool,
}

impl Default for ThroughputConfig {
    fn default() -> Self {
        Self {
            bucket_width_secs: DEFAULT_AGGREGATED_BUCKET_WIDTH_SECS,
            single_bucket_width_secs: DEFAULT_SINGLE_BUCKET_WIDTH_SECS,
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            trim_low: DEFAULT_CDF_TRIM_LOW,
            trim_high: DEFAULT_CDF_TRIM_HIGH,
            log_scale: None,
        }
    }
}

impl Default for BlockIntervalConfig {
    fn default() -> Self {
        Self {
            slow_threshold_secs: DEFAULT_SLOW_BLOCK_THRESHOLD_SECS,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            dark: false,
        }
    }
}

impl PlotConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, AnalyzerError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalyzerError::CannotLoadConfiguration(format!("{}: {}", path.display(), e))
        })?;
        let config: PlotConfig = toml::from_str(&content).map_err(|e| {
            AnalyzerError::CannotLoadConfiguration(format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;
        info!("Loaded plot configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalyzerError> {
        validate_bucket_width(self.throughput.bucket_width_secs)?;
        validate_bucket_width(self.throughput.single_bucket_width_secs)?;
        if self.throughput.moving_average_window == 0 {
            return Err(AnalyzerError::InvalidConfiguration(
                "moving_average_window must be at least 1".to_owned(),
            ));
        }
        validate_trim(self.latency.trim_low, self.latency.trim_high)?;
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(AnalyzerError::InvalidConfiguration(
                "chart width and height must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

pub fn validate_bucket_width(bucket_width_secs: f64) -> Result<(), AnalyzerError> {
    if !bucket_width_secs.is_finite() || bucket_width_secs <= 0.0 {
        return Err(AnalyzerError::InvalidConfiguration(format!(
            "bucket width must be a positive number of seconds, got {bucket_width_secs}"
        )));
    }
    Ok(())
}

pub fn validate_trim(low: f64, high: f64) -> Result<(), AnalyzerError> {
    if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low >= high {
        return Err(AnalyzerError::InvalidConfiguration(format!(
            "trim fractions must satisfy 0 <= low < high <= 1, got {low} and {high}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_should_give_defaults() {
        let config = PlotConfig::load(None).unwrap();

        assert_eq!(config, PlotConfig::default());
        assert_eq!(config.throughput.bucket_width_secs, 60.0);
    }

    #[test]
    fn partial_file_should_keep_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[throughput]\nbucket_width_secs = 5.0\n\n[chart]\ndark = true").unwrap();

        let config = PlotConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.throughput.bucket_width_secs, 5.0);
        assert_eq!(config.throughput.single_bucket_width_secs, 1.0);
        assert!(config.chart.dark);
        assert_eq!(config.latency.trim_low, 0.1);
    }

    #[test]
    fn invalid_trim_should_be_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[latency]\ntrim_low = 0.9\ntrim_high = 0.1").unwrap();

        let result = PlotConfig::load(Some(file.path()));

        assert!(matches!(
            result,
            Err(AnalyzerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn unreadable_file_should_fail() {
        let result = PlotConfig::load(Some(Path::new("/definitely/not/here.toml")));

        assert!(matches!(
            result,
            Err(AnalyzerError::CannotLoadConfiguration(_))
        ));
    }
}
