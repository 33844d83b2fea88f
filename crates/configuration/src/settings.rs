use crate::error::ConfigError;
use chrono::NaiveDate;
use core_types::DateRange;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section carries defaults, so an absent `config.toml` still yields a
/// usable configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub metrics: MetricsParams,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// The fixed scale constants and window size used by the metrics processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsParams {
    /// Rolling window (in periods) for the z-scores behind the vulnerability index.
    /// 12 matches monthly data.
    pub z_score_window: usize,
    /// Approximate index-point-to-capitalization scale. Multiplying the S&P 500
    /// level by this gives total market cap in thousands of USD.
    pub market_cap_coefficient: f64,
    /// Multiplier that brings money supply (millions of USD) into the margin
    /// debt unit (thousands of USD).
    pub money_supply_unit_factor: f64,
    /// Divisor that turns the summed interest cost (thousands of USD) into the
    /// reporting unit (billions of USD).
    pub interest_cost_reporting_divisor: f64,
}

impl Default for MetricsParams {
    fn default() -> Self {
        Self {
            z_score_window: 12,
            market_cap_coefficient: 400.0,
            money_supply_unit_factor: 1_000.0,
            interest_cost_reporting_divisor: 1_000_000.0,
        }
    }
}

/// How command output is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Filter defaults and risk thresholds mirrored from the dashboard sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// The CSV file used when no `--data` argument is given.
    pub data_path: PathBuf,
    /// Default inclusive start of the filtered window.
    pub start_date: NaiveDate,
    /// Default inclusive end of the filtered window.
    pub end_date: NaiveDate,
    /// Leverage ratio above which the market is in the yellow zone.
    pub leverage_threshold_yellow: f64,
    /// Leverage ratio above which the market is in the red zone.
    pub leverage_threshold_red: f64,
    pub output_format: OutputFormat,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        let range = DateRange::default();
        Self {
            data_path: PathBuf::from("data/market_data.csv"),
            start_date: range.start,
            end_date: range.end,
            leverage_threshold_yellow: 0.035,
            leverage_threshold_red: 0.045,
            output_format: OutputFormat::Table,
        }
    }
}

impl DashboardSettings {
    pub fn date_range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// Optional file logging. Console logging is always on and driven by `RUST_LOG`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// When set, a copy of the log is written into this directory.
    pub directory: Option<PathBuf>,
    pub file_name: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: "marginwatch.log".to_string(),
        }
    }
}

impl Config {
    /// Checks that the loaded values are logically consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.metrics;
        if m.z_score_window == 0 {
            return Err(ConfigError::ValidationError(
                "metrics.z_score_window must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("metrics.market_cap_coefficient", m.market_cap_coefficient),
            ("metrics.money_supply_unit_factor", m.money_supply_unit_factor),
            (
                "metrics.interest_cost_reporting_divisor",
                m.interest_cost_reporting_divisor,
            ),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        let d = &self.dashboard;
        if !(d.leverage_threshold_yellow >= 0.0
            && d.leverage_threshold_yellow < d.leverage_threshold_red)
        {
            return Err(ConfigError::ValidationError(format!(
                "leverage thresholds must satisfy 0 <= yellow < red (yellow={}, red={})",
                d.leverage_threshold_yellow, d.leverage_threshold_red
            )));
        }
        if d.start_date > d.end_date {
            return Err(ConfigError::ValidationError(format!(
                "dashboard.start_date {} is after dashboard.end_date {}",
                d.start_date, d.end_date
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.metrics.z_score_window, 12);
        assert_eq!(config.metrics.market_cap_coefficient, 400.0);
        assert_eq!(config.dashboard.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let mut config = Config::default();
        config.metrics.z_score_window = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_non_positive_constants_are_rejected() {
        let mut config = Config::default();
        config.metrics.money_supply_unit_factor = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.metrics.market_cap_coefficient = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds_are_rejected() {
        let mut config = Config::default();
        config.dashboard.leverage_threshold_yellow = 0.05;
        config.dashboard.leverage_threshold_red = 0.04;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_dates_are_rejected() {
        let mut config = Config::default();
        config.dashboard.start_date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(config.validate().is_err());
    }
}
