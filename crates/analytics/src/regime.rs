use crate::error::AnalyticsError;
use crate::stats::{linear_fit, LinearFit};
use core_types::{LeverageZone, ProcessedRecord, VulnerabilityBand};
use serde::{Deserialize, Serialize};

/// Leverage ratio thresholds separating the green, yellow and red zones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeverageThresholds {
    pub yellow: f64,
    pub red: f64,
}

/// How many records of a window fall in each leverage zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCounts {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
}

/// Regime view of a filtered window: risk-zone occupancy plus the
/// VIX-versus-leverage trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeReport {
    pub zone_counts: ZoneCounts,
    pub latest_zone: Option<LeverageZone>,
    pub latest_band: Option<VulnerabilityBand>,
    /// Least-squares fit of leverage ratio (y) on VIX (x).
    pub vix_leverage_fit: Option<LinearFit>,
    /// Trend line endpoints at the minimum and maximum observed VIX.
    pub trend_endpoints: Option<[(f64, f64); 2]>,
}

#[derive(Debug, Clone)]
pub struct RegimeAnalyzer {
    thresholds: LeverageThresholds,
}

impl RegimeAnalyzer {
    /// Creates a new `RegimeAnalyzer`, requiring `0 <= yellow < red`.
    pub fn new(thresholds: LeverageThresholds) -> Result<Self, AnalyticsError> {
        if !(thresholds.yellow >= 0.0 && thresholds.yellow < thresholds.red) {
            return Err(AnalyticsError::InvalidParameters(format!(
                "leverage thresholds must satisfy 0 <= yellow < red (yellow={}, red={})",
                thresholds.yellow, thresholds.red
            )));
        }
        Ok(Self { thresholds })
    }

    pub fn zone(&self, leverage_ratio: f64) -> LeverageZone {
        LeverageZone::classify(leverage_ratio, self.thresholds.yellow, self.thresholds.red)
    }

    pub fn analyze(&self, data: &[ProcessedRecord]) -> RegimeReport {
        let mut zone_counts = ZoneCounts::default();
        for record in data {
            match self.zone(record.market_leverage_ratio) {
                LeverageZone::Green => zone_counts.green += 1,
                LeverageZone::Yellow => zone_counts.yellow += 1,
                LeverageZone::Red => zone_counts.red += 1,
            }
        }

        let points: Vec<(f64, f64)> = data
            .iter()
            .map(|r| (r.volatility_index, r.market_leverage_ratio))
            .collect();
        let vix_leverage_fit = linear_fit(&points);

        let trend_endpoints = vix_leverage_fit.map(|fit| {
            let (min_x, max_x) = points
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| {
                    (lo.min(x), hi.max(x))
                });
            [(min_x, fit.predict(min_x)), (max_x, fit.predict(max_x))]
        });

        let latest = data.last();
        if let Some(fit) = &vix_leverage_fit {
            tracing::debug!(slope = fit.slope, intercept = fit.intercept, "VIX/leverage trend fitted.");
        }

        RegimeReport {
            zone_counts,
            latest_zone: latest.map(|r| self.zone(r.market_leverage_ratio)),
            latest_band: latest.map(|r| VulnerabilityBand::classify(r.vulnerability_index)),
            vix_leverage_fit,
            trend_endpoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Months, NaiveDate};
    use core_types::structs::timestamp_millis;

    fn analyzer() -> RegimeAnalyzer {
        RegimeAnalyzer::new(LeverageThresholds {
            yellow: 0.035,
            red: 0.045,
        })
        .unwrap()
    }

    fn record(i: u32, vix: f64, leverage: f64, vulnerability: f64) -> ProcessedRecord {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Months::new(i);
        ProcessedRecord {
            date,
            timestamp: timestamp_millis(date),
            margin_debt: 0.0,
            volatility_index: vix,
            equity_index_level: 0.0,
            money_supply: 0.0,
            policy_rate: 0.0,
            market_cap: 0.0,
            investor_net_worth: 0.0,
            market_leverage_ratio: leverage,
            money_supply_ratio: 0.0,
            vulnerability_index: vulnerability,
            annual_interest_cost: 0.0,
            leverage_change_mom: 0.0,
            leverage_change_yoy: 0.0,
        }
    }

    #[test]
    fn test_new_rejects_inverted_thresholds() {
        let result = RegimeAnalyzer::new(LeverageThresholds {
            yellow: 0.05,
            red: 0.05,
        });
        assert!(matches!(result, Err(AnalyticsError::InvalidParameters(_))));
    }

    #[test]
    fn test_empty_window() {
        let report = analyzer().analyze(&[]);
        assert_eq!(report.zone_counts, ZoneCounts::default());
        assert!(report.latest_zone.is_none());
        assert!(report.latest_band.is_none());
        assert!(report.vix_leverage_fit.is_none());
        assert!(report.trend_endpoints.is_none());
    }

    #[test]
    fn test_zone_counts_and_latest_state() {
        let data = vec![
            record(0, 30.0, 0.020, 0.0),
            record(1, 25.0, 0.040, 1.0),
            record(2, 20.0, 0.042, 3.0),
            record(3, 15.0, 0.050, 9.5),
        ];

        let report = analyzer().analyze(&data);

        assert_eq!(
            report.zone_counts,
            ZoneCounts {
                green: 1,
                yellow: 2,
                red: 1
            }
        );
        assert_eq!(report.latest_zone, Some(LeverageZone::Red));
        assert_eq!(report.latest_band, Some(VulnerabilityBand::Critical));
    }

    #[test]
    fn test_trend_line_spans_observed_vix() {
        // leverage = 0.06 - 0.001 * vix
        let data: Vec<_> = [12.0, 18.0, 25.0, 40.0]
            .iter()
            .enumerate()
            .map(|(i, &vix)| record(i as u32, vix, 0.06 - 0.001 * vix, 0.0))
            .collect();

        let report = analyzer().analyze(&data);

        let fit = report.vix_leverage_fit.unwrap();
        assert_relative_eq!(fit.slope, -0.001, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 0.06, epsilon = 1e-12);

        let [(x0, y0), (x1, y1)] = report.trend_endpoints.unwrap();
        assert_eq!((x0, x1), (12.0, 40.0));
        assert_relative_eq!(y0, 0.048, epsilon = 1e-12);
        assert_relative_eq!(y1, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_vix_has_no_trend() {
        let data = vec![record(0, 20.0, 0.03, 0.0), record(1, 20.0, 0.04, 0.0)];
        let report = analyzer().analyze(&data);
        assert!(report.vix_leverage_fit.is_none());
        assert!(report.trend_endpoints.is_none());
        assert_eq!(report.zone_counts.green + report.zone_counts.yellow, 2);
    }
}
