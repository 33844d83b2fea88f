use crate::error::AnalyticsError;
use crate::report::SummaryMetrics;
use crate::stats::{mean, percentage_change, rolling_z_score};
use configuration::MetricsParams;
use core_types::structs::timestamp_millis;
use core_types::{ProcessedRecord, RawRecord};

/// Number of periods in a year of monthly data. Drives the YoY lookback and
/// the trailing-year aggregates.
pub const PERIODS_PER_YEAR: usize = 12;

/// A stateless calculator that turns raw monthly records into dashboard metrics.
///
/// The scale constants are bound at construction so that unit reconciliation
/// is explicit and can be audited from the configuration alone.
#[derive(Debug, Clone)]
pub struct MetricsProcessor {
    params: MetricsParams,
}

impl MetricsProcessor {
    /// Creates a new `MetricsProcessor`, validating that every scale constant is
    /// a positive, finite number.
    pub fn new(params: MetricsParams) -> Result<Self, AnalyticsError> {
        for (name, value) in [
            ("market_cap_coefficient", params.market_cap_coefficient),
            ("money_supply_unit_factor", params.money_supply_unit_factor),
            (
                "interest_cost_reporting_divisor",
                params.interest_cost_reporting_divisor,
            ),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalyticsError::InvalidParameters(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(Self { params })
    }

    pub fn params(&self) -> &MetricsParams {
        &self.params
    }

    /// Derives every metric for each raw record.
    ///
    /// The output has one record per input record, in the same order. Lookbacks
    /// are positional: "previous month" is index `i - 1` and "previous year" is
    /// index `i - 12`. Input is not validated; NaN values propagate.
    pub fn process_series(&self, raw: &[RawRecord], z_score_window: usize) -> Vec<ProcessedRecord> {
        if raw.is_empty() {
            return Vec::new();
        }

        let margin_debt: Vec<f64> = raw.iter().map(|r| r.margin_debt).collect();
        let volatility: Vec<f64> = raw.iter().map(|r| r.volatility_index).collect();
        let margin_debt_z = rolling_z_score(&margin_debt, z_score_window);
        let volatility_z = rolling_z_score(&volatility, z_score_window);

        tracing::debug!(
            records = raw.len(),
            z_score_window,
            "Processing raw market series."
        );

        raw.iter()
            .enumerate()
            .map(|(i, r)| {
                let market_cap = r.equity_index_level * self.params.market_cap_coefficient;
                let reconciled_money_supply = r.money_supply * self.params.money_supply_unit_factor;

                let prev_month = i.checked_sub(1).map(|j| margin_debt[j]);
                let prev_year = i.checked_sub(PERIODS_PER_YEAR).map(|j| margin_debt[j]);

                ProcessedRecord {
                    date: r.date,
                    timestamp: timestamp_millis(r.date),
                    margin_debt: r.margin_debt,
                    volatility_index: r.volatility_index,
                    equity_index_level: r.equity_index_level,
                    money_supply: r.money_supply,
                    policy_rate: r.policy_rate,
                    market_cap,
                    investor_net_worth: market_cap - r.margin_debt,
                    market_leverage_ratio: safe_ratio(r.margin_debt, market_cap),
                    money_supply_ratio: safe_ratio(r.margin_debt, reconciled_money_supply),
                    vulnerability_index: margin_debt_z[i] - volatility_z[i],
                    annual_interest_cost: r.margin_debt * (r.policy_rate / 100.0),
                    leverage_change_mom: percentage_change(r.margin_debt, prev_month),
                    leverage_change_yoy: percentage_change(r.margin_debt, prev_year),
                }
            })
            .collect()
    }

    /// Reduces an already-filtered window of processed records to the KPI snapshot.
    ///
    /// Averages of leverage, money supply ratio, VIX and policy rate cover the
    /// whole window. The vulnerability average and the interest cost sum cover
    /// only the last 12 records (or the whole window if it is shorter).
    pub fn summarize(&self, data: &[ProcessedRecord]) -> SummaryMetrics {
        let Some(last) = data.last() else {
            return SummaryMetrics::default();
        };
        let n = data.len();
        let last_year = &data[n.saturating_sub(PERIODS_PER_YEAR)..];
        let reference = if n > PERIODS_PER_YEAR {
            &data[n - PERIODS_PER_YEAR - 1]
        } else {
            &data[0]
        };

        let vulnerability: Vec<f64> = last_year.iter().map(|r| r.vulnerability_index).collect();
        let interest_cost: f64 = last_year.iter().map(|r| r.annual_interest_cost).sum();

        SummaryMetrics {
            avg_market_leverage: average_of(data, |r| r.market_leverage_ratio),
            avg_money_supply_ratio: average_of(data, |r| r.money_supply_ratio),
            current_annual_interest_cost: interest_cost
                / self.params.interest_cost_reporting_divisor,
            avg_vulnerability_index_1y: mean(&vulnerability),
            sp500_yoy: percentage_change(
                last.equity_index_level,
                Some(reference.equity_index_level),
            ),
            avg_vix: average_of(data, |r| r.volatility_index),
            avg_fed_rate: average_of(data, |r| r.policy_rate),
        }
    }
}

fn average_of(data: &[ProcessedRecord], field: impl Fn(&ProcessedRecord) -> f64) -> f64 {
    mean(&data.iter().map(field).collect::<Vec<_>>())
}

/// Divides `numerator` by `denominator`, yielding zero for a non-positive denominator.
fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
