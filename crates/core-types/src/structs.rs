use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar month of source data, exactly as delivered by the ingestion layer.
///
/// Units follow the FINRA / FRED publications the dashboard is built on:
/// margin debt is quoted in thousands of USD while money supply is quoted in
/// millions of USD. Reconciling the two is the processor's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: NaiveDate,
    /// Margin debt in thousands of USD.
    #[serde(alias = "finra_D")]
    pub margin_debt: f64,
    #[serde(alias = "vix_index")]
    pub volatility_index: f64,
    #[serde(alias = "sp500_index")]
    pub equity_index_level: f64,
    /// Money supply (M2) in millions of USD.
    #[serde(alias = "m2_money_supply")]
    pub money_supply: f64,
    /// Policy rate in percentage points, e.g. 5.5 for 5.5%.
    #[serde(alias = "federal_funds_rate")]
    pub policy_rate: f64,
}

/// A raw record enriched with every derived metric the dashboard consumes.
///
/// There is exactly one `ProcessedRecord` per `RawRecord`, in the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    pub date: NaiveDate,
    /// Milliseconds since the Unix epoch at UTC midnight of `date`.
    pub timestamp: i64,

    // Raw source values, passed through for the charts.
    pub margin_debt: f64,
    pub volatility_index: f64,
    pub equity_index_level: f64,
    pub money_supply: f64,
    pub policy_rate: f64,

    // Foundational metrics (thousands of USD)
    pub market_cap: f64,
    pub investor_net_worth: f64,

    // Ratios and indices
    pub market_leverage_ratio: f64,
    pub money_supply_ratio: f64,
    pub vulnerability_index: f64,
    pub annual_interest_cost: f64,

    // Rate of change
    pub leverage_change_mom: f64,
    pub leverage_change_yoy: f64,
}

/// Converts a calendar date into epoch milliseconds at UTC midnight.
pub fn timestamp_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}
