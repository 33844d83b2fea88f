use serde::{Deserialize, Serialize};

/// Dashboard-level aggregates over a filtered window of processed records.
///
/// Field names serialize in camelCase to match the KPI cards that consume them.
/// The `Default` value (all zeros) is what an empty window summarizes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    /// Mean market leverage ratio over the whole window.
    pub avg_market_leverage: f64,
    /// Mean margin-debt-to-money-supply ratio over the whole window.
    pub avg_money_supply_ratio: f64,
    /// Sum of annual interest cost over the last 12 records, in billions of USD.
    pub current_annual_interest_cost: f64,
    /// Mean vulnerability index over the last 12 records.
    #[serde(rename = "avgVulnerabilityIndex1Y")]
    pub avg_vulnerability_index_1y: f64,
    /// Equity index growth of the last record versus 12 records earlier.
    #[serde(rename = "sp500YoY")]
    pub sp500_yoy: f64,
    pub avg_vix: f64,
    pub avg_fed_rate: f64,
}
