//! # Marginwatch Analytics
//!
//! This crate turns a monthly macro-financial series (margin debt, S&P 500,
//! M2, fed funds rate, VIX) into the leverage and risk metrics shown on the
//! dashboard.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** No I/O. It depends only on `core-types` for the record
//!   types and on `configuration` for the scale constants.
//! - **Stateless calculation:** `MetricsProcessor` and `RegimeAnalyzer` hold
//!   only their validated parameters. Every call recomputes from its inputs,
//!   so calls are independent and safe to run concurrently.
//!
//! ## Public API
//!
//! - `rolling_z_score`: windowed z-score normalization.
//! - `MetricsProcessor`: `process_series` for derived fields and `summarize`
//!   for the KPI snapshot of a filtered window.
//! - `SummaryMetrics`: the KPI snapshot.
//! - `RegimeAnalyzer`: leverage-zone occupancy and the VIX/leverage trend.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

pub mod engine;
pub mod error;
pub mod regime;
pub mod report;
pub mod stats;

pub use engine::{MetricsProcessor, PERIODS_PER_YEAR};
pub use error::AnalyticsError;
pub use regime::{LeverageThresholds, RegimeAnalyzer, RegimeReport, ZoneCounts};
pub use report::SummaryMetrics;
pub use stats::{LinearFit, percentage_change, rolling_z_score};
