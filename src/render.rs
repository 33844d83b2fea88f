//! Terminal tables for each command's output.

use analytics::{RegimeReport, SummaryMetrics};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use core_types::ProcessedRecord;
use ingestion::SeriesReport;

fn new_table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

fn pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

pub fn processed_table(records: &[ProcessedRecord]) -> Table {
    let mut table = new_table([
        "Date",
        "Margin Debt ($K)",
        "Leverage",
        "M2 Ratio",
        "Vuln. Index",
        "Interest ($K)",
        "MoM",
        "YoY",
    ]);
    for r in records {
        table.add_row(vec![
            Cell::new(r.date),
            right(format!("{:.0}", r.margin_debt)),
            right(pct(r.market_leverage_ratio)),
            right(pct(r.money_supply_ratio)),
            right(format!("{:.2}", r.vulnerability_index)),
            right(format!("{:.0}", r.annual_interest_cost)),
            right(pct(r.leverage_change_mom)),
            right(pct(r.leverage_change_yoy)),
        ]);
    }
    table
}

pub fn summary_table(metrics: &SummaryMetrics) -> Table {
    let mut table = new_table(["Metric", "Value", "Basis"]);
    let rows = [
        ("Market Leverage Ratio", pct(metrics.avg_market_leverage), "Period average"),
        ("Money Supply Ratio", pct(metrics.avg_money_supply_ratio), "Margin Debt / M2"),
        (
            "Annual Interest Cost",
            format!("${:.2}B", metrics.current_annual_interest_cost),
            "Last 12 months total",
        ),
        (
            "Vulnerability Index",
            format!("{:.2}", metrics.avg_vulnerability_index_1y),
            "1Y mean risk score",
        ),
        ("S&P 500 YoY", pct(metrics.sp500_yoy), "Year over year growth"),
        ("VIX Average", format!("{:.2}", metrics.avg_vix), "Period average"),
        ("Fed Funds Rate", format!("{:.2}%", metrics.avg_fed_rate), "Period average"),
    ];
    for (label, value, basis) in rows {
        table.add_row(vec![Cell::new(label), right(value), Cell::new(basis)]);
    }
    table
}

pub fn regime_table(report: &RegimeReport) -> Table {
    let mut table = new_table(["Item", "Value"]);
    let counts = &report.zone_counts;
    table.add_row(vec!["Green months".to_string(), counts.green.to_string()]);
    table.add_row(vec!["Yellow months".to_string(), counts.yellow.to_string()]);
    table.add_row(vec!["Red months".to_string(), counts.red.to_string()]);
    table.add_row(vec![
        "Latest leverage zone".to_string(),
        report
            .latest_zone
            .map_or_else(|| "-".to_string(), |z| format!("{:?}", z)),
    ]);
    table.add_row(vec![
        "Latest vulnerability band".to_string(),
        report
            .latest_band
            .map_or_else(|| "-".to_string(), |b| format!("{:?}", b)),
    ]);
    match (&report.vix_leverage_fit, &report.trend_endpoints) {
        (Some(fit), Some([(x0, y0), (x1, y1)])) => {
            table.add_row(vec![
                "VIX/leverage slope".to_string(),
                format!("{:.6}", fit.slope),
            ]);
            table.add_row(vec![
                "VIX/leverage intercept".to_string(),
                format!("{:.6}", fit.intercept),
            ]);
            table.add_row(vec![
                "Trend line".to_string(),
                format!("({:.2}, {}) -> ({:.2}, {})", x0, pct(*y0), x1, pct(*y1)),
            ]);
        }
        _ => {
            table.add_row(vec!["VIX/leverage trend".to_string(), "n/a".to_string()]);
        }
    }
    table
}

pub fn series_table(report: &SeriesReport) -> Table {
    let mut table = new_table(["Item", "Value"]);
    let date_or_dash = |d: Option<chrono::NaiveDate>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
    table.add_row(vec!["Records".to_string(), report.records.to_string()]);
    table.add_row(vec!["First period".to_string(), date_or_dash(report.first_date)]);
    table.add_row(vec!["Last period".to_string(), date_or_dash(report.last_date)]);
    table.add_row(vec!["Gaps".to_string(), report.gaps.len().to_string()]);
    for gap in &report.gaps {
        table.add_row(vec![
            format!("  {} -> {}", gap.after, gap.before),
            format!("{} missing month(s)", gap.missing_months),
        ]);
    }
    table
}
