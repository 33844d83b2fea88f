use crate::error::IngestError;
use chrono::{Datelike, NaiveDate};
use core_types::RawRecord;
use serde::Serialize;

/// Outcome of a successful validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesReport {
    pub records: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Consecutive record pairs that skip one or more calendar months.
    pub gaps: Vec<MonthGap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthGap {
    pub after: NaiveDate,
    pub before: NaiveDate,
    pub missing_months: u32,
}

/// Checks a raw series before it reaches the metrics processor.
///
/// Rejects non-finite values, negative levels, and dates that are not strictly
/// increasing by calendar month. Missing months are reported and logged but
/// are not errors: the processor's lookbacks are positional, so a gap shifts
/// what "12 periods ago" means.
pub fn validate_series(records: &[RawRecord]) -> Result<SeriesReport, IngestError> {
    let mut report = SeriesReport {
        records: records.len(),
        first_date: records.first().map(|r| r.date),
        last_date: records.last().map(|r| r.date),
        gaps: Vec::new(),
    };

    for record in records {
        check_values(record)?;
    }

    for pair in records.windows(2) {
        let (previous, date) = (pair[0].date, pair[1].date);
        if date <= previous {
            return Err(IngestError::OutOfOrder { previous, date });
        }
        match month_index(date) - month_index(previous) {
            0 => return Err(IngestError::DuplicatePeriod { previous, date }),
            1 => {}
            step => {
                let gap = MonthGap {
                    after: previous,
                    before: date,
                    missing_months: (step - 1) as u32,
                };
                tracing::warn!(
                    after = %gap.after,
                    before = %gap.before,
                    missing_months = gap.missing_months,
                    "Gap in monthly series; period-over-period changes will span it."
                );
                report.gaps.push(gap);
            }
        }
    }

    Ok(report)
}

fn check_values(record: &RawRecord) -> Result<(), IngestError> {
    let fields = [
        ("margin_debt", record.margin_debt, false),
        ("volatility_index", record.volatility_index, true),
        ("equity_index_level", record.equity_index_level, false),
        ("money_supply", record.money_supply, false),
        // Policy rates have been negative in some jurisdictions.
        ("policy_rate", record.policy_rate, true),
    ];
    for (field, value, may_be_negative) in fields {
        if !value.is_finite() {
            return Err(IngestError::NonFinite {
                date: record.date,
                field,
            });
        }
        if !may_be_negative && value < 0.0 {
            return Err(IngestError::Negative {
                date: record.date,
                field,
                value,
            });
        }
    }
    Ok(())
}

fn month_index(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(y: i32, m: u32, d: u32) -> RawRecord {
        RawRecord {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            margin_debt: 500_000.0,
            volatility_index: 18.0,
            equity_index_level: 3_000.0,
            money_supply: 15_000.0,
            policy_rate: 1.5,
        }
    }

    #[test]
    fn test_clean_series_passes() {
        let records = vec![record(2019, 11, 1), record(2019, 12, 1), record(2020, 1, 1)];

        let report = validate_series(&records).unwrap();

        assert_eq!(report.records, 3);
        assert_eq!(report.first_date, Some(records[0].date));
        assert_eq!(report.last_date, Some(records[2].date));
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn test_empty_series_passes() {
        assert_eq!(validate_series(&[]).unwrap(), SeriesReport::default());
    }

    #[test]
    fn test_out_of_order_dates_are_rejected() {
        let records = vec![record(2020, 3, 1), record(2020, 2, 1)];
        assert!(matches!(
            validate_series(&records),
            Err(IngestError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_duplicate_dates_are_rejected() {
        let records = vec![record(2020, 3, 1), record(2020, 3, 1)];
        assert!(matches!(
            validate_series(&records),
            Err(IngestError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_two_records_in_one_month_are_rejected() {
        let records = vec![record(2020, 3, 1), record(2020, 3, 31)];
        assert!(matches!(
            validate_series(&records),
            Err(IngestError::DuplicatePeriod { .. })
        ));
    }

    #[test]
    fn test_gaps_are_reported_not_rejected() {
        let records = vec![record(2020, 1, 1), record(2020, 4, 1), record(2020, 5, 1)];

        let report = validate_series(&records).unwrap();

        assert_eq!(
            report.gaps,
            vec![MonthGap {
                after: records[0].date,
                before: records[1].date,
                missing_months: 2,
            }]
        );
    }

    #[test]
    fn test_year_boundary_is_consecutive() {
        let records = vec![record(2019, 12, 31), record(2020, 1, 1)];
        assert!(validate_series(&records).unwrap().gaps.is_empty());
    }

    #[test]
    fn test_non_finite_and_negative_values_are_rejected() {
        let mut bad = record(2020, 1, 1);
        bad.volatility_index = f64::NAN;
        assert!(matches!(
            validate_series(&[bad]),
            Err(IngestError::NonFinite { field: "volatility_index", .. })
        ));

        let mut bad = record(2020, 1, 1);
        bad.money_supply = -1.0;
        assert!(matches!(
            validate_series(&[bad]),
            Err(IngestError::Negative { field: "money_supply", .. })
        ));

        let mut ok = record(2020, 1, 1);
        ok.policy_rate = -0.25;
        assert!(validate_series(&[ok]).is_ok());
    }
}
