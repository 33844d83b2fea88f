use crate::error::CoreError;
use crate::structs::ProcessedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive calendar window used to pick the "filtered window" of a
/// processed series before summarizing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new range, rejecting a start date that falls after the end date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidInput(
                "date range".to_string(),
                format!("start {} is after end {}", start, end),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns the records whose date lies within the range, preserving order.
    pub fn select(&self, records: &[ProcessedRecord]) -> Vec<ProcessedRecord> {
        records
            .iter()
            .filter(|r| self.contains(r.date))
            .cloned()
            .collect()
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default(),
        }
    }
}
