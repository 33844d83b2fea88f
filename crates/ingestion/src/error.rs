use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to open data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse market data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Field '{field}' of the {date} record is not a finite number.")]
    NonFinite { date: NaiveDate, field: &'static str },

    #[error("Field '{field}' of the {date} record is negative ({value}).")]
    Negative {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },

    #[error("Record dated {date} does not come after the previous record ({previous}).")]
    OutOfOrder { previous: NaiveDate, date: NaiveDate },

    #[error("Records dated {previous} and {date} fall in the same month.")]
    DuplicatePeriod { previous: NaiveDate, date: NaiveDate },
}
