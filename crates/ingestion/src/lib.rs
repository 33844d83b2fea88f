//! # Marginwatch Ingestion
//!
//! Loads the monthly market data table and checks it before it reaches the
//! metrics processor. The processor itself never validates input, so this
//! crate is where unsorted dates, duplicate periods and non-numeric values
//! are caught.
//!
//! ## Public API
//!
//! - `CsvSource`: reads `RawRecord`s from a CSV file.
//! - `read_records`: the same parser over any `io::Read`.
//! - `validate_series`: the validation pass, returning a `SeriesReport`.
//! - `IngestError`: the specific error types that can be returned from this crate.

pub mod error;
pub mod source;
pub mod validation;

pub use error::IngestError;
pub use source::{CsvSource, read_records};
pub use validation::{MonthGap, SeriesReport, validate_series};
