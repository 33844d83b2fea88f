use crate::error::IngestError;
use core_types::RawRecord;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A CSV file of monthly market data, one row per period, dates ascending.
///
/// Expected columns are `date, margin_debt, volatility_index,
/// equity_index_level, money_supply, policy_rate`. The source publication
/// headers (`finra_D`, `vix_index`, `sp500_index`, `m2_money_supply`,
/// `federal_funds_rate`) are accepted too. Column order does not matter and
/// extra columns are ignored.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every row of the file.
    pub fn load(&self) -> Result<Vec<RawRecord>, IngestError> {
        let file = File::open(&self.path)?;
        let records = read_records(file)?;
        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded market data."
        );
        Ok(records)
    }
}

/// Parses CSV rows from any reader.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records = reader
        .deserialize::<RawRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}
