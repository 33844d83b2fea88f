use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Analytics parameters are invalid: {0}")]
    InvalidParameters(String),
}
