pub mod enums;
pub mod error;
pub mod range;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{LeverageZone, VulnerabilityBand};
pub use error::CoreError;
pub use range::DateRange;
pub use structs::{ProcessedRecord, RawRecord};
