use serde::{Deserialize, Serialize};

/// Risk zone of the market leverage ratio, as shaded behind the leverage chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeverageZone {
    Green,
    Yellow,
    Red,
}

impl LeverageZone {
    /// Classifies a leverage ratio against the yellow and red thresholds.
    /// Both thresholds are exclusive lower bounds of their zone.
    pub fn classify(ratio: f64, yellow: f64, red: f64) -> Self {
        if ratio > red {
            LeverageZone::Red
        } else if ratio > yellow {
            LeverageZone::Yellow
        } else {
            LeverageZone::Green
        }
    }
}

/// Five-layer banding of the vulnerability index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VulnerabilityBand {
    Minimal,
    Low,
    Moderate,
    Elevated,
    Critical,
}

impl VulnerabilityBand {
    pub fn classify(value: f64) -> Self {
        if value >= 8.0 {
            VulnerabilityBand::Critical
        } else if value >= 6.0 {
            VulnerabilityBand::Elevated
        } else if value >= 4.0 {
            VulnerabilityBand::Moderate
        } else if value >= 2.0 {
            VulnerabilityBand::Low
        } else {
            VulnerabilityBand::Minimal
        }
    }
}
