//! Pressure readings and trend classification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Readings at or below this value (hPa) are labelled [`TrendLabel::Low`]
pub const LOW_PRESSURE_THRESHOLD_HPA: f64 = 1009.0;

/// Readings at or above this value (hPa) are labelled [`TrendLabel::High`]
pub const HIGH_PRESSURE_THRESHOLD_HPA: f64 = 1016.0;

/// A single simulated pressure reading
///
/// Immutable once created; history stores keep these in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureSample {
    value: f64,
    observed_at: DateTime<Utc>,
}

impl PressureSample {
    #[must_use]
    pub const fn new(value: f64, observed_at: DateTime<Utc>) -> Self {
        Self { value, observed_at }
    }

    /// Pressure in hPa
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// Trend label for this reading
    #[must_use]
    pub fn trend(&self) -> TrendLabel {
        TrendLabel::from_hpa(self.value)
    }
}

/// Coarse three-way classification of the current pressure
///
/// The band is deliberately asymmetric around the 1013.25 hPa baseline:
/// `<= 1009` is low, `>= 1016` is high, everything in between is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Low,
    Stable,
    High,
}

impl TrendLabel {
    /// Classify a pressure value in hPa
    ///
    /// Total over all inputs; NaN falls through to `Stable`.
    #[must_use]
    pub fn from_hpa(value: f64) -> Self {
        if value <= LOW_PRESSURE_THRESHOLD_HPA {
            Self::Low
        } else if value >= HIGH_PRESSURE_THRESHOLD_HPA {
            Self::High
        } else {
            Self::Stable
        }
    }

    /// Spanish readout text
    #[must_use]
    pub const fn display_text(&self) -> &'static str {
        match self {
            Self::Low => "BAJA",
            Self::Stable => "ESTABLE",
            Self::High => "ALTA",
        }
    }

    /// Colour role used by the readout
    #[must_use]
    pub const fn color_hint(&self) -> &'static str {
        match self {
            Self::Low => "danger",
            Self::Stable => "neutral",
            Self::High => "green",
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

/// Event published after every simulator tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureUpdate {
    pub sample: PressureSample,
    pub trend: TrendLabel,
}

impl PressureUpdate {
    #[must_use]
    pub fn new(sample: PressureSample) -> Self {
        Self {
            sample,
            trend: sample.trend(),
        }
    }
}
