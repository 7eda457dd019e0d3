//! Entities - Domain objects produced and consumed by the widgets

mod condition;
mod pressure;
mod weather_report;

pub use condition::{ConditionCategory, ConditionMatch, classify_summary};
pub use pressure::{
    HIGH_PRESSURE_THRESHOLD_HPA, LOW_PRESSURE_THRESHOLD_HPA, PressureSample, PressureUpdate,
    TrendLabel,
};
pub use weather_report::{GroundingSource, WeatherQuery, WeatherReport};
