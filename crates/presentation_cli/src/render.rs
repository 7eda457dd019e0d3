//! Terminal rendering for pressure readouts and the weather panel

use std::io::Write;

use application::{HistorySummary, PressureObserver, WeatherPanelState};
use domain::{PressureUpdate, TrendLabel};
use tracing::warn;

/// Marker shown next to the trend label
const fn trend_marker(trend: TrendLabel) -> &'static str {
    match trend {
        TrendLabel::Low => "▼",
        TrendLabel::Stable => "●",
        TrendLabel::High => "▲",
    }
}

/// One readout line: pressure rounded to whole hPa plus the trend
pub fn format_pressure(value: f64, trend: TrendLabel) -> String {
    format!("{:>4.0} hPa  {} {trend}", value.round(), trend_marker(trend))
}

pub fn format_readout(update: &PressureUpdate) -> String {
    format_pressure(update.sample.value(), update.trend)
}

pub fn format_summary(summary: &HistorySummary) -> String {
    format!(
        "📈 {} lecturas · mín {:.1} · máx {:.1} · media {:.1} hPa",
        summary.count, summary.min, summary.max, summary.mean
    )
}

/// Icon, label, summary and source links of a finished lookup
pub fn format_weather(state: &WeatherPanelState) -> String {
    if let Some(error) = &state.error {
        return format!("❌ {error}");
    }

    let mut out = format!("{} {}", state.condition.emoji(), state.display_text());

    if let Some(coordinates) = &state.coordinates {
        out.push_str(&format!("  ({coordinates})"));
    }

    if let Some(report) = &state.report {
        out.push_str("\n\n");
        out.push_str(report.summary.trim());

        if !report.sources.is_empty() {
            out.push_str("\n\nFuentes:");
            for source in &report.sources {
                out.push_str(&format!("\n  - {}: {}", source.label(), source.uri));
            }
        }
    }

    out
}

/// Prints every pressure update to stdout as it is published
#[derive(Debug, Clone, Copy)]
pub struct ReadoutPrinter {
    json: bool,
}

impl ReadoutPrinter {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }
}

impl PressureObserver for ReadoutPrinter {
    fn on_update(&self, update: &PressureUpdate) {
        let line = if self.json {
            match serde_json::to_string(update) {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Failed to serialize pressure update");
                    return;
                },
            }
        } else {
            format_readout(update)
        };

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{line}") {
            warn!(error = %e, "Failed to write readout");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::{FETCH_FAILED_MESSAGE, PressureHistory};
    use chrono::Utc;
    use domain::{ConditionCategory, GroundingSource, PressureSample, WeatherReport};

    fn sample(value: f64) -> PressureUpdate {
        PressureUpdate::new(PressureSample::new(value, Utc::now()))
    }

    #[test]
    fn readout_rounds_to_whole_hpa() {
        assert_eq!(format_readout(&sample(1013.25)), "1013 hPa  ● ESTABLE");
        assert_eq!(format_readout(&sample(1008.6)), "1009 hPa  ▼ BAJA");
        assert_eq!(format_readout(&sample(1016.0)), "1016 hPa  ▲ ALTA");
        assert_eq!(format_readout(&sample(999.4)), " 999 hPa  ▼ BAJA");
    }

    #[test]
    fn initial_readout_is_stable() {
        assert_eq!(
            format_pressure(1013.25, TrendLabel::from_hpa(1013.25)),
            "1013 hPa  ● ESTABLE"
        );
    }

    #[test]
    fn summary_line() {
        let history = PressureHistory::new();
        history.append(sample(1010.0).sample);
        history.append(sample(1012.0).sample);
        let line = format_summary(&history.summary().unwrap());
        assert!(line.contains("2 lecturas"));
        assert!(line.contains("media 1011.0"));
    }

    #[test]
    fn weather_with_sources() {
        let state = WeatherPanelState {
            loading: false,
            report: Some(WeatherReport::new(
                "Soleado, 28°C.",
                vec![
                    GroundingSource::new("https://www.aemet.es", Some("AEMET".to_string())),
                    GroundingSource::new("https://meteo.example", None),
                ],
            )),
            condition: ConditionCategory::Sunny,
            error: None,
            coordinates: None,
        };

        let text = format_weather(&state);
        assert!(text.starts_with("☀️ Soleado"));
        assert!(text.contains("Soleado, 28°C."));
        assert!(text.contains("  - AEMET: https://www.aemet.es"));
        assert!(text.contains("  - https://meteo.example: https://meteo.example"));
    }

    #[test]
    fn weather_error() {
        let state = WeatherPanelState {
            error: Some(FETCH_FAILED_MESSAGE.to_string()),
            condition: ConditionCategory::Unknown,
            ..WeatherPanelState::default()
        };
        assert_eq!(format_weather(&state), format!("❌ {FETCH_FAILED_MESSAGE}"));
    }
}
