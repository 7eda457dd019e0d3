//! Weather condition categories and the keyword classifier
//!
//! Weather summaries come back as free Spanish text. The classifier scans
//! them for a small set of keywords and picks the first category that
//! matches, in a fixed priority order. Summaries often mention several
//! conditions ("nublado con tormenta"), so the order decides the icon.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse weather category used to pick an icon and a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    /// A lookup is in flight
    Loading,
    #[default]
    Unknown,
}

impl ConditionCategory {
    /// Classify a free-text summary
    #[must_use]
    pub fn classify(summary: &str) -> Self {
        classify_summary(summary).category
    }

    /// Spanish label shown under the icon
    #[must_use]
    pub const fn display_text(&self) -> &'static str {
        match self {
            Self::Sunny => "Soleado",
            Self::Cloudy => "Nublado",
            Self::Rainy => "Lluvia",
            Self::Snowy => "Nieve",
            Self::Stormy => "Tormenta",
            Self::Loading => "Cargando...",
            Self::Unknown => "Desconocido",
        }
    }

    /// Accessible description of the icon
    #[must_use]
    pub const fn icon_label(&self) -> &'static str {
        match self {
            Self::Unknown => "Condición desconocida",
            other => other.display_text(),
        }
    }

    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Sunny => "☀️",
            Self::Cloudy => "☁️",
            Self::Rainy => "🌧️",
            Self::Snowy => "❄️",
            Self::Stormy => "⛈️",
            Self::Loading => "⏳",
            Self::Unknown => "❓",
        }
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

/// Keyword groups in priority order; first match wins
const KEYWORD_RULES: &[(&[&str], ConditionCategory)] = &[
    (&["soleado", "despejado"], ConditionCategory::Sunny),
    (&["nublado", "nubes"], ConditionCategory::Cloudy),
    (&["lluvia", "chubascos"], ConditionCategory::Rainy),
    (&["nieve", "nevada"], ConditionCategory::Snowy),
    (&["tormenta"], ConditionCategory::Stormy),
];

/// Keywords accepted by the start-of-text fallback ("nubes" is not one of them)
const LEADING_KEYWORDS: &[(&str, ConditionCategory)] = &[
    ("soleado", ConditionCategory::Sunny),
    ("despejado", ConditionCategory::Sunny),
    ("nublado", ConditionCategory::Cloudy),
    ("lluvia", ConditionCategory::Rainy),
    ("chubascos", ConditionCategory::Rainy),
    ("nieve", ConditionCategory::Snowy),
    ("nevada", ConditionCategory::Snowy),
    ("tormenta", ConditionCategory::Stormy),
];

/// Classification result together with the keyword that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionMatch {
    pub category: ConditionCategory,
    pub keyword: Option<&'static str>,
}

impl ConditionMatch {
    const fn unknown() -> Self {
        Self {
            category: ConditionCategory::Unknown,
            keyword: None,
        }
    }
}

/// Classify a weather summary, keeping the matched keyword
///
/// Total over all inputs: empty or unmatched text yields `Unknown`.
#[must_use]
pub fn classify_summary(summary: &str) -> ConditionMatch {
    if summary.is_empty() {
        return ConditionMatch::unknown();
    }

    let lower = summary.to_lowercase();

    for (keywords, category) in KEYWORD_RULES {
        if let Some(keyword) = keywords.iter().find(|k| lower.contains(*k)) {
            return ConditionMatch {
                category: *category,
                keyword: Some(*keyword),
            };
        }
    }

    LEADING_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.starts_with(keyword))
        .map_or_else(ConditionMatch::unknown, |(keyword, category)| {
            ConditionMatch {
                category: *category,
                keyword: Some(*keyword),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_is_unknown() {
        assert_eq!(ConditionCategory::classify(""), ConditionCategory::Unknown);
    }

    #[test]
    fn sunny_summary() {
        assert_eq!(
            ConditionCategory::classify("Cielo soleado con algo de viento"),
            ConditionCategory::Sunny
        );
    }

    #[test]
    fn rainy_summary() {
        assert_eq!(
            ConditionCategory::classify("Lluvia y chubascos intensos"),
            ConditionCategory::Rainy
        );
    }

    #[test]
    fn cloudy_beats_stormy() {
        assert_eq!(
            ConditionCategory::classify("nublado con tormenta eléctrica"),
            ConditionCategory::Cloudy
        );
    }

    #[test]
    fn sunny_beats_everything() {
        assert_eq!(
            ConditionCategory::classify("Nieve por la mañana, despejado por la tarde"),
            ConditionCategory::Sunny
        );
    }

    #[test]
    fn snow_and_storm() {
        assert_eq!(
            ConditionCategory::classify("Nevada débil"),
            ConditionCategory::Snowy
        );
        assert_eq!(
            ConditionCategory::classify("TORMENTA con granizo"),
            ConditionCategory::Stormy
        );
    }

    #[test]
    fn unmatched_summary_is_unknown() {
        assert_eq!(
            ConditionCategory::classify("Niebla densa en el valle"),
            ConditionCategory::Unknown
        );
    }

    #[test]
    fn match_keeps_keyword() {
        let m = classify_summary("Intervalos de nubes y claros");
        assert_eq!(m.category, ConditionCategory::Cloudy);
        assert_eq!(m.keyword, Some("nubes"));
        assert_eq!(m.category.display_text(), "Nublado");

        let m = classify_summary("Chubascos dispersos");
        assert_eq!(m.keyword, Some("chubascos"));
        assert_eq!(m.category.display_text(), "Lluvia");
    }

    #[test]
    fn unknown_match_display() {
        let m = classify_summary("Calima");
        assert_eq!(m.keyword, None);
        assert_eq!(m.category.display_text(), "Desconocido");
    }

    #[test]
    fn display_texts() {
        assert_eq!(ConditionCategory::Sunny.display_text(), "Soleado");
        assert_eq!(ConditionCategory::Cloudy.display_text(), "Nublado");
        assert_eq!(ConditionCategory::Rainy.display_text(), "Lluvia");
        assert_eq!(ConditionCategory::Snowy.display_text(), "Nieve");
        assert_eq!(ConditionCategory::Stormy.display_text(), "Tormenta");
        assert_eq!(ConditionCategory::Loading.display_text(), "Cargando...");
        assert_eq!(ConditionCategory::Unknown.display_text(), "Desconocido");
    }

    #[test]
    fn icon_labels() {
        assert_eq!(ConditionCategory::Unknown.icon_label(), "Condición desconocida");
        assert_eq!(ConditionCategory::Rainy.icon_label(), "Lluvia");
        assert_eq!(ConditionCategory::Stormy.emoji(), "⛈️");
    }

    #[test]
    fn default_is_unknown() {
        assert_eq!(ConditionCategory::default(), ConditionCategory::Unknown);
    }
}
