//! Forecast request and the Spanish prompt sent for it

use crate::models::LatLng;

const PROMPT_INSTRUCTIONS: &str = "Describe las condiciones generales en una o dos palabras clave principales (por ejemplo, Soleado, Nublado, Lluvia, Nieve) al principio de tu resumen. Incluye también temperatura y pronóstico para las próximas 24 horas si es posible.";

/// What the model should forecast for
///
/// With coordinates the location text is only a hint; without them it is
/// the subject of the prompt and must not be blank.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastRequest {
    pub location: Option<String>,
    pub coordinates: Option<LatLng>,
}

impl ForecastRequest {
    pub fn for_location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            coordinates: None,
        }
    }

    #[must_use]
    pub const fn for_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            location: None,
            coordinates: Some(LatLng {
                latitude,
                longitude,
            }),
        }
    }

    #[must_use]
    pub fn near(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Location text with surrounding whitespace removed, if non-blank
    fn location_text(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether the request names something to forecast for
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.coordinates.is_some() || self.location_text().is_some()
    }

    /// Render the prompt text
    #[must_use]
    pub fn prompt(&self) -> String {
        match (self.coordinates, self.location_text()) {
            (Some(c), Some(near)) => format!(
                "Dime el pronóstico del tiempo en tiempo real para la ubicación con latitud {} y longitud {} (cerca de {near}). {PROMPT_INSTRUCTIONS}",
                c.latitude, c.longitude
            ),
            (Some(c), None) => format!(
                "Dime el pronóstico del tiempo en tiempo real para la ubicación con latitud {} y longitud {}. {PROMPT_INSTRUCTIONS}",
                c.latitude, c.longitude
            ),
            (None, location) => format!(
                "Dime el pronóstico del tiempo en tiempo real para {}. {PROMPT_INSTRUCTIONS}",
                location.unwrap_or_default()
            ),
        }
    }
}
