//! Weather panel service
//!
//! Owns the state of the weather lookup view: whether a lookup is in flight,
//! the last report, its classified condition and the user-facing error.
//! Failures never escape as `Err`; they become a generic Spanish message in
//! the state, the way the panel shows them.

use std::sync::Arc;

use domain::{ConditionCategory, GeoLocation, WeatherQuery, WeatherReport};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{GeolocationPort, WeatherLookupPort};

/// City looked up when the user has not typed anything yet
pub const DEFAULT_LOCATION: &str = "Madrid";

/// Shown when the remote lookup (or its configuration) failed
pub const FETCH_FAILED_MESSAGE: &str =
    "No se pudo obtener el pronóstico del tiempo. Inténtalo de nuevo.";

/// Shown for any other failure during a lookup
pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "Ocurrió un error al buscar el clima. Por favor, inténtalo más tarde.";

pub const GEOLOCATION_FAILED_MESSAGE: &str = "No se pudo obtener tu ubicación. Por favor, introduce una ciudad manualmente o revisa los permisos de ubicación.";

pub const GEOLOCATION_UNSUPPORTED_MESSAGE: &str = "Tu dispositivo no soporta la geolocalización.";

/// Snapshot of the weather panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherPanelState {
    pub loading: bool,
    pub report: Option<WeatherReport>,
    pub condition: ConditionCategory,
    pub error: Option<String>,
    pub coordinates: Option<GeoLocation>,
}

impl Default for WeatherPanelState {
    fn default() -> Self {
        Self {
            loading: false,
            report: None,
            condition: ConditionCategory::Loading,
            error: None,
            coordinates: None,
        }
    }
}

impl WeatherPanelState {
    /// Label shown under the condition icon
    #[must_use]
    pub const fn display_text(&self) -> &'static str {
        self.condition.display_text()
    }
}

/// Drives weather lookups and keeps the resulting panel state
pub struct WeatherService {
    lookup: Arc<dyn WeatherLookupPort>,
    geolocation: Option<Arc<dyn GeolocationPort>>,
    state: RwLock<WeatherPanelState>,
}

impl std::fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherService")
            .field("has_geolocation", &self.geolocation.is_some())
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a service without a position source
    pub fn new(lookup: Arc<dyn WeatherLookupPort>) -> Self {
        Self {
            lookup,
            geolocation: None,
            state: RwLock::new(WeatherPanelState::default()),
        }
    }

    /// Attach a position source for "use my location" lookups
    #[must_use]
    pub fn with_geolocation(mut self, geolocation: Arc<dyn GeolocationPort>) -> Self {
        self.geolocation = Some(geolocation);
        self
    }

    /// Current panel state (owned copy)
    #[must_use]
    pub fn state(&self) -> WeatherPanelState {
        self.state.read().clone()
    }

    /// Whether the submit action is enabled for the given input
    #[must_use]
    pub fn can_submit(&self, text: &str) -> bool {
        !self.state.read().loading && !text.trim().is_empty()
    }

    /// Look up the weather for a typed location
    ///
    /// Ignored while another lookup is in flight or when `text` is blank;
    /// the returned state is then the unchanged current one.
    #[instrument(skip(self))]
    pub async fn lookup_location(&self, text: &str) -> WeatherPanelState {
        let Ok(query) = WeatherQuery::for_location(text) else {
            debug!("Ignoring blank location");
            return self.state();
        };

        if !self.begin_loading() {
            debug!("Lookup already in flight, ignoring request");
            return self.state();
        }

        self.run_lookup(query).await
    }

    /// Look up the weather at the device's current position
    ///
    /// `near` is an optional place name passed along as a hint.
    #[instrument(skip(self))]
    pub async fn lookup_current_position(&self, near: Option<&str>) -> WeatherPanelState {
        if !self.begin_loading() {
            debug!("Lookup already in flight, ignoring request");
            return self.state();
        }

        let Some(geolocation) = self.geolocation.clone() else {
            warn!("No geolocation source configured");
            return self.finish(Err(GEOLOCATION_UNSUPPORTED_MESSAGE));
        };

        match geolocation.current_position().await {
            Ok(coordinates) => {
                info!(%coordinates, "Resolved current position");
                self.state.write().coordinates = Some(coordinates);
                let query = WeatherQuery::for_coordinates(coordinates).near(near.unwrap_or_default());
                self.run_lookup(query).await
            },
            Err(e) => {
                warn!(error = %e, "Failed to resolve current position");
                self.finish(Err(GEOLOCATION_FAILED_MESSAGE))
            },
        }
    }

    /// Atomically flip into the loading state; `false` if already loading
    fn begin_loading(&self) -> bool {
        let mut state = self.state.write();
        if state.loading {
            return false;
        }
        state.loading = true;
        state.error = None;
        state.report = None;
        state.condition = ConditionCategory::Loading;
        true
    }

    async fn run_lookup(&self, query: WeatherQuery) -> WeatherPanelState {
        match self.lookup.fetch_weather(&query).await {
            Ok(report) => {
                debug!(sources = report.sources.len(), "Weather lookup succeeded");
                self.finish(Ok(report))
            },
            Err(e) => {
                warn!(error = %e, "Weather lookup failed");
                self.finish(Err(user_message(&e)))
            },
        }
    }

    fn finish(&self, outcome: Result<WeatherReport, &str>) -> WeatherPanelState {
        let mut state = self.state.write();
        state.loading = false;
        match outcome {
            Ok(report) => {
                state.condition = ConditionCategory::classify(&report.summary);
                state.report = Some(report);
                state.error = None;
            },
            Err(message) => {
                state.condition = ConditionCategory::Unknown;
                state.report = None;
                state.error = Some(message.to_string());
            },
        }
        state.clone()
    }
}

const fn user_message(error: &ApplicationError) -> &'static str {
    if error.is_lookup_failure() {
        FETCH_FAILED_MESSAGE
    } else {
        UNEXPECTED_ERROR_MESSAGE
    }
}
