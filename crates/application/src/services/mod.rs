//! Application services - Use case implementations

mod pressure_history;
mod pressure_simulator;
mod weather_service;

pub use pressure_history::{
    FnObserver, HistorySummary, PressureHistory, PressureObserver, SubscriptionId,
};
pub use pressure_simulator::{
    BASE_PRESSURE_HPA, FLUCTUATION_RANGE_HPA, MAX_PRESSURE_HPA, MIN_PRESSURE_HPA, NoiseSource,
    PressureSimulator, REENTRY_SPREAD_HPA, RngNoise, SIMULATION_INTERVAL, classify, tick,
};
pub use weather_service::{
    DEFAULT_LOCATION, FETCH_FAILED_MESSAGE, GEOLOCATION_FAILED_MESSAGE,
    GEOLOCATION_UNSUPPORTED_MESSAGE, UNEXPECTED_ERROR_MESSAGE, WeatherPanelState, WeatherService,
};
