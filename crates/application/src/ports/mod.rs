//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geolocation_port;
mod weather_port;

#[cfg(test)]
pub use geolocation_port::MockGeolocationPort;
pub use geolocation_port::GeolocationPort;
#[cfg(test)]
pub use weather_port::MockWeatherLookupPort;
pub use weather_port::WeatherLookupPort;
