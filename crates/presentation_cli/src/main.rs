//! Clima CLI
//!
//! Terminal front end for the pressure simulator and the weather lookup.

#![allow(clippy::print_stdout)]

mod render;
mod tasks;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use application::{
    BASE_PRESSURE_HPA, PressureHistory, PressureSimulator, RngNoise, SIMULATION_INTERVAL,
    WeatherPanelState, WeatherService,
};
use clap::{Parser, Subcommand};
use domain::{GeoLocation, TrendLabel};
use infrastructure::{
    AppConfig, ConfiguredGeolocationAdapter, GeminiWeatherAdapter, init_telemetry,
};
use tracing::{info, warn};

use crate::render::{ReadoutPrinter, format_pressure, format_summary, format_weather};
use crate::tasks::spawn_pressure_ticker;

/// Fallback variable for the Gemini key when `GEMINI_API_KEY` is unset
const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Clima CLI
#[derive(Debug, Parser)]
#[command(name = "clima-cli")]
#[command(author, version, about = "Barometric pressure simulator and weather lookup", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the pressure simulation and print every reading
    ///
    /// A new reading is produced every 1.5 seconds. Without `--ticks` it
    /// runs until interrupted with Ctrl-C.
    Pressure {
        /// Stop after this many readings
        #[arg(short = 'n', long)]
        ticks: Option<u64>,

        /// Seed for a reproducible walk (overrides `simulation.seed`)
        #[arg(long)]
        seed: Option<u64>,

        /// Print readings as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Look up the current weather
    ///
    /// Without a location the configured default city is used.
    Weather {
        /// City or place to look up
        location: Option<String>,

        /// Use the current position instead of a typed location
        #[arg(long)]
        here: bool,

        /// Latitude for `--here` (overrides `location.coordinates`)
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,

        /// Longitude for `--here` (overrides `location.coordinates`)
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,

        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Print the panel state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration with secrets redacted
    Config,
}

/// Map CLI verbosity level to a log filter string
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => AppConfig::load().context("failed to load configuration"),
    }
}

/// Coordinates from `--lat/--lon`, falling back to the configured ones
fn resolve_coordinates(
    config: &AppConfig,
    lat: Option<f64>,
    lon: Option<f64>,
) -> anyhow::Result<ConfiguredGeolocationAdapter> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            let position = GeoLocation::new(lat, lon)?;
            Ok(ConfiguredGeolocationAdapter::new(Some(position)))
        },
        _ => Ok(ConfiguredGeolocationAdapter::from_config(&config.location)),
    }
}

async fn run_pressure(
    config: &AppConfig,
    ticks: Option<u64>,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let history = PressureHistory::new_shared();
    history.subscribe(Arc::new(ReadoutPrinter::new(json)));

    let noise = match seed.or(config.simulation.seed) {
        Some(seed) => RngNoise::seeded(seed),
        None => RngNoise::from_entropy(),
    };
    let simulator = PressureSimulator::new(noise, Arc::clone(&history));

    if !json {
        println!(
            "🌡️  {}",
            format_pressure(BASE_PRESSURE_HPA, TrendLabel::from_hpa(BASE_PRESSURE_HPA))
        );
    }

    let mut handle = spawn_pressure_ticker(simulator, SIMULATION_INTERVAL, ticks);

    tokio::select! {
        result = &mut handle => {
            let taken = result.context("pressure simulation task failed")?;
            info!(ticks = taken, "Simulation complete");
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!(error = %e, "Failed to listen for Ctrl-C");
            }
            handle.abort();
            info!(ticks = history.len(), "Simulation interrupted");
        }
    }

    if let Some(summary) = history.summary() {
        if json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!();
            println!("{}", format_summary(&summary));
        }
    }

    Ok(())
}

async fn run_weather(
    mut config: AppConfig,
    location: Option<String>,
    here: bool,
    coordinates: (Option<f64>, Option<f64>),
    api_key: Option<String>,
    json: bool,
) -> anyhow::Result<WeatherPanelState> {
    if let Some(key) = api_key.or_else(|| std::env::var(FALLBACK_API_KEY_ENV).ok()) {
        config.gemini.override_api_key(Some(key));
    }

    let adapter = GeminiWeatherAdapter::new(&config.gemini)
        .map_err(|e| anyhow!("failed to create weather client: {e}"))?;
    let geolocation = resolve_coordinates(&config, coordinates.0, coordinates.1)?;
    let service = WeatherService::new(Arc::new(adapter)).with_geolocation(Arc::new(geolocation));

    if !json {
        println!("🔎 Buscando el clima...");
    }

    let state = if here {
        service.lookup_current_position(location.as_deref()).await
    } else {
        let query = location.unwrap_or_else(|| config.location.default_query.clone());
        service.lookup_location(&query).await
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("{}", format_weather(&state));
    }

    Ok(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    if cli.verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    config.validate().map_err(|e| anyhow!("invalid configuration: {e}"))?;

    let _telemetry = init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Pressure { ticks, seed, json } => {
            run_pressure(&config, ticks, seed, json).await?;
        },
        Commands::Weather {
            location,
            here,
            lat,
            lon,
            api_key,
            json,
        } => {
            let state = run_weather(config, location, here, (lat, lon), api_key, json).await?;
            if state.error.is_some() {
                std::process::exit(1);
            }
        },
        Commands::Config => {
            print!("{}", config.to_redacted_toml()?);
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn log_filter_verbosity_zero() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
    }

    #[test]
    fn log_filter_verbosity_one() {
        assert_eq!(log_filter_from_verbosity(1), "info");
    }

    #[test]
    fn log_filter_verbosity_two() {
        assert_eq!(log_filter_from_verbosity(2), "debug");
    }

    #[test]
    fn log_filter_verbosity_three_or_more() {
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn pressure_defaults() {
        let cli = parse(&["clima-cli", "pressure"]);
        match cli.command {
            Commands::Pressure { ticks, seed, json } => {
                assert!(ticks.is_none());
                assert!(seed.is_none());
                assert!(!json);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn pressure_with_ticks_and_seed() {
        let cli = parse(&[
            "clima-cli", "-vv", "pressure", "-n", "20", "--seed", "42", "--json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Pressure { ticks, seed, json } => {
                assert_eq!(ticks, Some(20));
                assert_eq!(seed, Some(42));
                assert!(json);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn weather_with_location() {
        let cli = parse(&["clima-cli", "weather", "Sevilla", "--api-key", "k"]);
        match cli.command {
            Commands::Weather {
                location,
                here,
                api_key,
                ..
            } => {
                assert_eq!(location.as_deref(), Some("Sevilla"));
                assert!(!here);
                assert_eq!(api_key.as_deref(), Some("k"));
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn weather_here_with_negative_longitude() {
        let cli = parse(&[
            "clima-cli", "weather", "--here", "--lat", "40.4168", "--lon", "-3.7038",
        ]);
        match cli.command {
            Commands::Weather { here, lat, lon, .. } => {
                assert!(here);
                assert_eq!(lat, Some(40.4168));
                assert_eq!(lon, Some(-3.7038));
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn weather_lat_requires_lon() {
        let result = Cli::try_parse_from(["clima-cli", "weather", "--here", "--lat", "40.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = parse(&["clima-cli", "config", "--config", "/tmp/clima.toml"]);
        assert!(matches!(cli.command, Commands::Config));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/clima.toml")));
    }

    #[test]
    fn missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["clima-cli"]).is_err());
    }

    #[test]
    fn resolve_coordinates_prefers_flags() {
        let adapter =
            resolve_coordinates(&AppConfig::default(), Some(43.26), Some(-2.93)).unwrap();
        assert!(adapter.is_configured());
    }

    #[test]
    fn resolve_coordinates_falls_back_to_config() {
        let adapter = resolve_coordinates(&AppConfig::default(), None, None).unwrap();
        assert!(!adapter.is_configured());
    }

    #[test]
    fn resolve_coordinates_rejects_out_of_range() {
        assert!(resolve_coordinates(&AppConfig::default(), Some(91.0), Some(0.0)).is_err());
    }
}
