//! Pressure simulation ticker task
//!
//! Steps the simulator on a fixed interval. Subscribers of the simulator's
//! history receive every update on this task.

use std::time::Duration;

use application::{NoiseSource, PressureSimulator};
use tracing::{debug, info};

/// Spawn a background task that advances the simulator once per `interval`.
///
/// The first step happens one full interval after spawning, never
/// immediately. With `max_ticks` set the task ends after that many steps and
/// resolves to the number of steps taken; otherwise it runs until aborted.
///
/// # Example
///
/// ```ignore
/// let handle = spawn_pressure_ticker(simulator, SIMULATION_INTERVAL, Some(20));
/// let ticks = handle.await?;
/// ```
pub fn spawn_pressure_ticker<N>(
    mut simulator: PressureSimulator<N>,
    interval: Duration,
    max_ticks: Option<u64>,
) -> tokio::task::JoinHandle<u64>
where
    N: NoiseSource + 'static,
{
    info!(
        interval_ms = interval.as_millis(),
        max_ticks = max_ticks,
        start_hpa = simulator.current(),
        "Starting pressure simulation"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Don't tick immediately on startup
        ticker.tick().await;

        let mut taken = 0u64;
        while max_ticks.is_none_or(|max| taken < max) {
            ticker.tick().await;
            simulator.step();
            taken += 1;
        }

        debug!(ticks = taken, "Pressure simulation finished");
        taken
    })
}
