//! Barometric pressure random walk
//!
//! Each tick nudges the previous value by at most ±2 hPa. When the walk
//! leaves the 980..=1050 hPa band it is re-sampled just inside the
//! violated bound instead of being clamped, so it never sticks to an edge.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{PressureSample, PressureUpdate, TrendLabel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::pressure_history::PressureHistory;

/// Standard sea-level pressure; the walk starts here
pub const BASE_PRESSURE_HPA: f64 = 1013.25;

/// Maximum step per tick in either direction
pub const FLUCTUATION_RANGE_HPA: f64 = 2.0;

pub const MIN_PRESSURE_HPA: f64 = 980.0;
pub const MAX_PRESSURE_HPA: f64 = 1050.0;

/// Width of the re-entry window next to a violated bound
pub const REENTRY_SPREAD_HPA: f64 = 5.0;

/// Default wall-clock period between ticks
pub const SIMULATION_INTERVAL: Duration = Duration::from_millis(1500);

/// Source of uniformly distributed draws for the random walk
pub trait NoiseSource: Send {
    /// Draw a value in `[low, high]`
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

/// [`NoiseSource`] backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngNoise<R>(R);

impl<R: Rng> RngNoise<R> {
    pub const fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngNoise<StdRng> {
    /// Non-reproducible generator seeded from the OS
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Reproducible generator for tests and `--seed`
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> NoiseSource for RngNoise<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.0.random_range(low..=high)
    }
}

/// Draw from `noise`, forcing the result back into `[low, high]`
fn draw<N: NoiseSource + ?Sized>(noise: &mut N, low: f64, high: f64) -> f64 {
    let value = noise.uniform(low, high);
    if value.is_nan() {
        return (low + high) / 2.0;
    }
    value.clamp(low, high)
}

/// Compute the next pressure value from the previous one
///
/// A non-finite `previous` restarts the walk from [`BASE_PRESSURE_HPA`].
/// For any finite `previous` the result lies in
/// `[MIN_PRESSURE_HPA, MAX_PRESSURE_HPA]`, and for `previous` inside that
/// band the step is at most [`FLUCTUATION_RANGE_HPA`] unless a bound was
/// crossed.
pub fn tick<N: NoiseSource + ?Sized>(previous: f64, noise: &mut N) -> f64 {
    let previous = if previous.is_finite() {
        previous
    } else {
        BASE_PRESSURE_HPA
    };

    let candidate = previous + draw(noise, -FLUCTUATION_RANGE_HPA, FLUCTUATION_RANGE_HPA);

    if candidate < MIN_PRESSURE_HPA {
        draw(noise, MIN_PRESSURE_HPA, MIN_PRESSURE_HPA + REENTRY_SPREAD_HPA)
    } else if candidate > MAX_PRESSURE_HPA {
        draw(noise, MAX_PRESSURE_HPA - REENTRY_SPREAD_HPA, MAX_PRESSURE_HPA)
    } else {
        candidate
    }
}

/// Trend label for a pressure value
#[must_use]
pub fn classify(value: f64) -> TrendLabel {
    TrendLabel::from_hpa(value)
}

/// Stateful simulator that feeds a shared [`PressureHistory`]
pub struct PressureSimulator<N: NoiseSource = RngNoise<StdRng>> {
    noise: N,
    history: Arc<PressureHistory>,
    current: f64,
    ticks: u64,
}

impl<N: NoiseSource> std::fmt::Debug for PressureSimulator<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PressureSimulator")
            .field("current", &self.current)
            .field("ticks", &self.ticks)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl<N: NoiseSource> PressureSimulator<N> {
    /// Start a simulation at the base pressure
    ///
    /// The initial value is not recorded; the first `step` produces the
    /// first history entry.
    pub fn new(noise: N, history: Arc<PressureHistory>) -> Self {
        Self {
            noise,
            history,
            current: BASE_PRESSURE_HPA,
            ticks: 0,
        }
    }

    #[must_use]
    pub const fn current(&self) -> f64 {
        self.current
    }

    #[must_use]
    pub fn trend(&self) -> TrendLabel {
        classify(self.current)
    }

    #[must_use]
    pub fn history(&self) -> Arc<PressureHistory> {
        Arc::clone(&self.history)
    }

    /// Number of ticks taken so far
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one tick stamped with the current time
    pub fn step(&mut self) -> PressureUpdate {
        self.step_at(Utc::now())
    }

    /// Advance one tick, record it and notify subscribers
    pub fn step_at(&mut self, observed_at: DateTime<Utc>) -> PressureUpdate {
        self.current = tick(self.current, &mut self.noise);
        self.ticks += 1;

        let update = self
            .history
            .publish(PressureSample::new(self.current, observed_at));

        debug!(
            tick = self.ticks,
            value = update.sample.value(),
            trend = %update.trend,
            "Pressure tick"
        );

        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed list of draws, then falls back to the midpoint
    struct ScriptedNoise(VecDeque<f64>);

    impl ScriptedNoise {
        fn new(values: &[f64]) -> Self {
            Self(values.iter().copied().collect())
        }
    }

    impl NoiseSource for ScriptedNoise {
        fn uniform(&mut self, low: f64, high: f64) -> f64 {
            self.0.pop_front().unwrap_or((low + high) / 2.0)
        }
    }

    #[test]
    fn tick_applies_fluctuation() {
        let mut noise = ScriptedNoise::new(&[1.5]);
        let next = tick(1013.25, &mut noise);
        assert!((next - 1014.75).abs() < 1e-9);
    }

    #[test]
    fn tick_resamples_below_minimum() {
        // 981 - 2 = 979 < 980, second draw picks 983
        let mut noise = ScriptedNoise::new(&[-2.0, 983.0]);
        let next = tick(981.0, &mut noise);
        assert!((next - 983.0).abs() < 1e-9);
    }

    #[test]
    fn successive_low_excursions_land_on_different_values() {
        let mut noise = ScriptedNoise::new(&[-2.0, 981.0, -2.0, 983.5]);
        let first = tick(980.5, &mut noise);
        let second = tick(980.5, &mut noise);

        assert!((first - 981.0).abs() < 1e-9);
        assert!((second - 983.5).abs() < 1e-9);
        assert!((first - second).abs() > 1.0);
        assert!(first > MIN_PRESSURE_HPA && second > MIN_PRESSURE_HPA);
    }

    #[test]
    fn tick_resamples_above_maximum() {
        let mut noise = ScriptedNoise::new(&[2.0, 1046.0]);
        let next = tick(1049.5, &mut noise);
        assert!((next - 1046.0).abs() < 1e-9);
    }

    #[test]
    fn tick_recovers_from_out_of_band_previous() {
        let mut noise = RngNoise::seeded(7);
        let next = tick(2000.0, &mut noise);
        assert!((MAX_PRESSURE_HPA - REENTRY_SPREAD_HPA..=MAX_PRESSURE_HPA).contains(&next));

        let next = tick(-50.0, &mut noise);
        assert!((MIN_PRESSURE_HPA..=MIN_PRESSURE_HPA + REENTRY_SPREAD_HPA).contains(&next));
    }

    #[test]
    fn tick_restarts_from_base_on_nan() {
        let mut noise = ScriptedNoise::new(&[0.0]);
        let next = tick(f64::NAN, &mut noise);
        assert!((next - BASE_PRESSURE_HPA).abs() < 1e-9);
    }

    #[test]
    fn misbehaving_noise_is_clamped() {
        let mut noise = ScriptedNoise::new(&[500.0]);
        let next = tick(1013.25, &mut noise);
        assert!((next - 1015.25).abs() < 1e-9);

        let mut noise = ScriptedNoise::new(&[f64::NAN]);
        let next = tick(1013.25, &mut noise);
        assert!((next - 1013.25).abs() < 1e-9);
    }

    #[test]
    fn classify_uses_trend_bands() {
        assert_eq!(classify(1005.0), TrendLabel::Low);
        assert_eq!(classify(1013.0), TrendLabel::Stable);
        assert_eq!(classify(1030.0), TrendLabel::High);
    }

    #[test]
    fn simulator_starts_at_base() {
        let simulator = PressureSimulator::new(RngNoise::seeded(1), PressureHistory::new_shared());
        assert!((simulator.current() - BASE_PRESSURE_HPA).abs() < f64::EPSILON);
        assert_eq!(simulator.trend(), TrendLabel::Stable);
        assert_eq!(simulator.ticks(), 0);
        assert!(simulator.history().is_empty());
    }

    #[test]
    fn step_records_and_publishes() {
        let history = PressureHistory::new_shared();
        let mut simulator = PressureSimulator::new(ScriptedNoise::new(&[-2.0, -2.0]), Arc::clone(&history));

        let first = simulator.step();
        let second = simulator.step();

        assert!((first.sample.value() - 1011.25).abs() < 1e-9);
        assert!((second.sample.value() - 1009.25).abs() < 1e-9);
        assert_eq!(second.trend, TrendLabel::Stable);
        assert_eq!(history.len(), 2);
        assert_eq!(simulator.ticks(), 2);
        assert_eq!(history.latest(), Some(second.sample));
    }

    #[test]
    fn seeded_simulators_agree() {
        let run = |seed| {
            let mut simulator = PressureSimulator::new(RngNoise::seeded(seed), PressureHistory::new_shared());
            (0..50).map(|_| simulator.step().sample.value()).collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }
}
