//! Property-based tests for the pressure random walk and its history

use std::sync::Arc;

use application::{
    BASE_PRESSURE_HPA, FnObserver, MAX_PRESSURE_HPA, MIN_PRESSURE_HPA, NoiseSource,
    PressureHistory, PressureSimulator, REENTRY_SPREAD_HPA, RngNoise, tick,
};
use domain::{PressureUpdate, TrendLabel};
use parking_lot::Mutex;
use proptest::prelude::*;

/// Returns one fixed perturbation, then the midpoint of any further range
struct FixedNoise {
    first: Option<f64>,
}

impl NoiseSource for FixedNoise {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.first.take().unwrap_or((low + high) / 2.0)
    }
}

proptest! {
    #[test]
    fn tick_stays_in_band(previous in 980.0f64..=1055.0, perturbation in -2.0f64..=2.0) {
        let mut noise = FixedNoise { first: Some(perturbation) };
        let next = tick(previous, &mut noise);
        prop_assert!((MIN_PRESSURE_HPA..=MAX_PRESSURE_HPA).contains(&next));

        let candidate = previous + perturbation;
        if (MIN_PRESSURE_HPA..=MAX_PRESSURE_HPA).contains(&candidate) {
            prop_assert!((next - candidate).abs() < 1e-9);
        }
    }

    #[test]
    fn tick_with_random_noise_stays_in_band(previous in any::<f64>(), seed in any::<u64>()) {
        let mut noise = RngNoise::seeded(seed);
        let next = tick(previous, &mut noise);
        prop_assert!(next.is_finite());
        prop_assert!((MIN_PRESSURE_HPA..=MAX_PRESSURE_HPA).contains(&next));
    }

    #[test]
    fn history_snapshot_matches_published_values(values in prop::collection::vec(980.0f64..1050.0, 0..50)) {
        let history = PressureHistory::new();
        let now = chrono::Utc::now();
        for value in &values {
            history.append(domain::PressureSample::new(*value, now));
        }

        let stored: Vec<f64> = history.snapshot().iter().map(domain::PressureSample::value).collect();
        prop_assert_eq!(stored, values);
    }
}

/// Forwards to an inner source and records every bound re-entry draw
struct RecordingNoise<N> {
    inner: N,
    reentries: Arc<Mutex<Vec<(f64, f64)>>>,
}

impl<N: NoiseSource> NoiseSource for RecordingNoise<N> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        let value = self.inner.uniform(low, high);
        if (high - low - REENTRY_SPREAD_HPA).abs() < 1e-9 {
            self.reentries.lock().push((low, value));
        }
        value
    }
}

#[test]
fn long_walk_stays_in_band_and_reenters_near_bounds() {
    let history = PressureHistory::new_shared();
    let reentries = Arc::new(Mutex::new(Vec::new()));
    let noise = RecordingNoise {
        inner: RngNoise::seeded(0x00C0_FFEE),
        reentries: Arc::clone(&reentries),
    };
    let mut simulator = PressureSimulator::new(noise, Arc::clone(&history));
    let mut previous = BASE_PRESSURE_HPA;

    for _ in 0..10_000 {
        let value = simulator.step().sample.value();
        assert!(
            (MIN_PRESSURE_HPA..=MAX_PRESSURE_HPA).contains(&value),
            "value {value} left the band"
        );

        let stepped = (value - previous).abs() <= 2.0 + 1e-9;
        let near_low = value <= MIN_PRESSURE_HPA + REENTRY_SPREAD_HPA;
        let near_high = value >= MAX_PRESSURE_HPA - REENTRY_SPREAD_HPA;
        assert!(stepped || near_low || near_high, "jump {previous} -> {value}");
        previous = value;
    }

    assert_eq!(history.len(), 10_000);
    let summary = history.summary().expect("non-empty history");
    assert!(summary.min >= MIN_PRESSURE_HPA);
    assert!(summary.max <= MAX_PRESSURE_HPA);

    // Both bounds were crossed and each crossing landed inside its window
    let reentries = reentries.lock();
    let low: Vec<f64> = reentries
        .iter()
        .filter(|(from, _)| (*from - MIN_PRESSURE_HPA).abs() < 1e-9)
        .map(|(_, value)| *value)
        .collect();
    let high: Vec<f64> = reentries
        .iter()
        .filter(|(from, _)| (*from - (MAX_PRESSURE_HPA - REENTRY_SPREAD_HPA)).abs() < 1e-9)
        .map(|(_, value)| *value)
        .collect();
    assert!(!low.is_empty(), "walk never crossed the lower bound");
    assert!(!high.is_empty(), "walk never crossed the upper bound");
    assert!(low.iter().all(|v| (MIN_PRESSURE_HPA..=MIN_PRESSURE_HPA + REENTRY_SPREAD_HPA).contains(v)));
    assert!(high.iter().all(|v| (MAX_PRESSURE_HPA - REENTRY_SPREAD_HPA..=MAX_PRESSURE_HPA).contains(v)));

    // Re-entries spread over the window instead of sticking to the bound
    for side in [&low, &high] {
        assert!(
            side.iter().any(|v| (*v - side[0]).abs() > 1e-6),
            "re-entries are all identical: {side:?}"
        );
    }

    let pinned = history
        .snapshot()
        .iter()
        .filter(|s| s.value() == MIN_PRESSURE_HPA || s.value() == MAX_PRESSURE_HPA)
        .count();
    assert!(pinned <= 1, "{pinned} samples sit exactly on a bound");
}

#[test]
fn subscriber_receives_every_tick() {
    let history = PressureHistory::new_shared();
    let trends = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&trends);
    history.subscribe(Arc::new(FnObserver(move |update: &PressureUpdate| {
        sink.lock().push(update.trend);
    })));

    let mut simulator = PressureSimulator::new(RngNoise::seeded(3), Arc::clone(&history));
    let expected: Vec<TrendLabel> = (0..20).map(|_| simulator.step().trend).collect();

    assert_eq!(*trends.lock(), expected);
}
