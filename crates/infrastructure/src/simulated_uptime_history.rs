use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use portal_application::{UptimeHistorySource, UptimeSample};

const SAMPLE_COUNT: i64 = 24;
const MIN_PERCENT: f64 = 95.0;
const MAX_PERCENT: f64 = 100.0;

/// Placeholder availability history with random values in the 95 to 100 band.
///
/// Nothing is measured. Replace with a real probe-backed source before
/// exposing these numbers as an SLA.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedUptimeHistory;

impl UptimeHistorySource for SimulatedUptimeHistory {
    fn history(&self, now: DateTime<Utc>) -> Vec<UptimeSample> {
        let mut rng = rand::rng();

        (0..SAMPLE_COUNT)
            .rev()
            .map(|hours_ago| {
                let percent: f64 = rng.random_range(MIN_PERCENT..=MAX_PERCENT);
                UptimeSample {
                    timestamp: now - Duration::hours(hours_ago),
                    uptime_percent: (percent * 100.0).round() / 100.0,
                }
            })
            .collect()
    }
}
