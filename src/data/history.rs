//! Historical data tracking for sparklines and rate calculations.

use std::collections::VecDeque;
use std::time::Instant;

use crate::source::MonitorSnapshot;

/// Maximum number of historical samples to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks recent snapshots for the hit-rate sparkline and the observed
/// request rate shown in the header.
///
/// Only successful ticks are recorded; failed ticks leave a gap in time,
/// which the rate calculation accounts for.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Overall hit rate per sample, in percent.
    pub hit_rates: VecDeque<f64>,
    /// Cumulative total request count per sample.
    pub total_requests: VecDeque<u64>,
    /// When each sample was received.
    pub timestamps: VecDeque<Instant>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully fetched snapshot.
    pub fn record(&mut self, snapshot: &MonitorSnapshot, at: Instant) {
        push_bounded(&mut self.hit_rates, snapshot.hit_rates.overall_hit_rate);
        push_bounded(&mut self.total_requests, snapshot.cache_stats.total_requests);
        push_bounded(&mut self.timestamps, at);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Hit-rate sparkline levels (0-7 for 8 bar heights), oldest first.
    ///
    /// Levels are absolute: 0% maps to 0 and 100% to 7. Returns an empty Vec
    /// until there are at least two samples.
    pub fn hit_rate_sparkline(&self) -> Vec<u8> {
        if self.hit_rates.len() < 2 {
            return Vec::new();
        }

        self.hit_rates
            .iter()
            .map(|&rate| {
                let clamped = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 100.0) };
                ((clamped / 100.0 * 7.0).round() as u8).min(7)
            })
            .collect()
    }

    /// Observed requests per second between the last two samples.
    ///
    /// Returns None if there's not enough history, or if the counter went
    /// backwards (the server restarted).
    pub fn request_rate(&self) -> Option<f64> {
        if self.total_requests.len() < 2 || self.timestamps.len() < 2 {
            return None;
        }

        let current = *self.total_requests.back()?;
        let previous = *self.total_requests.get(self.total_requests.len() - 2)?;
        if current < previous {
            return None;
        }

        let current_time = self.timestamps.back()?;
        let previous_time = self.timestamps.get(self.timestamps.len() - 2)?;
        let elapsed = current_time.duration_since(*previous_time).as_secs_f64();

        if elapsed > 0.0 {
            Some((current - previous) as f64 / elapsed)
        } else {
            None
        }
    }
}

fn push_bounded<T>(values: &mut VecDeque<T>, value: T) {
    values.push_back(value);
    if values.len() > MAX_HISTORY_SIZE {
        values.pop_front();
    }
}
