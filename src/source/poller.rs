//! Timer-driven polling of a [`Fetcher`].
//!
//! [`Poller`] owns the repeating timer and issues one fetch per tick; each
//! fetch runs in its own task and reports back over a channel tagged with a
//! monotonic sequence number. [`PollerSource`] is the receiving end and only
//! ever hands out outcomes newer than the last one it delivered, so a slow
//! response can never overwrite a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{DataSource, Fetcher, MonitorSnapshot};
use crate::error::FetchError;

/// Default polling interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);

/// The outcome of one fetch, tagged with the sequence it was issued under.
#[derive(Debug)]
pub struct Tick {
    pub seq: u64,
    pub outcome: Result<MonitorSnapshot, FetchError>,
}

/// Owns the polling timer.
///
/// `start` fetches immediately and then every `interval`; `stop` cancels
/// future ticks but lets an in-flight fetch finish and report.
#[derive(Debug)]
pub struct Poller {
    fetcher: Arc<dyn Fetcher>,
    interval: Duration,
    sequence: Arc<AtomicU64>,
    sender: mpsc::UnboundedSender<Tick>,
    timer: Option<JoinHandle<()>>,
}

impl Poller {
    /// Create a poller and the source its outcomes are delivered to.
    ///
    /// Nothing is fetched until [`Poller::start`] is called.
    pub fn new(fetcher: Arc<dyn Fetcher>, interval: Duration) -> (Self, PollerSource) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let source = PollerSource::new(receiver, fetcher.description());
        let poller = Self {
            fetcher,
            interval,
            sequence: Arc::new(AtomicU64::new(0)),
            sender,
            timer: None,
        };
        (poller, source)
    }

    /// Start polling. Must be called from within a tokio runtime.
    ///
    /// Any armed timer is cancelled first, so there is never more than one
    /// stream of ticks.
    pub fn start(&mut self) {
        self.stop();

        let fetcher = self.fetcher.clone();
        let sequence = self.sequence.clone();
        let sender = self.sender.clone();
        let interval = self.interval;

        tracing::debug!(interval_ms = interval.as_millis() as u64, "Polling started");

        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // The first tick completes immediately.
                ticker.tick().await;
                if sender.is_closed() {
                    break;
                }
                spawn_fetch(&fetcher, &sequence, &sender);
            }
        }));
    }

    /// Stop polling. No-op if not running.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            tracing::debug!("Polling stopped");
        }
    }

    /// Issue a single fetch right away, independent of the timer.
    pub fn trigger(&self) {
        spawn_fetch(&self.fetcher, &self.sequence, &self.sender);
    }

    /// Whether the timer is armed.
    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// The configured polling interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sequence number of the most recently issued fetch (0 if none).
    pub fn last_issued(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_fetch(
    fetcher: &Arc<dyn Fetcher>,
    sequence: &Arc<AtomicU64>,
    sender: &mpsc::UnboundedSender<Tick>,
) {
    let seq = sequence.fetch_add(1, Ordering::SeqCst) + 1;
    let fetcher = fetcher.clone();
    let sender = sender.clone();

    tokio::spawn(async move {
        let outcome = fetcher.fetch().await;
        if let Err(ref e) = outcome {
            tracing::debug!(seq, error = %e, "Fetch failed");
        }
        // Receiver gone means the app is shutting down.
        let _ = sender.send(Tick { seq, outcome });
    });
}

/// Receives poll outcomes in issue order, dropping stale ones.
#[derive(Debug)]
pub struct PollerSource {
    receiver: mpsc::UnboundedReceiver<Tick>,
    description: String,
    last_delivered: u64,
    discarded: u64,
}

impl PollerSource {
    fn new(receiver: mpsc::UnboundedReceiver<Tick>, description: &str) -> Self {
        Self {
            receiver,
            description: description.to_string(),
            last_delivered: 0,
            discarded: 0,
        }
    }

    /// Wait for the next outcome that is newer than the last delivered one.
    ///
    /// Returns `None` once the poller has been dropped and every pending
    /// outcome has been drained.
    pub async fn next(&mut self) -> Option<Tick> {
        loop {
            let tick = self.receiver.recv().await?;
            if let Some(tick) = self.accept(tick) {
                return Some(tick);
            }
        }
    }

    /// Sequence number of the last outcome handed out.
    pub fn last_delivered(&self) -> u64 {
        self.last_delivered
    }

    /// How many outcomes were dropped as stale.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    fn accept(&mut self, tick: Tick) -> Option<Tick> {
        if tick.seq <= self.last_delivered {
            self.discarded += 1;
            tracing::debug!(
                seq = tick.seq,
                last_delivered = self.last_delivered,
                "Discarding stale poll outcome"
            );
            return None;
        }
        self.last_delivered = tick.seq;
        Some(tick)
    }
}

impl DataSource for PollerSource {
    fn poll(&mut self) -> Option<Tick> {
        // Drain everything queued and keep only the newest outcome.
        let mut newest: Option<Tick> = None;
        while let Ok(tick) = self.receiver.try_recv() {
            let newer = newest.as_ref().map_or(true, |current| tick.seq > current.seq);
            if newest.is_some() {
                self.discarded += 1;
            }
            if newer {
                newest = Some(tick);
            }
        }
        newest.and_then(|tick| self.accept(tick))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
