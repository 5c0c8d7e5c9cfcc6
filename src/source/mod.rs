//! Data source abstraction for receiving monitor snapshots.
//!
//! Snapshots are fetched over HTTP by a [`Fetcher`], scheduled by a
//! [`Poller`], and handed to the TUI through a [`DataSource`].

mod http;
mod poller;
mod snapshot;

pub use http::{Fetcher, HttpFetcher};
pub use poller::{Poller, PollerSource, Tick, DEFAULT_INTERVAL};
pub use snapshot::{
    parse_timestamp, CacheStats, DeduplicationStats, HitRates, MonitorSnapshot, SystemStats,
    WarmupStats,
};

#[cfg(test)]
pub(crate) use poller::tests::CountingFetcher;
#[cfg(test)]
pub(crate) use snapshot::tests::{sample_json, sample_snapshot};

use std::fmt::Debug;

/// Trait for receiving poll outcomes without blocking.
///
/// The TUI loop calls [`DataSource::poll`] once per frame.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use mediawarp_monitor::{DataSource, HttpFetcher, MonitorConfig, Poller};
///
/// # tokio_test::block_on(async {
/// let fetcher = HttpFetcher::new(&MonitorConfig::default()).unwrap();
/// let (mut poller, mut source) = Poller::new(Arc::new(fetcher), std::time::Duration::from_secs(3));
/// poller.start();
/// if let Some(tick) = source.poll() {
///     println!("tick {} ok={}", tick.seq, tick.outcome.is_ok());
/// }
/// # });
/// ```
pub trait DataSource: Send + Debug {
    /// Return the newest outcome not yet delivered, if any.
    fn poll(&mut self) -> Option<Tick>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
