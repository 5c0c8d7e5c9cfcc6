//! Application state and polling lifecycle.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::data::{format_timestamp, DashboardView, History, Labels, Locale};
use crate::source::{DataSource, MonitorSnapshot, Poller, Tick};
use crate::ui::Theme;

/// Which of the three top-level panels is visible.
///
/// Exactly one is shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Nothing has been fetched yet.
    Loading,
    /// The last fetch failed.
    Error,
    /// The last fetch succeeded.
    Dashboard,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Polling
    poller: Poller,
    source: Box<dyn DataSource>,
    pub visible: bool,
    pub paused: bool,

    // Outcome of the last tick
    pub panel: Panel,
    pub connected: bool,
    pub dashboard: Option<DashboardView>,
    /// Latest decoded snapshot, kept for export only.
    pub snapshot: Option<MonitorSnapshot>,
    pub timestamp: Option<String>,
    pub last_error: Option<String>,
    pub last_updated: Option<Instant>,
    pub consecutive_failures: u32,
    pub history: History,

    // UI
    pub locale: Locale,
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App; the theme is picked from the terminal background.
    pub fn new(poller: Poller, source: Box<dyn DataSource>, locale: Locale) -> Self {
        Self::with_theme(poller, source, locale, Theme::auto_detect())
    }

    pub fn with_theme(
        poller: Poller,
        source: Box<dyn DataSource>,
        locale: Locale,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            poller,
            source,
            visible: true,
            paused: false,
            panel: Panel::Loading,
            connected: false,
            dashboard: None,
            snapshot: None,
            timestamp: None,
            last_error: None,
            last_updated: None,
            consecutive_failures: 0,
            history: History::new(),
            locale,
            theme,
            status_message: None,
        }
    }

    pub fn labels(&self) -> &'static Labels {
        self.locale.labels()
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poller.interval()
    }

    /// Whether the polling timer is armed.
    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    /// Begin polling: fetch now, then on every interval.
    pub fn start(&mut self) {
        self.poller.start();
    }

    /// Stop polling. An in-flight fetch still lands.
    pub fn stop(&mut self) {
        self.poller.stop();
    }

    /// React to the terminal gaining or losing focus.
    ///
    /// Hidden stops polling; visible restarts it with an immediate fetch.
    /// A paused app stays stopped either way.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        tracing::debug!(visible, "Visibility changed");

        if self.paused {
            return;
        }
        if visible {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Toggle manual pause.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.stop();
            self.set_status_message(self.labels().polling_paused.to_string());
        } else {
            if self.visible {
                self.start();
            }
            self.set_status_message(self.labels().polling_resumed.to_string());
        }
    }

    /// Fetch immediately, outside the timer.
    pub fn refresh(&mut self) {
        self.poller.trigger();
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source and apply the newest outcome.
    ///
    /// Returns true if an outcome was applied.
    pub fn reload_data(&mut self) -> bool {
        match self.source.poll() {
            Some(tick) => {
                self.apply(tick);
                true
            }
            None => false,
        }
    }

    /// Apply one tick: switch panels and rebuild the view.
    pub fn apply(&mut self, tick: Tick) {
        match tick.outcome {
            Ok(snapshot) => {
                let now = Instant::now();
                self.connected = true;
                self.panel = Panel::Dashboard;
                self.dashboard = Some(DashboardView::render(&snapshot, true, self.labels()));
                self.timestamp = Some(format_timestamp(snapshot.timestamp, self.locale));
                self.history.record(&snapshot, now);
                self.snapshot = Some(snapshot);
                self.last_error = None;
                self.last_updated = Some(now);
                self.consecutive_failures = 0;
                tracing::debug!(seq = tick.seq, "Applied monitor snapshot");
            }
            Err(e) => {
                tracing::error!(seq = tick.seq, kind = e.kind(), error = %e, "Error fetching monitor data");
                self.connected = false;
                self.panel = Panel::Error;
                self.last_error = Some(e.to_string());
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            }
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
        self.stop();
    }

    /// Export the current view and raw snapshot to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let (Some(view), Some(snapshot)) = (&self.dashboard, &self.snapshot) else {
            anyhow::bail!("No data to export");
        };
        write_export(path, view, snapshot, self.connected, self.timestamp.as_deref())
    }
}

/// Write a dashboard export document.
pub fn write_export(
    path: &Path,
    view: &DashboardView,
    snapshot: &MonitorSnapshot,
    connected: bool,
    timestamp_display: Option<&str>,
) -> Result<()> {
    let export = serde_json::json!({
        "timestamp": snapshot.timestamp,
        "timestamp_display": timestamp_display,
        "connected": connected,
        "cards": view.cards,
        "snapshot": snapshot,
    });

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CardKind;
    use crate::error::FetchError;
    use crate::source::{sample_snapshot, CountingFetcher};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn test_app(interval: Duration) -> (App, Arc<CountingFetcher>) {
        let fetcher = Arc::new(CountingFetcher::default());
        let (poller, source) = Poller::new(fetcher.clone(), interval);
        let app = App::with_theme(poller, Box::new(source), Locale::En, Theme::dark());
        (app, fetcher)
    }

    fn ok_tick(seq: u64) -> Tick {
        Tick {
            seq,
            outcome: Ok(sample_snapshot()),
        }
    }

    fn err_tick(seq: u64) -> Tick {
        Tick {
            seq,
            outcome: Err(FetchError::Status(502)),
        }
    }

    /// Wait until the app has applied an outcome or the deadline passes.
    async fn wait_for_tick(app: &mut App) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if app.reload_data() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[test]
    fn test_initial_state_is_loading() {
        let (app, _) = test_app(Duration::from_secs(60));
        assert_eq!(app.panel, Panel::Loading);
        assert!(!app.connected);
        assert!(app.dashboard.is_none());
        assert!(!app.is_polling());
    }

    #[test]
    fn test_success_shows_dashboard_with_five_cards() {
        let (mut app, _) = test_app(Duration::from_secs(60));
        app.apply(ok_tick(1));

        assert_eq!(app.panel, Panel::Dashboard);
        assert!(app.connected);
        let view = app.dashboard.as_ref().unwrap();
        assert_eq!(view.cards.len(), 5);
        assert_eq!(view.card(CardKind::System).unwrap().online, Some(true));
        assert!(app.timestamp.as_ref().unwrap().starts_with("Last updated: "));
        assert!(app.last_error.is_none());
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_failure_shows_error_panel() {
        let (mut app, _) = test_app(Duration::from_secs(60));
        app.apply(ok_tick(1));
        app.apply(err_tick(2));

        assert_eq!(app.panel, Panel::Error);
        assert!(!app.connected);
        assert_eq!(app.last_error.as_deref(), Some("HTTP error: 502"));
        assert_eq!(app.consecutive_failures, 1);

        app.apply(err_tick(3));
        assert_eq!(app.consecutive_failures, 2);

        app.apply(ok_tick(4));
        assert_eq!(app.panel, Panel::Dashboard);
        assert_eq!(app.consecutive_failures, 0);
    }

    #[test]
    fn test_only_latest_snapshot_is_kept() {
        let (mut app, _) = test_app(Duration::from_secs(60));
        app.apply(ok_tick(1));

        let mut newer = sample_snapshot();
        newer.system_stats.gc_count = 99;
        app.apply(Tick {
            seq: 2,
            outcome: Ok(newer.clone()),
        });

        assert_eq!(app.snapshot.as_ref(), Some(&newer));
    }

    #[tokio::test]
    async fn test_failed_fetch_end_to_end() {
        let (mut app, fetcher) = test_app(Duration::from_secs(60));
        fetcher.fail.store(true, Ordering::SeqCst);

        app.start();
        assert!(wait_for_tick(&mut app).await);

        assert_eq!(app.panel, Panel::Error);
        assert!(app.dashboard.is_none());
        assert!(app.is_polling());
    }

    #[tokio::test]
    async fn test_successful_fetch_end_to_end() {
        let (mut app, _) = test_app(Duration::from_secs(60));

        app.start();
        assert!(wait_for_tick(&mut app).await);

        assert_eq!(app.panel, Panel::Dashboard);
        assert_eq!(app.dashboard.as_ref().unwrap().cards.len(), 5);
    }

    #[tokio::test]
    async fn test_hidden_then_visible_fetches_immediately() {
        let (mut app, fetcher) = test_app(Duration::from_secs(60));

        app.start();
        assert!(wait_for_tick(&mut app).await);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

        app.set_visible(false);
        assert!(!app.is_polling());

        app.set_visible(true);
        assert!(app.is_polling());
        // Interval is a minute, so a second fetch proves the restart fetched at once.
        assert!(wait_for_tick(&mut app).await);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_pause_survives_visibility_change() {
        let (mut app, _) = test_app(Duration::from_secs(60));
        app.start();

        app.toggle_pause();
        assert!(app.paused);
        assert!(!app.is_polling());

        app.set_visible(false);
        app.set_visible(true);
        assert!(!app.is_polling());

        app.toggle_pause();
        assert!(app.is_polling());
        assert_eq!(app.get_status_message(), Some("Polling resumed"));
    }

    #[tokio::test]
    async fn test_refresh_triggers_fetch() {
        let (mut app, fetcher) = test_app(Duration::from_secs(60));

        app.refresh();
        assert!(wait_for_tick(&mut app).await);

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert!(!app.is_polling());
    }

    #[test]
    fn test_quit_stops() {
        let (mut app, _) = test_app(Duration::from_secs(60));
        app.quit();
        assert!(!app.running);
        assert!(!app.is_polling());
    }

    #[test]
    fn test_export_state() {
        let (mut app, _) = test_app(Duration::from_secs(60));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        assert!(app.export_state(&path).is_err());

        app.apply(ok_tick(1));
        app.export_state(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["connected"], serde_json::json!(true));
        assert_eq!(written["cards"].as_array().unwrap().len(), 5);
        assert_eq!(written["cards"][0]["kind"], "system");
        assert_eq!(written["snapshot"]["system_stats"]["goroutine_count"], 37);
    }
}
