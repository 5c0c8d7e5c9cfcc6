// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # mediawarp-monitor
//!
//! A terminal dashboard and library for monitoring a MediaWarp server.
//!
//! The monitor polls MediaWarp's monitor endpoint on a fixed interval,
//! turns each snapshot into a five-card dashboard (system, cache, warmup,
//! performance and deduplication) and keeps the screen in one of three
//! states: loading, error or dashboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (view)   │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐    ┌──────────┐                                │
//! │  │ source  │◀───│  Poller  │◀── HttpFetcher (GET + JSON)    │
//! │  │ (input) │    │ (timer)  │                                │
//! │  └─────────┘    └──────────┘                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, panel selection, pause and visibility handling
//! - **[`source`]**: Snapshot types, the [`Fetcher`] trait, and the [`Poller`] that
//!   drops stale responses before they reach the UI
//! - **[`data`]**: Formatting, localized labels, and the pure [`DashboardView`] model
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered configuration (defaults, TOML file, environment)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a local MediaWarp instance
//! mediawarp-monitor --url http://127.0.0.1:8080
//!
//! # Print the dashboard once and exit
//! mediawarp-monitor --url http://127.0.0.1:8080 --once
//! ```
//!
//! ### As a library
//!
//! ```
//! use mediawarp_monitor::{DashboardView, Locale, MonitorSnapshot};
//!
//! let json = r#"{
//!     "timestamp": "2024-05-01T12:00:00Z",
//!     "system_stats": {"uptime_seconds": 61, "memory_usage_mb": 12.0,
//!         "goroutine_count": 8, "gc_count": 1},
//!     "cache_stats": {"total_requests": 10, "item_info_hits": 6, "strm_type_hits": 3},
//!     "hit_rates": {"overall_hit_rate": 90.0},
//!     "warmup_stats": {"enabled": true, "success_rate": 100.0,
//!         "total_warmup_requests": 4, "average_warmup_duration_ms": 12.0},
//!     "deduplication_stats": {"enabled": false}
//! }"#;
//!
//! let snapshot: MonitorSnapshot = serde_json::from_str(json).unwrap();
//! let view = DashboardView::render(&snapshot, true, Locale::En.labels());
//! assert_eq!(view.cards.len(), 5);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Panel};
pub use config::MonitorConfig;
pub use data::{Card, CardKind, DashboardView, Locale, Metric};
pub use error::FetchError;
pub use source::{DataSource, Fetcher, HttpFetcher, MonitorSnapshot, Poller, PollerSource, Tick};
