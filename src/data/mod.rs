//! Data models and processing for monitor snapshots.
//!
//! This module turns raw snapshots into the typed view model the TUI draws.
//!
//! ## Submodules
//!
//! - [`format`]: Number, percent, uptime and timestamp formatting
//! - [`labels`]: English and zh-CN display text
//! - [`dashboard`]: The five-card view model ([`DashboardView`], [`Card`], [`Metric`])
//! - [`history`]: Recent samples for the hit-rate sparkline and request rate
//!
//! ## Data Flow
//!
//! ```text
//! MonitorSnapshot (raw JSON)
//!        │
//!        ├──▶ DashboardView::render() ──▶ Card / Metric (pure)
//!        │
//!        └──▶ History::record() (for sparklines)
//! ```

pub mod dashboard;
pub mod format;
pub mod history;
pub mod labels;

pub use dashboard::{Card, CardKind, DashboardView, Metric};
pub use format::{format_duration, format_number, format_percent, format_timestamp};
pub use history::History;
pub use labels::{Labels, Locale};
