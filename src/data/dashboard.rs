//! Dashboard view model.
//!
//! [`DashboardView::render`] turns a snapshot into five typed cards. It is a
//! pure function of the snapshot, the connected flag and the labels; the
//! terminal widgets in `ui::dashboard` only lay these records out.

use std::fmt;

use serde::Serialize;

use super::format::{format_duration, format_fixed1, format_number, format_percent, format_raw};
use super::labels::Labels;
use crate::source::MonitorSnapshot;

/// Which of the five fixed cards this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    System,
    Cache,
    Warmup,
    Performance,
    Deduplication,
}

impl CardKind {
    pub fn icon(self) -> &'static str {
        match self {
            CardKind::System => "💻",
            CardKind::Cache => "📊",
            CardKind::Warmup => "🔥",
            CardKind::Performance => "⚡",
            CardKind::Deduplication => "🔄",
        }
    }
}

/// One label/value line, optionally with a proportional fill bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
    /// Fill ratio in `[0, 100]` for rate metrics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<f64>,
    /// Not backed by snapshot data yet.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}

impl Metric {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            fill: None,
            placeholder: false,
        }
    }

    fn with_fill(mut self, value: f64) -> Self {
        self.fill = Some(clamp_fill(value));
        self
    }

    fn placeholder(mut self) -> Self {
        self.placeholder = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub kind: CardKind,
    pub title: &'static str,
    /// Connection status dot; only the system card carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
    pub metrics: Vec<Metric>,
}

impl Card {
    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    /// Look up a metric by its label.
    pub fn metric(&self, label: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.label == label)
    }
}

/// The complete dashboard content for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: Vec<Card>,
}

impl DashboardView {
    /// Build the five cards for a snapshot.
    pub fn render(snapshot: &MonitorSnapshot, connected: bool, labels: &'static Labels) -> Self {
        Self {
            cards: vec![
                system_card(snapshot, connected, labels),
                cache_card(snapshot, labels),
                warmup_card(snapshot, labels),
                performance_card(snapshot, labels),
                deduplication_card(snapshot, labels),
            ],
        }
    }

    pub fn card(&self, kind: CardKind) -> Option<&Card> {
        self.cards.iter().find(|c| c.kind == kind)
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {}", card.icon(), card.title)?;
            match card.online {
                Some(true) => writeln!(f, " ●")?,
                Some(false) => writeln!(f, " ○")?,
                None => writeln!(f)?,
            }
            for metric in &card.metrics {
                writeln!(f, "  {}: {}", metric.label, metric.value)?;
            }
        }
        Ok(())
    }
}

fn clamp_fill(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn enabled_text(enabled: bool, labels: &'static Labels) -> &'static str {
    if enabled {
        labels.enabled
    } else {
        labels.disabled
    }
}

fn system_card(snapshot: &MonitorSnapshot, connected: bool, labels: &'static Labels) -> Card {
    let stats = &snapshot.system_stats;
    Card {
        kind: CardKind::System,
        title: labels.system_title,
        online: Some(connected),
        metrics: vec![
            Metric::new(labels.uptime, format_duration(stats.uptime_seconds)),
            Metric::new(labels.memory, format!("{}MB", format_fixed1(stats.memory_usage_mb))),
            Metric::new(labels.goroutines, stats.goroutine_count.to_string()),
            Metric::new(labels.gc_count, stats.gc_count.to_string()),
        ],
    }
}

fn cache_card(snapshot: &MonitorSnapshot, labels: &'static Labels) -> Card {
    let stats = &snapshot.cache_stats;
    let hit_rate = snapshot.hit_rates.overall_hit_rate;
    Card {
        kind: CardKind::Cache,
        title: labels.cache_title,
        online: None,
        metrics: vec![
            Metric::new(labels.overall_hit_rate, format_percent(hit_rate)).with_fill(hit_rate),
            Metric::new(labels.total_requests, format_number(stats.total_requests)),
            Metric::new(labels.item_info_hits, format_number(stats.item_info_hits)),
            Metric::new(labels.strm_type_hits, format_number(stats.strm_type_hits)),
        ],
    }
}

fn warmup_card(snapshot: &MonitorSnapshot, labels: &'static Labels) -> Card {
    let stats = &snapshot.warmup_stats;
    Card {
        kind: CardKind::Warmup,
        title: labels.warmup_title,
        online: None,
        metrics: vec![
            Metric::new(labels.warmup_status, enabled_text(stats.enabled, labels)),
            Metric::new(labels.success_rate, format_percent(stats.success_rate))
                .with_fill(stats.success_rate),
            Metric::new(labels.warmup_requests, format_number(stats.total_warmup_requests)),
            Metric::new(
                labels.average_duration,
                format!("{}ms", format_raw(stats.average_warmup_duration_ms)),
            ),
        ],
    }
}

// Only cache efficiency comes from the snapshot; the rest wait on the
// backend exposing request rate and memory targets.
fn performance_card(snapshot: &MonitorSnapshot, labels: &'static Labels) -> Card {
    Card {
        kind: CardKind::Performance,
        title: labels.performance_title,
        online: None,
        metrics: vec![
            Metric::new(labels.composite_score, labels.calculating).placeholder(),
            Metric::new(labels.request_rate, "0.00/s").placeholder(),
            Metric::new(
                labels.cache_efficiency,
                format_percent(snapshot.hit_rates.overall_hit_rate),
            ),
            Metric::new(labels.memory_efficiency, labels.good).placeholder(),
        ],
    }
}

fn deduplication_card(snapshot: &MonitorSnapshot, labels: &'static Labels) -> Card {
    let stats = &snapshot.deduplication_stats;
    let metrics = if stats.enabled {
        vec![
            Metric::new(labels.dedup_status, labels.enabled),
            Metric::new(labels.dedup_rate, format_percent(stats.deduplication_rate))
                .with_fill(stats.deduplication_rate),
            Metric::new(labels.total_requests, format_number(stats.total_requests)),
            Metric::new(labels.dedup_count, format_number(stats.deduplicated_count)),
            Metric::new(labels.saved_time, format!("{}ms", format_raw(stats.saved_time_ms))),
        ]
    } else {
        vec![Metric::new(labels.state, labels.disabled)]
    };

    Card {
        kind: CardKind::Deduplication,
        title: labels.dedup_title,
        online: None,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::labels::{EN, ZH_CN};
    use crate::source::sample_snapshot;

    #[test]
    fn test_render_builds_five_cards_in_order() {
        let view = DashboardView::render(&sample_snapshot(), true, &EN);
        let kinds: Vec<CardKind> = view.cards.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CardKind::System,
                CardKind::Cache,
                CardKind::Warmup,
                CardKind::Performance,
                CardKind::Deduplication,
            ]
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let snapshot = sample_snapshot();
        let first = DashboardView::render(&snapshot, true, &EN);
        let second = DashboardView::render(&snapshot, true, &EN);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_system_card_values() {
        let view = DashboardView::render(&sample_snapshot(), false, &EN);
        let card = view.card(CardKind::System).unwrap();

        assert_eq!(card.online, Some(false));
        assert_eq!(card.metric(EN.uptime).unwrap().value, "1h 2m 5s");
        assert_eq!(card.metric(EN.memory).unwrap().value, "42.7MB");
        assert_eq!(card.metric(EN.goroutines).unwrap().value, "37");
        assert_eq!(card.metric(EN.gc_count).unwrap().value, "12");
    }

    #[test]
    fn test_cache_card_compacts_counts_and_fills() {
        let view = DashboardView::render(&sample_snapshot(), true, &EN);
        let card = view.card(CardKind::Cache).unwrap();

        let hit_rate = card.metric(EN.overall_hit_rate).unwrap();
        assert_eq!(hit_rate.value, "93.9%");
        assert_eq!(hit_rate.fill, Some(93.89));
        assert_eq!(card.metric(EN.total_requests).unwrap().value, "15.2K");
        assert_eq!(card.metric(EN.item_info_hits).unwrap().value, "9.1K");
        assert_eq!(card.metric(EN.strm_type_hits).unwrap().value, "5.2K");
        assert_eq!(card.online, None);
    }

    #[test]
    fn test_warmup_card() {
        let view = DashboardView::render(&sample_snapshot(), true, &EN);
        let card = view.card(CardKind::Warmup).unwrap();

        assert_eq!(card.metric(EN.warmup_status).unwrap().value, "✅ Enabled");
        assert_eq!(card.metric(EN.success_rate).unwrap().value, "96.0%");
        assert_eq!(card.metric(EN.success_rate).unwrap().fill, Some(96.0));
        assert_eq!(card.metric(EN.warmup_requests).unwrap().value, "2.5M");
        assert_eq!(card.metric(EN.average_duration).unwrap().value, "18ms");
    }

    #[test]
    fn test_performance_card_placeholders() {
        let view = DashboardView::render(&sample_snapshot(), true, &EN);
        let card = view.card(CardKind::Performance).unwrap();

        assert!(card.metric(EN.composite_score).unwrap().placeholder);
        assert_eq!(card.metric(EN.request_rate).unwrap().value, "0.00/s");
        let efficiency = card.metric(EN.cache_efficiency).unwrap();
        assert_eq!(efficiency.value, "93.9%");
        assert!(!efficiency.placeholder);
        assert_eq!(card.metric(EN.memory_efficiency).unwrap().value, "Good");
    }

    #[test]
    fn test_deduplication_enabled() {
        let view = DashboardView::render(&sample_snapshot(), true, &EN);
        let card = view.card(CardKind::Deduplication).unwrap();

        assert_eq!(card.metrics.len(), 5);
        assert_eq!(card.metric(EN.dedup_rate).unwrap().value, "12.0%");
        assert_eq!(card.metric(EN.total_requests).unwrap().value, "999");
        assert_eq!(card.metric(EN.dedup_count).unwrap().value, "120");
        assert_eq!(card.metric(EN.saved_time).unwrap().value, "5400ms");
    }

    #[test]
    fn test_deduplication_disabled_shows_single_line() {
        let mut snapshot = sample_snapshot();
        snapshot.deduplication_stats.enabled = false;

        let view = DashboardView::render(&snapshot, true, &EN);
        let card = view.card(CardKind::Deduplication).unwrap();

        assert_eq!(card.metrics.len(), 1);
        assert_eq!(card.metrics[0].label, EN.state);
        assert_eq!(card.metrics[0].value, EN.disabled);
        for label in [EN.dedup_rate, EN.total_requests, EN.dedup_count, EN.saved_time] {
            assert!(card.metric(label).is_none());
        }
    }

    #[test]
    fn test_deduplication_disabled_backend_payload() {
        let mut value: serde_json::Value =
            serde_json::from_str(crate::source::sample_json()).unwrap();
        value["deduplication_stats"] = serde_json::json!({ "enabled": false });
        let snapshot: MonitorSnapshot = serde_json::from_value(value).unwrap();

        let view = DashboardView::render(&snapshot, true, &EN);
        let card = view.card(CardKind::Deduplication).unwrap();

        assert_eq!(card.metrics.len(), 1);
        assert!(view.to_string().contains("  Status: ❌ Disabled\n"));
    }

    #[test]
    fn test_fill_is_clamped() {
        let mut snapshot = sample_snapshot();
        snapshot.hit_rates.overall_hit_rate = 140.0;
        snapshot.warmup_stats.success_rate = -3.0;

        let view = DashboardView::render(&snapshot, true, &EN);
        let cache = view.card(CardKind::Cache).unwrap();
        let warmup = view.card(CardKind::Warmup).unwrap();

        assert_eq!(cache.metric(EN.overall_hit_rate).unwrap().fill, Some(100.0));
        assert_eq!(warmup.metric(EN.success_rate).unwrap().fill, Some(0.0));
    }

    #[test]
    fn test_zh_cn_labels() {
        let view = DashboardView::render(&sample_snapshot(), true, &ZH_CN);
        let warmup = view.card(CardKind::Warmup).unwrap();

        assert_eq!(warmup.title, "预热统计");
        assert_eq!(warmup.metric("预热状态").unwrap().value, "✅ 已启用");
    }

    #[test]
    fn test_text_output() {
        let view = DashboardView::render(&sample_snapshot(), true, &EN);
        let text = view.to_string();

        assert!(text.starts_with("💻 System ●\n"));
        assert!(text.contains("  Uptime: 1h 2m 5s\n"));
        assert!(text.contains("  Composite score: Calculating...\n"));
    }
}
