//! Dashboard card grid.
//!
//! Lays the five cards of a [`crate::data::DashboardView`] out in a responsive grid. Each
//! metric is one `label ... value` line; rate metrics get a bar underneath.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{Card, CardKind};
use crate::ui::Theme;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Number of sparkline samples shown in the cache card.
const SPARKLINE_WIDTH: usize = 20;

/// Render the card grid for the latest view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref view) = app.dashboard else {
        return;
    };

    let sparkline = render_sparkline(&app.history.hit_rate_sparkline());
    let columns = column_count(area.width);

    let rows: Vec<&[Card]> = view.cards.chunks(columns).collect();
    let heights: Vec<Constraint> = rows
        .iter()
        .map(|row| {
            let tallest = row.iter().map(|c| card_height(c, &sparkline)).max().unwrap_or(3);
            Constraint::Length(tallest)
        })
        .collect();
    let row_areas = Layout::vertical(heights).split(area);

    for (row, row_area) in rows.iter().zip(row_areas.iter()) {
        let cells = Layout::horizontal(vec![Constraint::Fill(1); columns]).split(*row_area);
        for (card, cell) in row.iter().zip(cells.iter()) {
            render_card(frame, app, card, &sparkline, *cell);
        }
    }
}

/// How many cards fit side by side.
pub fn column_count(width: u16) -> usize {
    if width >= 120 {
        3
    } else if width >= 80 {
        2
    } else {
        1
    }
}

fn render_card(frame: &mut Frame, app: &App, card: &Card, sparkline: &str, area: Rect) {
    let theme = &app.theme;

    let mut title = vec![Span::styled(format!(" {} {} ", card.icon(), card.title), theme.title)];
    if let Some(online) = card.online {
        title.push(Span::styled("● ", theme.connection_style(online)));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    let inner_width = area.width.saturating_sub(2) as usize;
    let mut lines = card_lines(card, theme, inner_width);
    if card.kind == CardKind::Cache && !sparkline.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", app.labels().trend), theme.label),
            Span::styled(sparkline.to_string(), Style::default().fg(theme.highlight)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Build the text lines for a card at the given inner width.
pub fn card_lines(card: &Card, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(card.metrics.len() * 2);

    for metric in &card.metrics {
        let label = format!(" {}", metric.label);
        let value = format!("{} ", metric.value);
        let used = Span::raw(label.as_str()).width() + Span::raw(value.as_str()).width();
        let padding = width.saturating_sub(used).max(1);

        let value_style = if metric.placeholder {
            theme.placeholder
        } else {
            theme.value
        };

        lines.push(Line::from(vec![
            Span::styled(label, theme.label),
            Span::raw(" ".repeat(padding)),
            Span::styled(value, value_style),
        ]));

        if let Some(fill) = metric.fill {
            lines.push(fill_bar(fill, theme, width));
        }
    }

    lines
}

/// Total rows a card needs, borders included.
fn card_height(card: &Card, sparkline: &str) -> u16 {
    let bars = card.metrics.iter().filter(|m| m.fill.is_some()).count();
    let trend = usize::from(card.kind == CardKind::Cache && !sparkline.is_empty());
    (card.metrics.len() + bars + trend + 2) as u16
}

fn fill_bar(fill: f64, theme: &Theme, width: usize) -> Line<'static> {
    let bar_width = width.saturating_sub(2);
    let filled = ((fill / 100.0) * bar_width as f64).round() as usize;
    let filled = filled.min(bar_width);

    Line::from(vec![
        Span::raw(" "),
        Span::styled("█".repeat(filled), Style::default().fg(theme.fill_color(fill))),
        Span::styled(
            "░".repeat(bar_width - filled),
            Style::default().fg(theme.gauge_track).add_modifier(Modifier::DIM),
        ),
    ])
}

fn render_sparkline(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }

    data.iter()
        .rev()
        .take(SPARKLINE_WIDTH)
        .rev()
        .map(|&v| SPARKLINE_CHARS[v.min(7) as usize])
        .collect()
}
