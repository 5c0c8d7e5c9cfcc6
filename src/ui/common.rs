//! Common UI components shared across panels.
//!
//! This module contains the header bar, status bar, loading and error
//! panels, and the help overlay.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// Render the header bar with connection state and timestamp.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" ● ", app.theme.connection_style(app.connected)),
        Span::styled(
            format!("{} ", app.labels().app_title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
    ];

    match app.timestamp {
        Some(ref timestamp) => spans.push(Span::raw(timestamp.clone())),
        None => spans.push(Span::raw(app.labels().loading)),
    }

    if let Some(rate) = app.history.request_rate() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("~{:.1} req/s", rate),
            Style::default().fg(app.theme.highlight),
        ));
    }

    spans.push(Span::raw(" │ "));
    spans.push(polling_state(app));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn polling_state(app: &App) -> Span<'static> {
    let labels = app.labels();
    if app.paused {
        Span::styled(labels.paused, Style::default().fg(app.theme.warning))
    } else if !app.visible {
        Span::styled(labels.hidden, Style::default().add_modifier(Modifier::DIM))
    } else {
        Span::styled(
            format!(
                "{}{:.1}{}",
                labels.every_prefix,
                app.poll_interval().as_secs_f64(),
                labels.every_suffix
            ),
            Style::default().add_modifier(Modifier::DIM),
        )
    }
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let labels = app.labels();
    let status = if let Some(ref err) = app.last_error {
        format!(" {}{} | {}", labels.error_prefix, err, labels.error_controls)
    } else if let Some(updated) = app.last_updated {
        format!(
            " {} | {}{:.1}{} | {}",
            app.source_description(),
            labels.updated_prefix,
            updated.elapsed().as_secs_f64(),
            labels.updated_suffix,
            labels.controls,
        )
    } else {
        format!(
            " {} | {} | {}",
            app.source_description(),
            labels.loading,
            labels.loading_controls
        )
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the loading panel shown before the first outcome.
pub fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let centered = center_vertically(area, 1);
    let paragraph = Paragraph::new(app.labels().loading)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, centered);
}

/// Render the error panel shown after a failed fetch.
pub fn render_error(frame: &mut Frame, app: &App, area: Rect) {
    let labels = app.labels();
    let mut lines = vec![
        Line::from(Span::styled(
            labels.error_title,
            Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(labels.error_hint),
    ];

    if let Some(ref err) = app.last_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    if app.consecutive_failures > 1 {
        lines.push(Line::from(Span::styled(
            format!("{}{}", app.consecutive_failures, labels.consecutive_failures),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = 72u16.min(area.width);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.critical));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, Rect::new(x, y, width, height));
}

fn center_vertically(area: Rect, height: u16) -> Rect {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);
    chunks[1]
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current panel.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let labels = app.labels();
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);
    let help_text = vec![
        Line::from(vec![Span::styled(labels.help_heading, app.theme.title)]),
        Line::from(""),
        Line::from(vec![Span::styled(labels.help_polling, bold)]),
        Line::from(labels.help_refresh),
        Line::from(labels.help_pause),
        Line::from(""),
        Line::from(vec![Span::styled(labels.help_general, bold)]),
        Line::from(labels.help_export),
        Line::from(labels.help_toggle),
        Line::from(labels.help_quit),
        Line::from(""),
        Line::from(vec![Span::styled(labels.help_focus_note, dim)]),
        Line::from(vec![Span::styled(labels.help_close, dim)]),
    ];

    let block = Block::default()
        .title(labels.help_title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 52u16.min(area.width.saturating_sub(4));
    let help_height = 15u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
