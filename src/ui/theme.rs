//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Fill level at or above which a rate bar is drawn as good.
const FILL_GOOD: f64 = 80.0;
/// Fill level at or above which a rate bar is drawn as a warning.
const FILL_WARNING: f64 = 50.0;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    pub warning: Color,
    pub critical: Color,
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for card titles.
    pub title: Style,
    /// Style for metric labels.
    pub label: Style,
    /// Style for metric values.
    pub value: Style,
    /// Style for values not backed by real data.
    pub placeholder: Style,
    /// Unfilled part of a rate bar.
    pub gauge_track: Color,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            placeholder: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            gauge_track: Color::DarkGray,
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            title: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            placeholder: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            gauge_track: Color::Gray,
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for the connection status dot.
    pub fn connection_style(&self, online: bool) -> Style {
        if online {
            Style::default().fg(self.healthy)
        } else {
            Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
        }
    }

    /// Color for a rate bar at the given fill level.
    pub fn fill_color(&self, fill: f64) -> Color {
        if fill >= FILL_GOOD {
            self.healthy
        } else if fill >= FILL_WARNING {
            self.warning
        } else {
            self.critical
        }
    }
}
