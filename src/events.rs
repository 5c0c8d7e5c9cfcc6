use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;

/// Where `e` writes the current view.
pub const EXPORT_PATH: &str = "monitor_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Dispatch a terminal event to the app.
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        // Focus plays the role of page visibility
        Event::FocusLost => app.set_visible(false),
        Event::FocusGained => app.set_visible(true),
        // Terminal will redraw on next iteration
        _ => {}
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ignore key release events reported on some platforms
    if key.kind == KeyEventKind::Release {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_pause(),

        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from(EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(()) => {
                    let message = format!("{}{}", app.labels().exported_to, export_path.display());
                    app.set_status_message(message);
                }
                Err(e) => {
                    let message = format!("{}{}", app.labels().export_failed, e);
                    app.set_status_message(message);
                }
            }
        }

        _ => {}
    }
}
