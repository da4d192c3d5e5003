use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::ui::common::tab_at;

/// File written by the `e` key.
pub const EXPORT_PATH: &str = "charts_export.json";

/// Size the interactive export lays the charts out at.
pub const EXPORT_SIZE: (u16, u16) = (120, 40);

/// Row of the tab bar, below the header.
const TAB_ROW: u16 = 1;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        KeyCode::Char('1') => app.set_view(View::Histogram),
        KeyCode::Char('2') => app.set_view(View::Usage),

        KeyCode::Esc => app.leave_charts(Instant::now()),

        KeyCode::Char('r') => {
            if let Err(e) = app.reload_data() {
                app.set_status_message(format!("Reload failed: {}", e));
            }
        }

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_PATH);
            let (width, height) = EXPORT_SIZE;
            match app.export_state(&export_path, width, height) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.hover(mouse.column, mouse.row, Instant::now());
        }

        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row == TAB_ROW {
                if let Some(view) = tab_at(mouse.column) {
                    app.set_view(view);
                }
            } else {
                app.hover(mouse.column, mouse.row, Instant::now());
            }
        }

        _ => {}
    }
}
