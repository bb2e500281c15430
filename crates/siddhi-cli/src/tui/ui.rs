//! UI rendering for the TUI.

use ratatui::{prelude::*, widgets::Paragraph};

use super::app::{App, Field, InputMode};
use super::components::{form, input, messages};

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: id bar, content, status
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Resource ID
            Constraint::Min(10),   // Form and notices
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    input::render(app, frame, chunks[0]);

    render_main_content(app, frame, chunks[1]);

    render_status_bar(app, frame, chunks[2]);
}

/// Render the form and the notices side by side.
fn render_main_content(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Form
            Constraint::Percentage(45), // Notices
        ])
        .split(area);

    form::render(app, frame, chunks[0]);

    messages::render(app, frame, chunks[1]);
}

/// Render the status bar.
fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let keys = match app.input_mode {
        InputMode::Normal if app.focus == Field::Id => {
            "[Enter] Type ID  [s] Scan  [Tab] Next  [^R] Reset  [q] Quit"
        }
        InputMode::Normal => {
            "[Enter] Edit  [←/→] Change  [Tab] Next  [^S] Save  [^R] Reset  [q] Quit"
        }
        InputMode::Editing => "[Enter] Confirm  [Esc] Cancel",
    };

    let state = app.manager.session().state().display_name();
    let status = format!("{}  |  {}", keys, state);

    let status_bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}
