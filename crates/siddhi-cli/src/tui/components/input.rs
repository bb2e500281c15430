//! Resource ID bar.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::tui::app::{App, Field, InputMode};

/// Render the ID bar at the top of the screen.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let typing = app.input_mode == InputMode::Editing && app.focus == Field::Id;

    let border_style = if typing {
        Style::default().fg(Color::Yellow)
    } else if app.focus == Field::Id {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(" Resource ID ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    let inner_area = block.inner(area);

    let current_id = app.manager.session().draft().map(|d| d.id.as_str());

    let (text, text_style) = if typing {
        (
            format!("{}_", app.edit_buffer),
            Style::default().fg(Color::White),
        )
    } else if app.is_scanning {
        ("Scanning...".to_string(), Style::default().fg(Color::Yellow))
    } else {
        match current_id {
            Some(id) => (id.to_string(), Style::default().fg(Color::White)),
            None => (
                "Press Enter to type an ID or 's' to scan".to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        }
    };

    frame.render_widget(Paragraph::new(text).style(text_style).block(block), area);

    if typing {
        let cursor_x = inner_area.x + app.edit_buffer.chars().count() as u16;
        frame.set_cursor_position(Position::new(cursor_x, inner_area.y));
    }
}
