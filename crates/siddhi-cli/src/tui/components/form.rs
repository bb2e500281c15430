//! Resource form rows.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use siddhi_core::{MediumType, Resource, ResourceKind};

use crate::tui::app::{App, Field, InputMode};

const LABEL_WIDTH: usize = 18;

/// Render the form for the current draft.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let session = app.manager.session();

    let title = match session.status_line() {
        Some(status) => format!(" {} ", status),
        None => " Resource ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let Some(draft) = session.draft() else {
        let hint = Paragraph::new("Enter or scan a Resource ID to begin.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, inner_area);
        return;
    };

    let lines: Vec<Line> = app
        .shown_fields()
        .into_iter()
        .filter(|f| *f != Field::Id)
        .map(|field| row(app, draft, field))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner_area);
}

fn row<'a>(app: &App, draft: &Resource, field: Field) -> Line<'a> {
    let focused = app.focus == field;
    let marker = if focused { "> " } else { "  " };
    let marker_style = Style::default().fg(Color::Cyan);

    if field == Field::Submit {
        let style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        return Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(format!("[ {} ]", app.manager.session().submit_label()), style),
        ]);
    }

    let editing = focused && app.input_mode == InputMode::Editing;
    let (value, value_style) = if editing {
        (
            format!("{}_", app.edit_buffer),
            Style::default().fg(Color::Yellow),
        )
    } else {
        let value = field_value(app, draft, field);
        let style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        (value, style)
    };

    Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(
            format!("{:<width$}", field.label(), width = LABEL_WIDTH),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(value, value_style),
    ])
}

fn field_value(app: &App, draft: &Resource, field: Field) -> String {
    match field {
        Field::Name => text_or_placeholder(&draft.name),
        Field::Location => text_or_placeholder(&draft.location),
        Field::Kind => choice(draft.kind.map(ResourceKind::as_str)),
        Field::Medium => choice(draft.medium.map(MediumType::as_str)),
        Field::BaseToggle => {
            if draft.is_base_container {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            }
        }
        Field::Parent => {
            if draft.parent_id.is_empty() {
                return "< Select parent >".to_string();
            }
            app.parent_options()
                .into_iter()
                .find(|o| o.id == draft.parent_id)
                .map_or_else(|| draft.parent_id.clone(), |o| format!("< {} >", o.label))
        }
        Field::Id | Field::Submit => String::new(),
    }
}

fn text_or_placeholder(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}

fn choice(value: Option<&str>) -> String {
    format!("< {} >", value.unwrap_or("Select"))
}
