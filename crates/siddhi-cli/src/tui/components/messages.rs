//! Notices panel.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::tui::app::{App, NoticeLevel};

/// Render the notice list, newest at the bottom.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Notices ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let mut items: Vec<ListItem> = app
        .notices
        .iter()
        .map(|notice| {
            let content_style = match notice.level {
                NoticeLevel::Info => Style::default().fg(Color::Gray),
                NoticeLevel::Success => Style::default().fg(Color::Green),
                NoticeLevel::Error => Style::default().fg(Color::Red),
            };

            let prefix = format!("{} ", notice.timestamp.format("%H:%M:%S"));

            let lines: Vec<Line> = notice
                .content
                .lines()
                .enumerate()
                .map(|(i, line)| {
                    if i == 0 {
                        Line::from(vec![
                            Span::styled(prefix.clone(), Style::default().fg(Color::DarkGray)),
                            Span::styled(line, content_style),
                        ])
                    } else {
                        Line::from(vec![
                            Span::raw(" ".repeat(prefix.len())),
                            Span::styled(line, content_style),
                        ])
                    }
                })
                .collect();

            ListItem::new(lines)
        })
        .collect();

    if app.is_scanning {
        const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{} Scanning...", FRAMES[app.tick % FRAMES.len()]),
            Style::default().fg(Color::Yellow),
        ))));
    }

    let visible_height = inner_area.height as usize;
    let total_items = items.len();

    // Stick to the bottom unless scrolled up
    let start_index = total_items.saturating_sub(visible_height + app.scroll_offset);

    let visible_items: Vec<ListItem> = items
        .into_iter()
        .skip(start_index)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items), inner_area);
}
