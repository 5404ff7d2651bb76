//! Inspect page
//!
//! Ad-hoc balance and allowance checks with their latest results.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;

use super::form::render_page;

/// Render the inspect page
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(4)])
        .split(area);

    render_page(frame, app, chunks[0], " Inspect ");

    let results = &app.view.inspection;
    let lines = vec![
        result_line("Balance", &results.balance),
        result_line("Allowance", &results.allowance),
    ];
    let block = Block::default()
        .title(" Results ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
}

fn result_line<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    let value = if value.is_empty() { "-" } else { value };
    Line::from(vec![
        Span::styled(format!(" {:>10}: ", label), Style::default().fg(Color::Cyan)),
        Span::styled(value, Style::default().fg(Color::Yellow)),
    ])
}
