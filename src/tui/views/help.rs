//! Help overlay
//!
//! Shows keyboard shortcuts for the active page

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

/// Render the help overlay
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.active_view))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Global Keys"),
        key_line("q", "Quit"),
        key_line("?", "Show/hide help"),
        key_line("Tab / 1-4", "Switch page"),
        Line::from(""),
    ];

    match view {
        ActiveView::Explorer => {
            lines.push(section("Blocks"));
            lines.push(key_line("h / l", "Newer / older page"));
            lines.push(key_line("g", "Jump to the latest block"));
            lines.push(key_line("r", "Reload page"));
        }
        _ => {
            lines.push(section("Forms"));
            lines.push(key_line("j / k", "Select row"));
            lines.push(key_line("Enter", "Edit field or run action"));
            lines.push(key_line("r", "Re-read progress and balances"));
            lines.push(key_line("i", "Reload pool info"));
            if view == ActiveView::Wizard {
                lines.push(Line::from(""));
                lines.push(section("Wizard"));
                lines.push(key_line("h", "Back to the previous step"));
                lines.push(key_line("l", "Continue once the step is complete"));
                lines.push(key_line("X", "Forget local progress"));
            }
        }
    }

    lines
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    ))
}

fn key_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:>10}  ", key), Style::default().fg(Color::Cyan)),
        Span::raw(desc),
    ])
}
