//! Status bar view
//!
//! Shows the busy indicator and key hints for the active page

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{ActiveView, App, InputMode};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];

    if app.is_busy() {
        spans.push(Span::styled(
            " Transaction in progress ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
        spans.push(Span::raw(" "));
    }

    let hints = match (app.input_mode, app.active_view) {
        (InputMode::Editing, _) => " Enter:Save  Esc:Cancel  Ctrl-U:Clear",
        (_, ActiveView::Wizard) => {
            " j/k:Select  Enter:Edit/Run  h/l:Step  r:Refresh  X:Reset  Tab:Page  ?:Help  q:Quit"
        }
        (_, ActiveView::Explorer) => " h/l:Newer/Older  g:Latest  r:Reload  Tab:Page  q:Quit",
        _ => " j/k:Select  Enter:Edit/Run  r:Refresh  Tab:Page  ?:Help  q:Quit",
    };
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
