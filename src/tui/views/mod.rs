//! TUI Views module
//!
//! Contains the wizard, pool, inspect and explorer pages, the debug panel,
//! the status bar and the help overlay.

pub mod debug;
pub mod explorer;
pub mod form;
pub mod help;
pub mod inspect;
pub mod status_bar;
pub mod wizard;

use ratatui::{
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{ActiveView, App};
use super::layout::AppLayout;
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_view {
        ActiveView::Wizard => wizard::render(frame, app, layout.main),
        ActiveView::Pool => form::render_page(frame, app, layout.main, " Pool "),
        ActiveView::Inspect => inspect::render(frame, app, layout.main),
        ActiveView::Explorer => explorer::render(frame, app, layout.main),
    }

    debug::render(frame, app, layout.debug);

    frame.render_widget(
        NotificationWidget::new(&app.view.outcome, app.notice.as_ref()),
        layout.banner,
    );

    status_bar::render(frame, app, layout.status_bar);

    if app.show_help {
        help::render(frame, app);
    }
}

/// Render the page tabs
fn render_tabs(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let titles: Vec<Line> = ActiveView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {}:{} ", i + 1, view.title())))
        .collect();
    let selected = ActiveView::ALL
        .iter()
        .position(|view| *view == app.active_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" poolwizard ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}
