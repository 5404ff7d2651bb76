//! Form page rendering
//!
//! Draws a list of fields and action buttons, one per row.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::tui::app::{App, InputMode};
use crate::tui::form::Item;
use crate::tui::widgets::{ButtonLine, FieldLine};

/// Render the active page's rows inside a titled block
pub fn render_page(frame: &mut Frame, app: &App, area: Rect, title: &str) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_items(frame, app, inner);
}

/// Render the active page's rows into `area`
pub fn render_items(frame: &mut Frame, app: &App, area: Rect) {
    let busy = app.is_busy() || app.view.outcome.is_pending();

    for (row, item) in app.items().iter().enumerate() {
        let y = area.y + row as u16;
        if y >= area.y + area.height {
            break;
        }
        let line_area = Rect::new(area.x, y, area.width, 1);
        let selected = row == app.selected_index;

        match item {
            Item::Field(field) => {
                let editing = selected && app.input_mode == InputMode::Editing;
                let value = if editing {
                    app.editor.value()
                } else {
                    app.values.value(*field)
                };
                frame.render_widget(
                    FieldLine {
                        label: field.label(),
                        value,
                        placeholder: field.placeholder(),
                        selected,
                        cursor: editing.then_some(app.editor.cursor),
                    },
                    line_area,
                );
            }
            Item::Action(action) => {
                frame.render_widget(
                    ButtonLine {
                        label: action.label(),
                        selected,
                        enabled: !busy,
                    },
                    line_area,
                );
            }
        }
    }
}
