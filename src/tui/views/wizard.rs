//! Wizard page
//!
//! Stepper on top, the current step's form below.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::display::wizard::step_marker;
use crate::models::WizardStep;
use crate::tui::app::App;
use crate::tui::layout::WizardLayout;

use super::form::render_items;

/// Render the wizard page
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = WizardLayout::new(area);
    render_stepper(frame, app, layout.stepper);
    render_step(frame, app, layout.form);
}

fn render_stepper(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.view.state;

    let lines: Vec<Line> = WizardStep::ALL
        .iter()
        .map(|step| {
            let style = if state.steps_completed.is_complete(*step) {
                Style::default().fg(Color::Green)
            } else if state.current_step == *step {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(
                format!(
                    " {} {}. {}",
                    step_marker(state, *step),
                    step.number(),
                    step.title()
                ),
                style,
            ))
        })
        .collect();

    let block = Block::default()
        .title(" Progress ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_step(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.view.state;
    let step = state.current_step;

    let block = Block::default()
        .title(format!(" Step {}: {} ", step, step.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.items().len() as u16;
    let form_area = Rect::new(inner.x, inner.y, inner.width, rows.min(inner.height));
    render_items(frame, app, form_area);

    let footer_y = inner.y + rows + 1;
    if footer_y >= inner.y + inner.height {
        return;
    }
    let footer = if state.is_done() {
        Line::from(Span::styled(
            "All steps completed successfully!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else if state.steps_completed.is_complete(step) && step.next().is_some() {
        Line::from(Span::styled(
            "Step complete. Press l or Right to continue.",
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(Span::styled(
            step_hint(step),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(
        Paragraph::new(footer),
        Rect::new(inner.x + 2, footer_y, inner.width.saturating_sub(2), 1),
    );
}

fn step_hint(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Initialize => "Set the token pair the pool will trade.",
        WizardStep::Approve => "Let the pool spend token0 and token1 on your behalf.",
        WizardStep::Mint => "Transfer both tokens to the pool first, then mint LP tokens.",
    }
}
