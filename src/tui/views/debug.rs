//! Debug panel
//!
//! Signer, pool metadata, the token pair and the latest balance readings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::FieldReading;
use crate::tui::app::App;

/// Render the debug panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    let info = &view.contract_info;
    let debug = &view.debug;
    let tokens = &view.state.deployed_tokens;

    let mut lines = vec![
        heading("Connection"),
        pair("Signer", &view.signer.to_string()),
        pair("Pool", &view.pool.to_string()),
        Line::from(""),
        heading("Pool"),
    ];

    if info.is_loaded() {
        lines.push(pair("Name", &format!("{} ({})", info.name, info.symbol)));
        lines.push(pair("Decimals", &info.decimals));
        lines.push(pair("Supply", &info.total_supply));
    } else {
        lines.push(dim("Contract info not loaded"));
    }
    lines.push(pair(
        "Initialized",
        if view.state.pool_initialized { "yes" } else { "no" },
    ));
    lines.push(pair("Token0", or_dash(&tokens.token0)));
    lines.push(pair("Token1", or_dash(&tokens.token1)));

    lines.push(Line::from(""));
    lines.push(heading("Signer balances"));
    lines.push(reading("Token0", &debug.token0_balance));
    lines.push(reading("Token1", &debug.token1_balance));
    lines.push(reading("Allow0", &debug.token0_allowance));
    lines.push(reading("Allow1", &debug.token1_allowance));
    lines.push(reading("LP", &debug.lp_token_balance));

    if !debug.last_error.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Last error"));
        lines.push(Line::from(Span::styled(
            debug.last_error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .title(" Debug ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn pair(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>11}: ", label), Style::default().fg(Color::Cyan)),
        Span::raw(value.to_string()),
    ])
}

fn reading(label: &str, value: &FieldReading) -> Line<'static> {
    let style = match value {
        FieldReading::Value(_) => Style::default().fg(Color::White),
        FieldReading::NotChecked => Style::default().fg(Color::DarkGray),
        FieldReading::ErrorFetching => Style::default().fg(Color::Red),
    };
    Line::from(vec![
        Span::styled(format!("{:>11}: ", label), Style::default().fg(Color::Cyan)),
        Span::styled(value.to_string(), style),
    ])
}

fn dim(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
