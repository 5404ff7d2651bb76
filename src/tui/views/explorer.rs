//! Block explorer page

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::display::blocks::short_hash;
use crate::tui::app::App;

/// Render the explorer page
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.explorer_state;
    let title = match &state.loaded {
        Some(Ok(page)) => format!(" Blocks - page {} (latest {}) ", state.page, page.latest),
        _ => format!(" Blocks - page {} ", state.page),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let page = match &state.loaded {
        _ if state.is_loading() => {
            frame.render_widget(Paragraph::new(" Loading...").block(block), area);
            return;
        }
        None => {
            frame.render_widget(Paragraph::new(" Press r to load blocks").block(block), area);
            return;
        }
        Some(Err(err)) => {
            frame.render_widget(
                Paragraph::new(format!(" Error fetching blocks: {}", err))
                    .style(Style::default().fg(Color::Red))
                    .block(block),
                area,
            );
            return;
        }
        Some(Ok(page)) => page,
    };

    if page.blocks.is_empty() {
        frame.render_widget(Paragraph::new(" No blocks on this page").block(block), area);
        return;
    }

    let header = Row::new(vec!["Block", "Time (UTC)", "Txs", "Gas used", "Hash"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = page
        .blocks
        .iter()
        .map(|block| {
            let time = block
                .time()
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            let failed = block
                .transactions
                .iter()
                .filter(|hash| page.receipts.get(*hash).is_some_and(|r| !r.success))
                .count();
            let txs = if failed > 0 {
                format!("{} ({} failed)", block.transactions.len(), failed)
            } else {
                block.transactions.len().to_string()
            };
            Row::new(vec![
                Cell::from(block.number.to_string()),
                Cell::from(time),
                Cell::from(txs),
                Cell::from(block.gas_used.to_string()),
                Cell::from(short_hash(&block.hash.to_string())),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Min(18),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}
