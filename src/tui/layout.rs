//! Layout definitions for the TUI
//!
//! Tabs on top, the active page and the debug panel side by side, and the
//! status banner at the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// Page tabs
    pub tabs: Rect,
    /// Main content area
    pub main: Rect,
    /// Balances, allowances and pool info
    pub debug: Rect,
    /// Outcome banner
    pub banner: Rect,
    /// Key hints
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(8),    // Main area
                Constraint::Length(4), // Banner
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(50),    // Page
                Constraint::Length(48), // Debug panel
            ])
            .split(vertical[1]);

        Self {
            tabs: vertical[0],
            main: horizontal[0],
            debug: horizontal[1],
            banner: vertical[2],
            status_bar: vertical[3],
        }
    }
}

/// Layout for the wizard page
pub struct WizardLayout {
    /// Step list
    pub stepper: Rect,
    /// Form for the current step
    pub form: Rect,
}

impl WizardLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Stepper
                Constraint::Min(3),    // Form
            ])
            .split(area);

        Self {
            stepper: chunks[0],
            form: chunks[1],
        }
    }
}

/// Create a centered rect for overlays
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
