//! Status banner widget
//!
//! Shows the wizard's transaction outcome, or a short-lived local notice
//! (such as "transaction already in progress") when there is none.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::models::{TransactionOutcome, TxStatus};

/// How long a local notice stays up
const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Kind of banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Pending,
    Success,
    Error,
}

impl NotificationType {
    /// Banner kind for an outcome, if it should be shown
    pub fn for_status(status: TxStatus) -> Option<Self> {
        match status {
            TxStatus::None => None,
            TxStatus::Pending => Some(Self::Pending),
            TxStatus::Success => Some(Self::Success),
            TxStatus::Error => Some(Self::Error),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Pending => Color::Yellow,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => " Info ",
            Self::Pending => " Pending ",
            Self::Success => " Success ",
            Self::Error => " Error ",
        }
    }
}

/// A local notice
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    created_at: Instant,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            notification_type: NotificationType::Info,
            created_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Error,
            ..Self::info(message)
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= NOTICE_DURATION
    }
}

/// Banner for the bottom of the screen
pub struct NotificationWidget<'a> {
    message: &'a str,
    notification_type: Option<NotificationType>,
}

impl<'a> NotificationWidget<'a> {
    /// The outcome takes priority over a local notice
    pub fn new(outcome: &'a TransactionOutcome, notice: Option<&'a Notification>) -> Self {
        match (NotificationType::for_status(outcome.status), notice) {
            (Some(kind), _) => Self {
                message: &outcome.message,
                notification_type: Some(kind),
            },
            (None, Some(notice)) => Self {
                message: &notice.message,
                notification_type: Some(notice.notification_type),
            },
            (None, None) => Self {
                message: "",
                notification_type: None,
            },
        }
    }
}

impl Widget for NotificationWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(kind) = self.notification_type else {
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        };

        let color = kind.color();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(kind.title())
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        Paragraph::new(self.message)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operation;

    #[test]
    fn test_outcome_wins_over_notice() {
        let outcome = TransactionOutcome::error(Some(Operation::Mint), "boom");
        let notice = Notification::info("hello");
        let widget = NotificationWidget::new(&outcome, Some(&notice));
        assert_eq!(widget.message, "boom");
        assert_eq!(widget.notification_type, Some(NotificationType::Error));
    }

    #[test]
    fn test_notice_shows_without_outcome() {
        let outcome = TransactionOutcome::none();
        let notice = Notification::error("Invalid gas limit");
        let widget = NotificationWidget::new(&outcome, Some(&notice));
        assert_eq!(widget.message, "Invalid gas limit");
    }

    #[test]
    fn test_notice_expires() {
        let notice = Notification::info("hello");
        assert!(!notice.is_expired_at(notice.created_at));
        assert!(notice.is_expired_at(notice.created_at + NOTICE_DURATION));
    }
}
