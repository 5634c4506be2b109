//! src/view/components/notification_overlay.rs
//! ============================================================================
//! # Notification Overlay
//!
//! Transient notice floating in the bottom-right corner, colored by level.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::model::ui_state::{Notification, NotificationLevel};
use crate::view::theme;

pub fn render(frame: &mut Frame<'_>, notification: &Notification, area: Rect) {
    let (border_style, title, icon) = match notification.level {
        NotificationLevel::Info => (Style::default().fg(theme::CYAN), "Info", "ℹ"),
        NotificationLevel::Success => (Style::default().fg(theme::GREEN), "Success", "✓"),
        NotificationLevel::Warning => (Style::default().fg(theme::YELLOW), "Warning", "⚠"),
        NotificationLevel::Error => (Style::default().fg(theme::RED), "Error", "✕"),
    };

    let width: u16 = (notification.message.len() as u16 + 4)
        .clamp(24, area.width.saturating_sub(4).max(24));
    let height: u16 = 3;
    if area.width < width + 2 || area.height < height + 2 {
        return;
    }

    let popup = Rect::new(
        area.right() - width - 1,
        area.bottom() - height - 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {icon} {title} "))
        .title_style(border_style.bold())
        .border_style(border_style)
        .style(Style::default().bg(theme::BACKGROUND));
    let inner: Rect = block.inner(popup);
    frame.render_widget(block, popup);

    frame.render_widget(
        Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(theme::FOREGROUND))
            .wrap(Wrap { trim: true }),
        inner,
    );
}
