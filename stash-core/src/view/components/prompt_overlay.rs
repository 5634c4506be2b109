//! src/view/components/prompt_overlay.rs
//! ============================================================================
//! # Input Prompt Overlay
//!
//! Centered single-line input used for the new-folder name and the upload
//! paths. Up/Down recalls earlier submissions.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::model::app_state::AppState;
use crate::model::ui_state::PromptKind;
use crate::view::theme;

pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
    let Some(kind) = app.ui.prompt else {
        return;
    };

    let (title, hint) = match kind {
        PromptKind::NewFolder => (" New folder ", "Enter a folder name"),
        PromptKind::Upload => (" Upload files ", "Enter one or more local paths"),
    };

    let width: u16 = area.width.saturating_sub(10).clamp(24, 64);
    let height: u16 = 4;
    if area.width < width || area.height < height {
        return;
    }

    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme::overlay_border_style())
        .style(Style::default().bg(theme::BACKGROUND));
    let inner: Rect = block.inner(popup);
    frame.render_widget(block, popup);

    let lines = vec![
        Line::styled(
            format!("{}█", app.ui.input),
            Style::default().fg(theme::FOREGROUND),
        ),
        Line::styled(
            format!("{hint} (Enter to confirm, Esc to cancel)"),
            theme::muted_style(),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
