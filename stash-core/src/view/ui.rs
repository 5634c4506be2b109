//! src/view/ui.rs
//! ============================================================================
//! # Frame Composition
//!
//! Lays out breadcrumbs, the upload panel (when anything is in flight),
//! the entry area in the active view mode, and the status bar, then
//! floats overlays and the notification on top.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Paragraph},
};

use crate::model::app_state::AppState;
use crate::model::ui_state::{UIOverlay, ViewMode};
use crate::view::components::{
    breadcrumb_bar, entry_grid, entry_table, help_overlay, notification_overlay, prompt_overlay,
    status_bar, upload_panel,
};
use crate::view::theme;

pub fn render(frame: &mut Frame<'_>, app: &AppState) {
    let area: Rect = frame.area();
    frame.render_widget(Block::default().style(theme::base_style()), area);

    let uploads: usize = app.uploads.len();
    let upload_height: u16 = if uploads == 0 {
        0
    } else {
        uploads.min(upload_panel::MAX_VISIBLE) as u16 + 2
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(upload_height),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    breadcrumb_bar::render(frame, app, chunks[0]);

    if uploads > 0 {
        upload_panel::render(frame, app, chunks[1]);
    }

    if app.tree.visible_children().is_empty() {
        render_empty(frame, chunks[2]);
    } else {
        match app.ui.view_mode {
            ViewMode::Grid => entry_grid::render(frame, app, chunks[2]),
            ViewMode::List => entry_table::render(frame, app, chunks[2]),
        }
    }

    status_bar::render(frame, app, chunks[3]);

    match app.ui.overlay {
        UIOverlay::Help => help_overlay::render(frame, area),
        UIOverlay::Prompt => prompt_overlay::render(frame, app, area),
        UIOverlay::None => {}
    }

    if let Some(notification) = &app.ui.notification {
        notification_overlay::render(frame, notification, area);
    }
}

fn render_empty(frame: &mut Frame<'_>, area: Rect) {
    if area.height < 3 {
        return;
    }

    let middle = Rect::new(area.x, area.y + area.height / 2 - 1, area.width, 2);
    let lines = vec![
        Line::from("This folder is empty"),
        Line::from("Upload files (u) or create folders (n) to get started"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .style(theme::muted_style())
            .alignment(Alignment::Center),
        middle,
    );
}
