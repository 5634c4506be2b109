//! src/view/components/upload_panel.rs
//! ============================================================================
//! # Upload Panel
//!
//! One progress gauge per in-flight simulated upload. Shown only while
//! something is uploading.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Borders, Gauge},
};

use crate::model::app_state::AppState;
use crate::view::theme;

/// Gauges rendered at once; further uploads keep ticking off screen.
pub const MAX_VISIBLE: usize = 4;

pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
    let uploads = app.uploads.in_flight();
    if uploads.is_empty() {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Uploading files ")
        .border_style(theme::overlay_border_style());
    let inner: Rect = block.inner(area);
    frame.render_widget(block, area);

    let visible: usize = uploads.len().min(MAX_VISIBLE);
    let slots = Layout::vertical(vec![Constraint::Length(1); visible]).split(inner);

    for (upload, slot) in uploads.iter().take(visible).zip(slots.iter()) {
        let gauge = Gauge::default()
            .gauge_style(theme::gauge_style())
            .percent(upload.percent())
            .label(format!("{} {}%", upload.name(), upload.percent()));
        frame.render_widget(gauge, *slot);
    }
}
