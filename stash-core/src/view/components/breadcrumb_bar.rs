//! src/view/components/breadcrumb_bar.rs

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::model::app_state::AppState;
use crate::model::tree::ROOT_NAME;
use crate::view::{icons, theme};

/// Breadcrumb trail: root, ancestors, then the current folder.
pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
    let mut spans: Vec<Span<'_>> = vec![Span::styled(
        format!(" {} {ROOT_NAME}", icons::FOLDER_ICON),
        Style::default().fg(theme::ACCENT),
    )];

    // The first crumb is always the root, already rendered above.
    for crumb in app.tree.location().trail.iter().skip(1) {
        spans.push(Span::styled(" / ", theme::muted_style()));
        spans.push(Span::styled(
            crumb.name.to_string(),
            Style::default().fg(theme::ACCENT),
        ));
    }

    if app.tree.location().current.is_some() {
        spans.push(Span::styled(" / ", theme::muted_style()));
        spans.push(Span::styled(
            app.tree.current_name().to_string(),
            Style::default()
                .fg(theme::FOREGROUND)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(theme::base_style()),
        area,
    );
}
