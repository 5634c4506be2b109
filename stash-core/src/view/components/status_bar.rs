//! src/view/components/status_bar.rs

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::model::app_state::AppState;
use crate::model::ui_state::ViewMode;
use crate::util::humanize;
use crate::view::theme;

pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
    let current = app.tree.location().current.clone();
    let (folders, files) = app.tree.list_children(current.as_ref());
    let size: u64 = app.tree.subtree_size(current.as_ref());

    let mut left: String = format!(
        " {} folders · {} files · {}",
        folders.len(),
        files.len(),
        humanize::human_size(size),
    );
    if app.tree.selected_count() > 0 {
        left.push_str(&format!(" · {} selected", app.tree.selected_count()));
    }

    let view: &str = match app.ui.view_mode {
        ViewMode::Grid => "grid",
        ViewMode::List => "list",
    };
    let right: String = format!("{view} · ? help · q quit ");

    let style: Style = Style::default().bg(theme::SURFACE).fg(theme::MUTED);
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Length(right.len() as u16)])
        .split(area);

    frame.render_widget(Paragraph::new(left).style(style), halves[0]);
    frame.render_widget(
        Paragraph::new(right)
            .style(style)
            .alignment(Alignment::Right),
        halves[1],
    );
}
