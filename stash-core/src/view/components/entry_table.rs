//! src/view/components/entry_table.rs
//! ============================================================================
//! # Entry Table (List View)
//!
//! One row per child of the current folder, folders first, insertion
//! order. The cursor row is highlighted; selected entries carry a marker.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::model::app_state::AppState;
use crate::model::tree::ChildRef;
use crate::util::humanize;
use crate::view::{icons, theme};

pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
    let children = app.tree.visible_children();

    let rows: Vec<Row<'_>> = children
        .iter()
        .map(|child| {
            let selected: bool = app.tree.is_selected(child.id());
            let marker: &str = if selected { "●" } else { " " };

            let (icon, icon_color, kind, size, when) = match child {
                ChildRef::Folder(folder) => (
                    icons::FOLDER_ICON,
                    theme::ACCENT,
                    "folder".to_string(),
                    format!("{} items", app.tree.item_count(&folder.id)),
                    humanize::time_ago(folder.created_at),
                ),
                ChildRef::File(file) => {
                    let file_kind = icons::classify_entry(file);
                    (
                        file_kind.icon,
                        file_kind.color,
                        file_kind.label.to_string(),
                        humanize::human_size(file.size_bytes),
                        humanize::time_ago(file.uploaded_at),
                    )
                }
            };

            let name_style: Style = if selected {
                theme::selected_style()
            } else {
                Style::default().fg(theme::FOREGROUND)
            };

            Row::new(vec![
                Cell::from(Span::styled(marker, Style::default().fg(theme::ACCENT))),
                Cell::from(Span::styled(icon, Style::default().fg(icon_color))),
                Cell::from(Span::styled(child.name().to_string(), name_style)),
                Cell::from(Span::styled(kind, theme::muted_style())),
                Cell::from(Span::styled(size, theme::muted_style())),
                Cell::from(Span::styled(when, theme::muted_style())),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Fill(2),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(["", "", "Name", "Kind", "Size", "Uploaded"]).style(theme::muted_style()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::SURFACE)),
        )
        .row_highlight_style(theme::cursor_style());

    let mut state = TableState::default();
    state.select(Some(app.ui.cursor));
    frame.render_stateful_widget(table, area, &mut state);
}
