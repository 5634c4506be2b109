//! src/view/components/entry_grid.rs
//! ============================================================================
//! # Entry Grid (Grid View)
//!
//! Fixed-column card layout over the current folder's children. Scrolls by
//! whole rows to keep the cursor cell visible.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::model::app_state::AppState;
use crate::model::tree::ChildRef;
use crate::model::ui_state::GRID_COLUMNS;
use crate::util::humanize;
use crate::view::{icons, theme};

const CELL_HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
    let children = app.tree.visible_children();
    let cell_width: u16 = area.width / GRID_COLUMNS as u16;
    if children.is_empty() || area.height < CELL_HEIGHT || cell_width < 8 {
        return;
    }

    let rows_visible: usize = (area.height / CELL_HEIGHT).max(1) as usize;
    let total_rows: usize = children.len().div_ceil(GRID_COLUMNS);
    let cursor_row: usize = app.ui.cursor / GRID_COLUMNS;
    let first_row: usize = if cursor_row >= rows_visible {
        cursor_row + 1 - rows_visible
    } else {
        0
    };

    for (vis_row, row) in (first_row..total_rows).take(rows_visible).enumerate() {
        for col in 0..GRID_COLUMNS {
            let idx: usize = row * GRID_COLUMNS + col;
            let Some(child) = children.get(idx) else {
                break;
            };

            let cell = Rect::new(
                area.x + col as u16 * cell_width,
                area.y + vis_row as u16 * CELL_HEIGHT,
                cell_width,
                CELL_HEIGHT,
            );
            render_cell(frame, app, *child, idx == app.ui.cursor, cell);
        }
    }
}

fn render_cell(
    frame: &mut Frame<'_>,
    app: &AppState,
    child: ChildRef<'_>,
    under_cursor: bool,
    area: Rect,
) {
    let selected: bool = app.tree.is_selected(child.id());

    let border_style: Style = if under_cursor {
        Style::default()
            .fg(theme::FOREGROUND)
            .add_modifier(Modifier::BOLD)
    } else if selected {
        theme::selected_style()
    } else {
        Style::default().fg(theme::SURFACE)
    };

    let (icon, icon_color, meta) = match child {
        ChildRef::Folder(folder) => (
            icons::FOLDER_ICON,
            theme::ACCENT,
            humanize::time_ago(folder.created_at),
        ),
        ChildRef::File(file) => {
            let kind = icons::classify_entry(file);
            (kind.icon, kind.color, humanize::human_size(file.size_bytes))
        }
    };

    let marker: &str = if selected { "● " } else { "" };
    let lines = vec![
        Line::styled(icon, Style::default().fg(icon_color)),
        Line::styled(
            format!("{marker}{}", child.name()),
            Style::default().fg(theme::FOREGROUND),
        ),
        Line::styled(meta, theme::muted_style()),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border_style)),
        area,
    );
}
