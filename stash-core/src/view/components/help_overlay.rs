//! src/view/components/help_overlay.rs

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::view::theme;

const BINDINGS: &[(&str, &str)] = &[
    ("u", "upload local files into the current folder"),
    ("n", "create a folder here"),
    ("Enter", "open the folder under the cursor"),
    ("Backspace", "go to the parent folder"),
    ("r", "jump back to the root"),
    ("Space", "select / deselect the entry under the cursor"),
    ("d", "delete the selection"),
    ("s", "save the file under the cursor to disk"),
    ("g / l", "grid / list view"),
    ("arrows, hjkl", "move the cursor"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

pub fn render(frame: &mut Frame<'_>, area: Rect) {
    let width: u16 = 62.min(area.width.saturating_sub(2));
    let height: u16 = (BINDINGS.len() as u16 + 2).min(area.height.saturating_sub(2));
    if width < 20 || height < 4 {
        return;
    }

    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);

    let lines: Vec<Line<'_>> = BINDINGS
        .iter()
        .map(|(key, description)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:<14}"),
                    Style::default().fg(theme::ACCENT),
                ),
                Span::styled(*description, Style::default().fg(theme::FOREGROUND)),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keys ")
                .border_style(theme::overlay_border_style())
                .style(Style::default().bg(theme::BACKGROUND)),
        ),
        popup,
    );
}
