//! src/view/theme.rs
//! ============================================================================
//! # Color Palette and Shared Styles
//!
//! Catppuccin Mocha derived palette plus the handful of composite styles
//! shared between components.

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(30, 30, 46); // Base
pub const SURFACE: Color = Color::Rgb(49, 50, 68); // Surface0
pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // Text
pub const MUTED: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const ACCENT: Color = Color::Rgb(137, 180, 250); // Blue
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const GREEN: Color = Color::Rgb(166, 227, 161); // Green
pub const ORANGE: Color = Color::Rgb(250, 179, 135); // Peach
pub const PINK: Color = Color::Rgb(245, 194, 231); // Pink
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const RED: Color = Color::Rgb(243, 139, 168); // Red
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow
pub const INDIGO: Color = Color::Rgb(180, 190, 254); // Lavender
pub const GRAY: Color = Color::Rgb(147, 153, 178); // Overlay2

pub fn base_style() -> Style {
    Style::default().bg(BACKGROUND).fg(FOREGROUND)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn cursor_style() -> Style {
    Style::default()
        .bg(SURFACE)
        .fg(FOREGROUND)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn overlay_border_style() -> Style {
    Style::default().fg(PURPLE)
}

pub fn gauge_style() -> Style {
    Style::default().fg(ACCENT).bg(SURFACE)
}
