//! src/view/icons.rs
//! ============================================================================
//! # Entry Icons and Kind Classification (Nerd Fonts)
//!
//! Maps a mime/extension hint to a display kind: an icon glyph plus a
//! color tag. Matching is first-match-wins over an ordered substring rule
//! list, so a hint matching several rules resolves to the earliest one.

use ratatui::style::Color;

use crate::model::tree::FileEntry;
use crate::view::theme;

pub const FOLDER_ICON: &str = "";
pub const FILE_ICON: &str = "";

/// Display classification for a file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileKind {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: Color,
}

/// Fallback for anything no rule claims.
pub const GENERIC: FileKind = FileKind {
    label: "file",
    icon: FILE_ICON,
    color: theme::GRAY,
};

const RULES: &[(&[&str], FileKind)] = &[
    (
        &["pdf"],
        FileKind {
            label: "document",
            icon: "",
            color: theme::RED,
        },
    ),
    (
        &["doc", "docx"],
        FileKind {
            label: "document",
            icon: "",
            color: theme::ACCENT,
        },
    ),
    (
        &["xls", "xlsx"],
        FileKind {
            label: "spreadsheet",
            icon: "",
            color: theme::GREEN,
        },
    ),
    (
        &["ppt", "pptx"],
        FileKind {
            label: "presentation",
            icon: "",
            color: theme::ORANGE,
        },
    ),
    (
        &["image", "png", "jpg", "jpeg"],
        FileKind {
            label: "image",
            icon: "",
            color: theme::PURPLE,
        },
    ),
    (
        &["video", "mp4", "avi"],
        FileKind {
            label: "video",
            icon: "",
            color: theme::PINK,
        },
    ),
    (
        &["audio", "mp3", "wav"],
        FileKind {
            label: "audio",
            icon: "",
            color: theme::INDIGO,
        },
    ),
    (
        &["zip", "rar"],
        FileKind {
            label: "archive",
            icon: "",
            color: theme::GRAY,
        },
    ),
];

/// Classify a mime or extension hint.
#[must_use]
pub fn classify(hint: &str) -> &'static FileKind {
    let lowered: String = hint.to_lowercase();
    for (needles, kind) in RULES {
        if needles.iter().any(|needle| lowered.contains(needle)) {
            return kind;
        }
    }
    &GENERIC
}

/// Classify a file entry, falling back to its name when the staged hint
/// is empty.
#[must_use]
pub fn classify_entry(entry: &FileEntry) -> &'static FileKind {
    if entry.mime_hint.is_empty() {
        classify(entry.name.as_str())
    } else {
        classify(entry.mime_hint.as_str())
    }
}
