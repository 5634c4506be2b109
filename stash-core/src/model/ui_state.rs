//! ``src/model/ui_state.rs``
//! ============================================================================
//! # `UIState`: Presentation State
//!
//! View mode, overlay/prompt state, list cursor, prompt input with history,
//! and the transient notification slot. Everything here is derived comfort
//! for the renderer; the virtual drive itself lives in `FileTree`.

use std::time::{Duration, Instant};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Columns the grid view lays out. Left/Right move the cursor by one
/// entry, Up/Down by a full row.
pub const GRID_COLUMNS: usize = 4;

/// Grid or list rendering for the entry area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Active full-screen overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum UIOverlay {
    #[default]
    None = 0,
    Help = 1,
    Prompt = 2,
}

/// What the open prompt is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    NewFolder,
    Upload,
}

/// Notification levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Info = 0,
    Success = 1,
    Warning = 2,
    Error = 3,
}

/// Compact notification with timestamp.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss: Option<Duration>,
}

impl Notification {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.auto_dismiss
            .is_some_and(|ttl| now.duration_since(self.timestamp) >= ttl)
    }
}

/// Presentation state for the session.
#[derive(Debug)]
pub struct UIState {
    pub view_mode: ViewMode,
    pub overlay: UIOverlay,
    pub prompt: Option<PromptKind>,

    /// Cursor into the current combined listing (folders, then files).
    pub cursor: usize,

    // Prompt input with history recall.
    pub input: CompactString,
    input_history: SmallVec<[CompactString; 8]>,
    input_history_index: Option<usize>,

    pub notification: Option<Notification>,
    notification_timeout: Duration,
}

impl UIState {
    #[must_use]
    pub fn new(view_mode: ViewMode, notification_timeout: Duration) -> Self {
        Self {
            view_mode,
            overlay: UIOverlay::None,
            prompt: None,
            cursor: 0,
            input: CompactString::default(),
            input_history: SmallVec::new(),
            input_history_index: None,
            notification: None,
            notification_timeout,
        }
    }

    // ------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<CompactString>) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            timestamp: Instant::now(),
            auto_dismiss: Some(self.notification_timeout),
        });
    }

    /// Drop the notification once its dismiss interval has elapsed.
    pub fn expire_notification(&mut self) {
        let now = Instant::now();
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }
    }

    // ------------------------------------------------------------
    // Overlays and prompt input
    // ------------------------------------------------------------

    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.overlay = UIOverlay::Prompt;
        self.prompt = Some(kind);
        self.input.clear();
        self.input_history_index = None;
    }

    pub fn open_help(&mut self) {
        self.overlay = UIOverlay::Help;
    }

    pub fn close_overlay(&mut self) {
        self.overlay = UIOverlay::None;
        self.prompt = None;
        self.input.clear();
        self.input_history_index = None;
    }

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// Consume the prompt input, recording non-blank submissions in the
    /// history ring.
    pub fn take_input(&mut self) -> String {
        let text: String = std::mem::take(&mut self.input).into();
        if !text.trim().is_empty() {
            if self.input_history.len() == self.input_history.inline_size() {
                self.input_history.remove(0);
            }
            self.input_history.push(CompactString::new(&text));
        }
        self.input_history_index = None;
        text
    }

    /// Recall the previous submission into the prompt.
    pub fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }
        let next_index: usize = match self.input_history_index {
            None => self.input_history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.input_history_index = Some(next_index);
        self.input = self.input_history[next_index].clone();
    }

    /// Walk forward through history, ending on an empty prompt.
    pub fn history_next(&mut self) {
        match self.input_history_index {
            None => {}
            Some(i) if i + 1 < self.input_history.len() => {
                self.input_history_index = Some(i + 1);
                self.input = self.input_history[i + 1].clone();
            }
            Some(_) => {
                self.input_history_index = None;
                self.input.clear();
            }
        }
    }

    // ------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------

    pub fn cursor_up(&mut self, step: usize) {
        self.cursor = self.cursor.saturating_sub(step);
    }

    pub fn cursor_down(&mut self, step: usize, len: usize) {
        if len == 0 {
            self.cursor = 0;
        } else {
            self.cursor = (self.cursor + step).min(len - 1);
        }
    }

    /// Keep the cursor inside the listing after mutations shrink it.
    pub fn clamp_cursor(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui() -> UIState {
        UIState::new(ViewMode::Grid, Duration::from_millis(10))
    }

    #[test]
    fn test_notification_expiry() {
        let mut state = ui();
        state.notify(NotificationLevel::Success, "done");
        assert!(state.notification.is_some());

        std::thread::sleep(Duration::from_millis(15));
        state.expire_notification();
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_prompt_lifecycle_clears_input() {
        let mut state = ui();
        state.open_prompt(PromptKind::NewFolder);
        state.push_input('d');
        state.push_input('o');
        state.push_input('c');
        assert_eq!(state.input, "doc");

        state.close_overlay();
        assert_eq!(state.overlay, UIOverlay::None);
        assert!(state.prompt.is_none());
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_take_input_records_history() {
        let mut state = ui();
        state.open_prompt(PromptKind::NewFolder);
        state.push_input('a');
        assert_eq!(state.take_input(), "a");

        state.open_prompt(PromptKind::NewFolder);
        state.history_prev();
        assert_eq!(state.input, "a");
        state.history_next();
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_cursor_clamps_to_listing() {
        let mut state = ui();
        state.cursor_down(1, 3);
        state.cursor_down(1, 3);
        state.cursor_down(1, 3);
        assert_eq!(state.cursor, 2);

        state.clamp_cursor(1);
        assert_eq!(state.cursor, 0);

        state.cursor_up(1);
        assert_eq!(state.cursor, 0);
    }
}
