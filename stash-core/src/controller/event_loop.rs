//! ``src/controller/event_loop.rs``
//! ============================================================================
//! # Event Loop Controller
//!
//! Owns the `AppState` and turns three input sources into state changes:
//! terminal events from the crossterm `EventStream`, the shared upload
//! tick, and internal actions sent back by background staging/export
//! tasks. All mutation happens here, on one task; the only concurrency is
//! the staging reads, which communicate exclusively through the action
//! channel.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use crossterm::event::{
    Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::StreamExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::Interval;
use tracing::{debug, warn};

use crate::controller::actions::Action;
use crate::error::AppError;
use crate::model::app_state::{AppEvent, AppState};
use crate::model::tree::{ChildRef, ContentHandle, EntryId};
use crate::model::ui_state::{GRID_COLUMNS, PromptKind, UIOverlay, ViewMode};
use crate::model::upload::StagedFile;

pub struct EventLoop {
    app: AppState,
    events: EventStream,
    actions_tx: UnboundedSender<Action>,
    actions_rx: UnboundedReceiver<Action>,
}

impl EventLoop {
    #[must_use]
    pub fn new(app: AppState) -> Self {
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        Self {
            app,
            events: EventStream::new(),
            actions_tx,
            actions_rx,
        }
    }

    #[must_use]
    pub fn app(&self) -> &AppState {
        &self.app
    }

    /// Wait for the next action from terminal input, the shared tick, or
    /// a background task.
    pub async fn next_action(&mut self, tick: &mut Interval) -> Action {
        loop {
            tokio::select! {
                maybe_event = self.events.next() => {
                    match maybe_event {
                        Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                            return self.map_key(key);
                        }
                        Some(Ok(TermEvent::Resize(w, h))) => return Action::Resize(w, h),
                        Some(Ok(_)) => {}
                        Some(Err(err)) => {
                            warn!(error = %err, "terminal event stream error");
                            return Action::NoOp;
                        }
                        None => return Action::Quit,
                    }
                }
                _ = tick.tick() => return Action::Tick,
                Some(action) = self.actions_rx.recv() => return action,
            }
        }
    }

    /// Translate a key press into an action, depending on the overlay.
    fn map_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        match self.app.ui.overlay {
            UIOverlay::Help => Action::CloseOverlay,

            UIOverlay::Prompt => match key.code {
                KeyCode::Esc => Action::CloseOverlay,
                KeyCode::Enter => Action::SubmitPrompt,
                KeyCode::Backspace => Action::InputBackspace,
                KeyCode::Up => Action::InputHistoryPrev,
                KeyCode::Down => Action::InputHistoryNext,
                KeyCode::Char(c) => Action::InputChar(c),
                _ => Action::NoOp,
            },

            UIOverlay::None => match key.code {
                KeyCode::Char('q') => Action::Quit,
                KeyCode::Char('?') => Action::ShowHelp,
                KeyCode::Char('g') => Action::SetViewMode(ViewMode::Grid),
                KeyCode::Char('l') => Action::SetViewMode(ViewMode::List),
                KeyCode::Up | KeyCode::Char('k') => Action::MoveCursorUp(self.vertical_step()),
                KeyCode::Down | KeyCode::Char('j') => Action::MoveCursorDown(self.vertical_step()),
                KeyCode::Left | KeyCode::Char('h') => Action::MoveCursorUp(1),
                KeyCode::Right => Action::MoveCursorDown(1),
                KeyCode::Char(' ') => Action::ToggleSelection,
                KeyCode::Enter => Action::NavigateIn,
                KeyCode::Backspace => Action::NavigateUp,
                KeyCode::Char('r') => Action::NavigateRoot,
                KeyCode::Char('d') => Action::DeleteSelected,
                KeyCode::Char('s') => Action::SaveSelected,
                KeyCode::Char('n') => Action::ShowPrompt(PromptKind::NewFolder),
                KeyCode::Char('u') => Action::ShowPrompt(PromptKind::Upload),
                _ => Action::NoOp,
            },
        }
    }

    /// One cursor step along the vertical axis for the active view.
    fn vertical_step(&self) -> usize {
        match self.app.ui.view_mode {
            ViewMode::Grid => GRID_COLUMNS,
            ViewMode::List => 1,
        }
    }

    /// Apply an action to the state.
    pub fn dispatch(&mut self, action: Action) {
        debug!(action = ?action, "dispatch");

        match action {
            Action::NoOp | Action::Resize(..) => {}

            Action::Quit => self.app.request_quit(),

            Action::Tick => {
                let mut rng = rand::rng();
                self.app.tick(&mut rng);
            }

            Action::ShowHelp => self.app.ui.open_help(),
            Action::CloseOverlay => self.app.ui.close_overlay(),
            Action::SetViewMode(mode) => self.app.ui.view_mode = mode,

            Action::MoveCursorUp(step) => self.app.ui.cursor_up(step),
            Action::MoveCursorDown(step) => {
                let len: usize = self.app.tree.visible_children().len();
                self.app.ui.cursor_down(step, len);
            }

            Action::ToggleSelection => {
                if let Some(id) = self.entry_under_cursor() {
                    self.app.tree.toggle_selected(id);
                }
            }

            Action::NavigateIn => self.navigate_in(),

            Action::NavigateUp => match self.app.tree.navigate_up() {
                Ok(()) => self.app.ui.reset_cursor(),
                Err(err) => self.app.emit(AppEvent::NavigationFailed {
                    message: err.to_string(),
                }),
            },

            Action::NavigateRoot => match self.app.tree.navigate_to(None) {
                Ok(()) => self.app.ui.reset_cursor(),
                Err(err) => self.app.emit(AppEvent::NavigationFailed {
                    message: err.to_string(),
                }),
            },

            Action::DeleteSelected => {
                let count: usize = self.app.tree.delete_selected();
                if count > 0 {
                    self.app.emit(AppEvent::ItemsDeleted { count });
                    let len: usize = self.app.tree.visible_children().len();
                    self.app.ui.clamp_cursor(len);
                }
            }

            Action::ShowPrompt(kind) => self.app.ui.open_prompt(kind),
            Action::InputChar(c) => self.app.ui.push_input(c),
            Action::InputBackspace => self.app.ui.pop_input(),
            Action::InputHistoryPrev => self.app.ui.history_prev(),
            Action::InputHistoryNext => self.app.ui.history_next(),

            Action::SubmitPrompt => {
                let kind: Option<PromptKind> = self.app.ui.prompt;
                let text: String = self.app.ui.take_input();
                self.app.ui.close_overlay();
                match kind {
                    Some(PromptKind::NewFolder) => {
                        self.dispatch(Action::CreateFolderWithName(text));
                    }
                    Some(PromptKind::Upload) => self.dispatch(Action::RequestUpload(text)),
                    None => {}
                }
            }

            Action::CreateFolderWithName(name) => {
                let parent: Option<EntryId> = self.app.current_folder();
                match self.app.tree.create_folder(&name, parent) {
                    Ok(folder) => self.app.emit(AppEvent::FolderCreated { name: folder.name }),
                    Err(err) => self.app.emit(AppEvent::ValidationFailed {
                        message: err.to_string(),
                    }),
                }
            }

            Action::RequestUpload(text) => self.request_upload(&text),

            Action::FileStaged(staged) => {
                let target: Option<EntryId> = self.app.current_folder();
                let name: CompactString = staged.name.clone();
                if let Err(err) = self.app.uploads.start(staged, target) {
                    self.app.emit(AppEvent::UploadRejected {
                        name,
                        reason: err.to_string(),
                    });
                }
            }

            Action::StagingFailed { name, reason } => {
                self.app.emit(AppEvent::UploadRejected { name, reason });
            }

            Action::SaveSelected => self.save_under_cursor(),

            Action::SaveCompleted { name, error } => match error {
                None => self.app.emit(AppEvent::FileSaved { name }),
                Some(reason) => self.app.emit(AppEvent::SaveFailed { name, reason }),
            },
        }
    }

    fn entry_under_cursor(&self) -> Option<EntryId> {
        self.app
            .tree
            .visible_children()
            .get(self.app.ui.cursor)
            .map(|child| child.id().clone())
    }

    fn folder_under_cursor(&self) -> Option<EntryId> {
        match self.app.tree.visible_children().get(self.app.ui.cursor) {
            Some(ChildRef::Folder(folder)) => Some(folder.id.clone()),
            _ => None,
        }
    }

    fn navigate_in(&mut self) {
        let Some(target) = self.folder_under_cursor() else {
            return;
        };
        match self.app.tree.navigate_into(&target) {
            Ok(()) => self.app.ui.reset_cursor(),
            Err(err) => self.app.emit(AppEvent::NavigationFailed {
                message: err.to_string(),
            }),
        }
    }

    /// Fan the prompt text out into one staging task per path. Each task
    /// reports back through the action channel; a failed path never stalls
    /// the rest of the batch.
    fn request_upload(&mut self, text: &str) {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            self.app.emit(AppEvent::ValidationFailed {
                message: "Upload path cannot be empty".to_string(),
            });
            return;
        }

        let max_file_size: u64 = self.app.uploads.max_file_size();
        for token in tokens {
            let path = PathBuf::from(token);
            let tx = self.actions_tx.clone();

            tokio::spawn(async move {
                let name: CompactString = display_name(&path);
                let action: Action = match stage_file(&path, max_file_size).await {
                    Ok(staged) => Action::FileStaged(staged),
                    Err(err) => Action::StagingFailed {
                        name,
                        reason: err.to_string(),
                    },
                };
                tx.send(action).ok();
            });
        }
    }

    fn save_under_cursor(&mut self) {
        let Some(id) = self.entry_under_cursor() else {
            return;
        };
        // Folders are not downloadable.
        let Some(file) = self.app.tree.file(&id) else {
            return;
        };

        let name: CompactString = file.name.clone();
        let bytes = file.content.bytes();
        let tx = self.actions_tx.clone();

        tokio::spawn(async move {
            let error: Option<String> = tokio::fs::write(name.as_str(), &bytes)
                .await
                .err()
                .map(|e| e.to_string());
            tx.send(Action::SaveCompleted { name, error }).ok();
        });
    }
}

fn display_name(path: &Path) -> CompactString {
    path.file_name().map_or_else(
        || CompactString::from(path.display().to_string()),
        |s| CompactString::from(s.to_string_lossy().into_owned()),
    )
}

/// Read a local file into a `StagedFile`. An oversize file keeps an empty
/// content handle: the queue refuses it by size alone, so the bytes are
/// never needed.
async fn stage_file(path: &Path, max_file_size: u64) -> Result<StagedFile, AppError> {
    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|e| AppError::staging(path, e))?;

    if !meta.is_file() {
        return Err(AppError::invalid_input(
            "upload path",
            format!("{} is not a file", path.display()),
        ));
    }

    let mime_hint: CompactString = path
        .extension()
        .and_then(OsStr::to_str)
        .map_or_else(CompactString::default, |ext| {
            CompactString::from(ext.to_lowercase())
        });

    let content: ContentHandle = if meta.len() > max_file_size {
        ContentHandle::default()
    } else {
        ContentHandle::from(
            tokio::fs::read(path)
                .await
                .map_err(|e| AppError::staging(path, e))?,
        )
    };

    Ok(StagedFile {
        name: display_name(path),
        size_bytes: meta.len(),
        mime_hint,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::ui_state::{NotificationLevel, UIOverlay};

    fn event_loop() -> EventLoop {
        EventLoop::new(AppState::new(Config::default()))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_create_folder_action_emits_notice() {
        let mut el = event_loop();
        el.dispatch(Action::CreateFolderWithName("Reports".to_string()));

        assert_eq!(el.app().tree.folder_count(), 1);
        let notice = el.app().ui.notification.as_ref().unwrap();
        assert_eq!(notice.level, NotificationLevel::Success);
        assert!(notice.message.contains("Reports"));
    }

    #[test]
    fn test_blank_folder_name_surfaces_validation_error() {
        let mut el = event_loop();
        el.dispatch(Action::CreateFolderWithName("   ".to_string()));

        assert_eq!(el.app().tree.folder_count(), 0);
        let notice = el.app().ui.notification.as_ref().unwrap();
        assert_eq!(notice.level, NotificationLevel::Error);
    }

    #[test]
    fn test_submit_prompt_routes_to_folder_creation() {
        let mut el = event_loop();
        el.dispatch(Action::ShowPrompt(PromptKind::NewFolder));
        for c in "Docs".chars() {
            el.dispatch(Action::InputChar(c));
        }
        el.dispatch(Action::SubmitPrompt);

        assert_eq!(el.app().ui.overlay, UIOverlay::None);
        assert_eq!(el.app().tree.folder_count(), 1);
    }

    #[test]
    fn test_toggle_selection_targets_the_cursor() {
        let mut el = event_loop();
        el.dispatch(Action::CreateFolderWithName("a".to_string()));
        el.dispatch(Action::CreateFolderWithName("b".to_string()));

        el.dispatch(Action::MoveCursorDown(1));
        el.dispatch(Action::ToggleSelection);

        assert_eq!(el.app().tree.selected_count(), 1);
        let children = el.app().tree.visible_children();
        assert!(el.app().tree.is_selected(children[1].id()));
    }

    #[test]
    fn test_navigate_in_and_up_reset_the_cursor() {
        let mut el = event_loop();
        el.dispatch(Action::CreateFolderWithName("a".to_string()));
        el.dispatch(Action::CreateFolderWithName("b".to_string()));
        el.dispatch(Action::MoveCursorDown(1));

        el.dispatch(Action::NavigateIn);
        assert_eq!(el.app().ui.cursor, 0);
        assert!(el.app().tree.location().current.is_some());

        el.dispatch(Action::NavigateUp);
        assert!(el.app().tree.location().current.is_none());
    }

    #[test]
    fn test_delete_selected_reports_the_count() {
        let mut el = event_loop();
        el.dispatch(Action::CreateFolderWithName("a".to_string()));
        el.dispatch(Action::CreateFolderWithName("b".to_string()));
        el.dispatch(Action::ToggleSelection);
        el.dispatch(Action::MoveCursorDown(1));
        el.dispatch(Action::ToggleSelection);

        el.dispatch(Action::DeleteSelected);

        assert_eq!(el.app().tree.folder_count(), 0);
        let notice = el.app().ui.notification.as_ref().unwrap();
        assert!(notice.message.contains("2 item(s)"));
    }

    #[test]
    fn test_key_mapping_in_browse_mode() {
        let el = event_loop();
        assert!(matches!(el.map_key(press(KeyCode::Char('q'))), Action::Quit));
        assert!(matches!(
            el.map_key(press(KeyCode::Char('n'))),
            Action::ShowPrompt(PromptKind::NewFolder)
        ));
        assert!(matches!(
            el.map_key(press(KeyCode::Char('u'))),
            Action::ShowPrompt(PromptKind::Upload)
        ));
        assert!(matches!(
            el.map_key(press(KeyCode::Enter)),
            Action::NavigateIn
        ));
        // Grid view moves by a full row vertically.
        assert!(matches!(
            el.map_key(press(KeyCode::Down)),
            Action::MoveCursorDown(GRID_COLUMNS)
        ));
    }

    #[test]
    fn test_key_mapping_inside_prompt() {
        let mut el = event_loop();
        el.dispatch(Action::ShowPrompt(PromptKind::Upload));

        assert!(matches!(
            el.map_key(press(KeyCode::Char('q'))),
            Action::InputChar('q')
        ));
        assert!(matches!(
            el.map_key(press(KeyCode::Esc)),
            Action::CloseOverlay
        ));
        assert!(matches!(
            el.map_key(press(KeyCode::Enter)),
            Action::SubmitPrompt
        ));
    }

    #[tokio::test]
    async fn test_request_upload_stages_local_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, b"hello stash").unwrap();

        let mut el = event_loop();
        el.dispatch(Action::RequestUpload(path.display().to_string()));

        let action = el.actions_rx.recv().await.unwrap();
        match &action {
            Action::FileStaged(staged) => {
                assert_eq!(staged.name, "hello.txt");
                assert_eq!(staged.size_bytes, 11);
                assert_eq!(staged.mime_hint, "txt");
            }
            other => panic!("expected FileStaged, got {other:?}"),
        }

        el.dispatch(action);
        assert_eq!(el.app().uploads.len(), 1);
    }

    #[tokio::test]
    async fn test_request_upload_reports_missing_paths() {
        let mut el = event_loop();
        el.dispatch(Action::RequestUpload("/definitely/not/here.bin".to_string()));

        let action = el.actions_rx.recv().await.unwrap();
        assert!(matches!(action, Action::StagingFailed { .. }));

        el.dispatch(action);
        assert!(el.app().uploads.is_idle());
        let notice = el.app().ui.notification.as_ref().unwrap();
        assert_eq!(notice.level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_stage_file_skips_content_for_oversize() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        std::fs::write(&path, vec![0u8; 64]).unwrap();

        let staged = stage_file(&path, 16).await.unwrap();
        assert_eq!(staged.size_bytes, 64);
        assert!(staged.content.is_empty());

        let mut queue = crate::model::upload::UploadQueue::new(16);
        assert!(queue.start(staged, None).is_err());
    }
}
