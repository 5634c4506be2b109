//! ``src/model/app_state.rs``
//! ============================================================================
//! # `AppState`: Session Aggregate
//!
//! Owns the virtual drive, the upload queue, and the presentation state,
//! and is the single place semantic events turn into notifications. The
//! dispatcher is the only writer; there are no shared globals.

use compact_str::CompactString;
use rand::Rng;
use tracing::{info, warn};

use crate::config::Config;
use crate::model::tree::{EntryId, FileTree};
use crate::model::ui_state::{NotificationLevel, UIState};
use crate::model::upload::{UploadEvent, UploadQueue};

/// Semantic events emitted by core operations, rendered as transient
/// notices by the presentation layer.
#[derive(Debug)]
pub enum AppEvent {
    UploadSucceeded { name: CompactString },
    UploadRejected { name: CompactString, reason: String },
    FolderCreated { name: CompactString },
    ItemsDeleted { count: usize },
    ValidationFailed { message: String },
    NavigationFailed { message: String },
    FileSaved { name: CompactString },
    SaveFailed { name: CompactString, reason: String },
}

/// Everything the session knows, mutated only by the dispatcher.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub tree: FileTree,
    pub uploads: UploadQueue,
    pub ui: UIState,
    quit: bool,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let ui = UIState::new(config.ui.default_view, config.ui.notification_timeout);
        let uploads = UploadQueue::new(config.upload.max_file_size);

        Self {
            config,
            tree: FileTree::new(),
            uploads,
            ui,
            quit: false,
        }
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Id of the folder the user is currently inside (`None` = root).
    #[must_use]
    pub fn current_folder(&self) -> Option<EntryId> {
        self.tree.location().current.clone()
    }

    /// Surface a semantic event as a notification, logging it as well.
    pub fn emit(&mut self, event: AppEvent) {
        let (level, message): (NotificationLevel, String) = match &event {
            AppEvent::UploadSucceeded { name } => (
                NotificationLevel::Success,
                format!("{name} uploaded successfully!"),
            ),
            AppEvent::UploadRejected { reason, .. } => {
                (NotificationLevel::Error, reason.clone())
            }
            AppEvent::FolderCreated { name } => (
                NotificationLevel::Success,
                format!("Folder \"{name}\" created successfully!"),
            ),
            AppEvent::ItemsDeleted { count } => (
                NotificationLevel::Success,
                format!("{count} item(s) deleted successfully!"),
            ),
            AppEvent::ValidationFailed { message } => {
                (NotificationLevel::Error, message.clone())
            }
            AppEvent::NavigationFailed { message } => {
                (NotificationLevel::Error, message.clone())
            }
            AppEvent::FileSaved { name } => (
                NotificationLevel::Success,
                format!("{name} saved to the working directory"),
            ),
            AppEvent::SaveFailed { name, reason } => (
                NotificationLevel::Error,
                format!("Could not save {name}: {reason}"),
            ),
        };

        match level {
            NotificationLevel::Error | NotificationLevel::Warning => {
                warn!(event = ?event, "{message}");
            }
            _ => {
                info!(event = ?event, "{message}");
            }
        }

        self.ui.notify(level, message);
    }

    /// One shared tick: advance the simulated uploads, fold completions
    /// into the tree, and expire stale notices.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        for event in self.uploads.tick(rng) {
            match event {
                UploadEvent::Completed { entry } => {
                    let name: CompactString = entry.name.clone();
                    self.tree.add_file(entry);
                    self.emit(AppEvent::UploadSucceeded { name });
                }
            }
        }

        self.ui.expire_notification();
        self.ui.clamp_cursor(self.tree.visible_children().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tree::ContentHandle;
    use crate::model::upload::StagedFile;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn app() -> AppState {
        AppState::new(Config::default())
    }

    fn staged(name: &str, size_bytes: u64) -> StagedFile {
        StagedFile {
            name: CompactString::new(name),
            size_bytes,
            mime_hint: CompactString::new("pdf"),
            content: ContentHandle::from(vec![1u8; 64]),
        }
    }

    #[test]
    fn test_upload_lands_in_the_folder_active_at_start() {
        let mut app = app();
        let mut rng = StdRng::seed_from_u64(11);

        let reports = app.tree.create_folder("Reports", None).unwrap();
        app.tree.navigate_into(&reports.id).unwrap();

        app.uploads
            .start(staged("q3.pdf", 5 * 1024 * 1024), app.current_folder())
            .unwrap();

        // Navigating away mid-flight must not redirect the completion.
        app.tree.navigate_to(None).unwrap();

        for _ in 0..1000 {
            app.tick(&mut rng);
            if app.uploads.is_idle() {
                break;
            }
        }
        assert!(app.uploads.is_idle());

        let (root_folders, root_files) = app.tree.list_children(None);
        assert_eq!(root_folders.len(), 1);
        assert_eq!(root_files.len(), 0);

        let (folders, files) = app.tree.list_children(Some(&reports.id));
        assert_eq!(folders.len(), 0);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "q3.pdf");
        assert_eq!(files[0].folder, Some(reports.id.clone()));
    }

    #[test]
    fn test_completion_emits_a_success_notice() {
        let mut app = app();
        let mut rng = StdRng::seed_from_u64(5);

        app.uploads.start(staged("a.pdf", 100), None).unwrap();
        for _ in 0..1000 {
            app.tick(&mut rng);
            if app.uploads.is_idle() {
                break;
            }
        }

        let notice = app.ui.notification.as_ref().unwrap();
        assert_eq!(notice.level, NotificationLevel::Success);
        assert!(notice.message.contains("a.pdf"));
    }

    #[test]
    fn test_rejected_upload_leaves_the_queue_idle() {
        let mut app = app();
        let limit = app.uploads.max_file_size();

        let err = app
            .uploads
            .start(staged("huge.iso", limit + 1), None)
            .unwrap_err();
        app.emit(AppEvent::UploadRejected {
            name: CompactString::new("huge.iso"),
            reason: err.to_string(),
        });

        assert!(app.uploads.is_idle());
        let notice = app.ui.notification.as_ref().unwrap();
        assert_eq!(notice.level, NotificationLevel::Error);
        assert!(notice.message.contains("huge.iso"));
    }
}
