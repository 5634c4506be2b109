pub mod error;

pub mod config;

pub mod logging;

pub mod model {
    pub mod app_state;
    pub use app_state::{AppEvent, AppState};

    pub mod tree;
    pub use tree::{ChildRef, ContentHandle, Crumb, EntryId, FileEntry, FileTree, Folder, Location};

    pub mod upload;
    pub use upload::{PendingUpload, StagedFile, UploadEvent, UploadPhase, UploadQueue};

    pub mod ui_state;
    pub use ui_state::{Notification, NotificationLevel, PromptKind, UIOverlay, UIState, ViewMode};
}

pub mod controller {
    pub mod actions;
    pub use actions::Action;

    pub mod event_loop;
    pub use event_loop::EventLoop;
}

pub mod view {
    pub mod icons;

    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod breadcrumb_bar;
        pub mod entry_grid;
        pub mod entry_table;
        pub mod help_overlay;
        pub mod notification_overlay;
        pub mod prompt_overlay;
        pub mod status_bar;
        pub mod upload_panel;
    }
}

pub mod util {
    pub mod humanize;
}

pub use error::AppError;

pub use model::{app_state::AppState, tree::FileTree, ui_state::UIState};
