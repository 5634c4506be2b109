//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Application Commands
//!
//! Defines the `Action` enum, which represents all possible user inputs and
//! internal events the application responds to. Raw terminal events are
//! mapped into these before the dispatcher ever sees them, giving a single,
//! clear interface to process.

use compact_str::CompactString;

use crate::model::ui_state::{PromptKind, ViewMode};
use crate::model::upload::StagedFile;

/// Represents a high-level action that the application can perform.
#[derive(Debug, Clone)]
pub enum Action {
    /// Close the currently active overlay.
    CloseOverlay,

    /// Create a folder with this name under the current folder.
    CreateFolderWithName(String),

    /// Delete everything in the selection set.
    DeleteSelected,

    /// A staging task finished reading a local file for upload.
    FileStaged(StagedFile),

    /// Delete the character before the prompt cursor.
    InputBackspace,

    /// Append a character to the prompt input.
    InputChar(char),

    /// Walk forward through prompt history.
    InputHistoryNext,

    /// Recall the previous prompt submission.
    InputHistoryPrev,

    /// Move the listing cursor down by `step` entries.
    MoveCursorDown(usize),

    /// Move the listing cursor up by `step` entries.
    MoveCursorUp(usize),

    /// Descend into the folder under the cursor.
    NavigateIn,

    /// Jump to the virtual root.
    NavigateRoot,

    /// Go to the parent breadcrumb.
    NavigateUp,

    /// No operation. Used when an event is consumed but no state change
    /// is needed.
    NoOp,

    /// Quit the application.
    Quit,

    /// Stage the whitespace-separated local paths in this prompt text.
    RequestUpload(String),

    /// A terminal resize event; the next draw picks up the new size.
    Resize(u16, u16),

    /// An export task finished writing a file to the working directory.
    SaveCompleted {
        name: CompactString,
        error: Option<String>,
    },

    /// Export the file under the cursor to the working directory.
    SaveSelected,

    /// Switch between grid and list rendering.
    SetViewMode(ViewMode),

    /// Open the help overlay.
    ShowHelp,

    /// Open an input prompt.
    ShowPrompt(PromptKind),

    /// A staging task failed to read its local file.
    StagingFailed {
        name: CompactString,
        reason: String,
    },

    /// Submit the open prompt's input.
    SubmitPrompt,

    /// Shared progress tick for uploads and notification expiry.
    Tick,

    /// Toggle selection of the entry under the cursor.
    ToggleSelection,
}
