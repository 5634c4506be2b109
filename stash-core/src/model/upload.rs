//! ``src/model/upload.rs``
//! ============================================================================
//! # `UploadQueue`: Tick-Driven Upload Simulation
//!
//! Every upload is a tiny state machine: `Pending -> InProgress ->
//! Completed`, with no failed terminal state. Progress advances on discrete
//! `tick` calls by a pseudo-random increment and clamps at 100, at which
//! point the pending record is discarded and exactly one completion event
//! carrying the synthesized `FileEntry` is emitted.
//!
//! The queue never touches timers itself; the host drives one shared tick,
//! so the machine is testable without real time.

use chrono::Local;
use compact_str::CompactString;
use rand::Rng;
use tracing::debug;

use crate::error::AppError;
use crate::model::tree::{ContentHandle, EntryId, FileEntry};

/// Default size gate for staged files: 100 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Upper bound of the per-tick progress increment, in percentage points.
const MAX_STEP: f64 = 30.0;

/// Lifecycle of a single simulated upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Pending,
    InProgress,
    Completed,
}

/// A file handed over by the staging layer, ready to be "uploaded".
///
/// For an oversize file the staging layer leaves `content` empty, since
/// `start` refuses it before the bytes would ever be needed.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub name: CompactString,
    pub size_bytes: u64,
    pub mime_hint: CompactString,
    pub content: ContentHandle,
}

/// Transient record tracking one in-flight simulated upload.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    id: EntryId,
    name: CompactString,
    size_bytes: u64,
    mime_hint: CompactString,
    progress: f64,
    target: Option<EntryId>,
    content: ContentHandle,
    phase: UploadPhase,
}

impl PendingUpload {
    #[must_use]
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Progress in `0..=100`, monotonically non-decreasing.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Rounded percentage for display.
    #[must_use]
    pub fn percent(&self) -> u16 {
        self.progress.round() as u16
    }

    #[must_use]
    pub const fn phase(&self) -> UploadPhase {
        self.phase
    }

    /// Synthesize the terminal file entry. The pending id becomes the
    /// entry id; the content handle transfers ownership here.
    fn into_entry(self) -> FileEntry {
        FileEntry {
            id: self.id,
            name: self.name,
            size_bytes: self.size_bytes,
            mime_hint: self.mime_hint,
            uploaded_at: Local::now(),
            folder: self.target,
            content: self.content,
            is_public: false,
        }
    }
}

/// Terminal events produced by `tick`.
#[derive(Debug)]
pub enum UploadEvent {
    Completed { entry: FileEntry },
}

/// All in-flight simulated uploads, driven by one shared tick.
#[derive(Debug)]
pub struct UploadQueue {
    max_file_size: u64,
    in_flight: Vec<PendingUpload>,
}

impl UploadQueue {
    #[must_use]
    pub fn new(max_file_size: u64) -> Self {
        Self {
            max_file_size,
            in_flight: Vec::new(),
        }
    }

    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Admit a staged file, entering `InProgress` at 0%.
    ///
    /// Oversize files are rejected without enqueuing anything; other files
    /// of the same batch proceed independently.
    pub fn start(
        &mut self,
        staged: StagedFile,
        target: Option<EntryId>,
    ) -> Result<EntryId, AppError> {
        if staged.size_bytes > self.max_file_size {
            return Err(AppError::file_too_large(
                staged.name.as_str(),
                staged.size_bytes,
                self.max_file_size,
            ));
        }

        let id = EntryId::new();
        debug!(upload_id = %id, name = %staged.name, size = staged.size_bytes, "upload started");

        self.in_flight.push(PendingUpload {
            id: id.clone(),
            name: staged.name,
            size_bytes: staged.size_bytes,
            mime_hint: staged.mime_hint,
            progress: 0.0,
            target,
            content: staged.content,
            phase: UploadPhase::InProgress,
        });

        Ok(id)
    }

    /// Advance every in-flight upload by an independent random step and
    /// drain the ones that reached 100.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Vec<UploadEvent> {
        for upload in &mut self.in_flight {
            let step: f64 = rng.random_range(0.0..MAX_STEP);
            upload.progress = (upload.progress + step).min(100.0);
            if upload.progress >= 100.0 {
                upload.phase = UploadPhase::Completed;
            }
        }

        let mut events: Vec<UploadEvent> = Vec::new();
        let mut i: usize = 0;
        while i < self.in_flight.len() {
            if self.in_flight[i].phase == UploadPhase::Completed {
                let done: PendingUpload = self.in_flight.remove(i);
                debug!(upload_id = %done.id, name = %done.name, "upload completed");
                events.push(UploadEvent::Completed {
                    entry: done.into_entry(),
                });
            } else {
                i += 1;
            }
        }

        events
    }

    #[must_use]
    pub fn in_flight(&self) -> &[PendingUpload] {
        &self.in_flight
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}

impl Default for UploadQueue {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn staged(name: &str, size_bytes: u64) -> StagedFile {
        let hint: &str = name.rsplit('.').next().unwrap_or("");
        StagedFile {
            name: CompactString::new(name),
            size_bytes,
            mime_hint: CompactString::new(hint),
            content: ContentHandle::from(vec![0u8; 8]),
        }
    }

    #[test]
    fn test_start_rejects_oversize_files() {
        let mut queue = UploadQueue::default();
        let err = queue
            .start(staged("huge.iso", DEFAULT_MAX_FILE_SIZE + 1), None)
            .unwrap_err();

        assert!(matches!(err, AppError::FileTooLarge { .. }));
        assert!(queue.is_idle());
    }

    #[test]
    fn test_start_admits_files_at_the_limit() {
        let mut queue = UploadQueue::default();
        queue
            .start(staged("exactly.bin", DEFAULT_MAX_FILE_SIZE), None)
            .unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_progress_is_monotonic_and_completes_once() {
        let mut queue = UploadQueue::default();
        let mut rng = StdRng::seed_from_u64(7);
        queue.start(staged("report.pdf", 4096), None).unwrap();

        let mut last: f64 = 0.0;
        let mut completions: usize = 0;

        for _ in 0..1000 {
            if let Some(upload) = queue.in_flight().first() {
                assert!(upload.progress() >= last);
                assert!(upload.progress() <= 100.0);
                last = upload.progress();
            }
            completions += queue.tick(&mut rng).len();
            if queue.is_idle() {
                break;
            }
        }

        assert!(queue.is_idle(), "upload never finished");
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_completion_carries_the_staged_metadata() {
        let mut queue = UploadQueue::default();
        let mut rng = StdRng::seed_from_u64(42);
        let target = EntryId::new();
        let id = queue
            .start(staged("photo.png", 2048), Some(target.clone()))
            .unwrap();

        let mut completed = None;
        for _ in 0..1000 {
            if let Some(UploadEvent::Completed { entry }) = queue.tick(&mut rng).pop() {
                completed = Some(entry);
                break;
            }
        }
        let entry = completed.expect("upload never completed");

        assert_eq!(entry.id, id);
        assert_eq!(entry.name, "photo.png");
        assert_eq!(entry.size_bytes, 2048);
        assert_eq!(entry.mime_hint, "png");
        assert_eq!(entry.folder, Some(target));
        assert!(!entry.is_public);
    }

    #[test]
    fn test_concurrent_uploads_advance_independently() {
        let mut queue = UploadQueue::default();
        let mut rng = StdRng::seed_from_u64(3);
        queue.start(staged("a.bin", 10), None).unwrap();
        queue.start(staged("b.bin", 20), None).unwrap();
        queue.start(staged("c.bin", 30), None).unwrap();

        let mut total: usize = 0;
        for _ in 0..1000 {
            total += queue.tick(&mut rng).len();
            if queue.is_idle() {
                break;
            }
        }

        assert!(queue.is_idle());
        assert_eq!(total, 3);
    }
}
