//! ``src/model/tree.rs``
//! ============================================================================
//! # `FileTree`: In-Memory Virtual Drive State
//!
//! Owns the folder/file maps, the current location with its breadcrumb
//! trail, and the selection set. This is the only mutation surface for the
//! virtual hierarchy; the view layer reads it, the dispatcher drives it.
//!
//! The whole tree is transient: nothing is persisted and everything is
//! dropped on exit.

use bytes::Bytes;
use chrono::{DateTime, Local};
use compact_str::CompactString;
use indexmap::{IndexMap, IndexSet};
use nanoid::nanoid;

use crate::error::AppError;

/// Display name for the virtual root. The root itself is not an entry;
/// it is the `None` parent.
pub const ROOT_NAME: &str = "My Files";

/// Opaque unique id shared by folders and files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(CompactString);

impl EntryId {
    /// Mint a fresh unique id.
    #[must_use]
    pub fn new() -> Self {
        Self(CompactString::from(nanoid!()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle standing in for the stored bytes of an uploaded file.
///
/// The handle is the only strong reference once it is transferred into a
/// `FileEntry`; deleting the entry releases the backing allocation.
#[derive(Debug, Clone, Default)]
pub struct ContentHandle(Bytes);

impl ContentHandle {
    #[must_use]
    pub fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cheap clone of the underlying bytes for download/export.
    #[must_use]
    pub fn bytes(&self) -> Bytes {
        self.0.clone()
    }
}

impl From<Vec<u8>> for ContentHandle {
    fn from(v: Vec<u8>) -> Self {
        Self(Bytes::from(v))
    }
}

/// A folder node. `parent == None` means the virtual root.
#[derive(Debug, Clone)]
pub struct Folder {
    pub id: EntryId,
    pub name: CompactString,
    pub parent: Option<EntryId>,
    pub created_at: DateTime<Local>,
}

/// A file node, created exclusively by upload completion.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub id: EntryId,
    pub name: CompactString,
    pub size_bytes: u64,
    pub mime_hint: CompactString,
    pub uploaded_at: DateTime<Local>,
    pub folder: Option<EntryId>,
    pub content: ContentHandle,
    pub is_public: bool,
}

/// One ancestor on the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub id: Option<EntryId>,
    pub name: CompactString,
}

/// Current folder plus the ordered ancestors from root down to its parent.
#[derive(Debug, Clone, Default)]
pub struct Location {
    pub current: Option<EntryId>,
    pub trail: Vec<Crumb>,
}

/// A child of the current folder, folders listed before files.
#[derive(Debug, Clone, Copy)]
pub enum ChildRef<'a> {
    Folder(&'a Folder),
    File(&'a FileEntry),
}

impl ChildRef<'_> {
    #[must_use]
    pub fn id(&self) -> &EntryId {
        match self {
            Self::Folder(f) => &f.id,
            Self::File(f) => &f.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(f) => f.name.as_str(),
            Self::File(f) => f.name.as_str(),
        }
    }

    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }
}

/// In-memory store for the whole session.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    folders: IndexMap<EntryId, Folder>,
    files: IndexMap<EntryId, FileEntry>,
    location: Location,
    selection: IndexSet<EntryId>,
}

impl FileTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------
    // Mutation surface
    // ------------------------------------------------------------

    /// Create a folder under `parent` from user input.
    ///
    /// The name is trimmed; an empty result is rejected without touching
    /// the store. A non-root parent must exist.
    pub fn create_folder(
        &mut self,
        name: &str,
        parent: Option<EntryId>,
    ) -> Result<Folder, AppError> {
        let trimmed: &str = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input(
                "folder name",
                "cannot be empty",
            ));
        }

        if let Some(pid) = &parent
            && !self.folders.contains_key(pid)
        {
            return Err(AppError::not_found(format!("parent folder {pid}")));
        }

        let folder = Folder {
            id: EntryId::new(),
            name: CompactString::new(trimmed),
            parent,
            created_at: Local::now(),
        };

        self.folders.insert(folder.id.clone(), folder.clone());
        Ok(folder)
    }

    /// Insert a fully-formed file entry. Duplicate names are permitted.
    pub fn add_file(&mut self, entry: FileEntry) {
        self.files.insert(entry.id.clone(), entry);
    }

    /// Remove the given entries wherever they live, recursing into folder
    /// subtrees. Content handles of removed files are released with their
    /// entries. Returns the total number of entries removed.
    pub fn delete_entries(&mut self, ids: &[EntryId]) -> usize {
        let doomed_folders: IndexSet<EntryId> = self.collect_subtrees(
            ids.iter()
                .filter(|id| self.folders.contains_key(*id))
                .cloned()
                .collect(),
        );
        let doomed_files: IndexSet<&EntryId> = ids
            .iter()
            .filter(|id| self.files.contains_key(*id))
            .collect();

        let mut removed: usize = 0;

        self.folders.retain(|id, _| {
            if doomed_folders.contains(id) {
                removed += 1;
                false
            } else {
                true
            }
        });

        self.files.retain(|id, entry| {
            let in_doomed_folder = entry
                .folder
                .as_ref()
                .is_some_and(|fid| doomed_folders.contains(fid));
            if doomed_files.contains(id) || in_doomed_folder {
                removed += 1;
                false
            } else {
                true
            }
        });

        self.selection
            .retain(|id| self.folders.contains_key(id) || self.files.contains_key(id));

        removed
    }

    /// Delete everything currently selected, clearing the selection.
    pub fn delete_selected(&mut self) -> usize {
        let ids: Vec<EntryId> = self.selection.drain(..).collect();
        self.delete_entries(&ids)
    }

    // ------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------

    /// Descend into a folder, pushing the current location onto the trail.
    pub fn navigate_into(&mut self, id: &EntryId) -> Result<(), AppError> {
        if !self.folders.contains_key(id) {
            return Err(AppError::not_found(format!("folder {id}")));
        }

        let crumb = Crumb {
            id: self.location.current.clone(),
            name: self.current_name(),
        };
        self.location.trail.push(crumb);
        self.location.current = Some(id.clone());
        self.selection.clear();
        Ok(())
    }

    /// Jump to an ancestor on the trail, or to the root (`None`).
    ///
    /// A target that is not on the trail is an explicit error; the store
    /// is left untouched.
    pub fn navigate_to(&mut self, target: Option<EntryId>) -> Result<(), AppError> {
        match target {
            None => {
                self.location.trail.clear();
                self.location.current = None;
            }
            Some(id) => {
                let pos: usize = self
                    .location
                    .trail
                    .iter()
                    .position(|c| c.id.as_ref() == Some(&id))
                    .ok_or_else(|| AppError::not_found(format!("breadcrumb target {id}")))?;

                self.location.trail.truncate(pos);
                self.location.current = Some(id);
            }
        }
        self.selection.clear();
        Ok(())
    }

    /// Step up to the parent crumb; a no-op at the root.
    pub fn navigate_up(&mut self) -> Result<(), AppError> {
        match self.location.trail.last() {
            Some(crumb) => {
                let target: Option<EntryId> = crumb.id.clone();
                self.navigate_to(target)
            }
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Display name of the current folder.
    #[must_use]
    pub fn current_name(&self) -> CompactString {
        match &self.location.current {
            None => CompactString::new(ROOT_NAME),
            Some(id) => self
                .folders
                .get(id)
                .map_or_else(|| CompactString::new(ROOT_NAME), |f| f.name.clone()),
        }
    }

    // ------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------

    /// Toggle membership in the selection set. No validation that the id
    /// still exists.
    pub fn toggle_selected(&mut self, id: EntryId) {
        if !self.selection.shift_remove(&id) {
            self.selection.insert(id);
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: &EntryId) -> bool {
        self.selection.contains(id)
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------

    /// Children of a folder in insertion order, folders and files apart.
    #[must_use]
    pub fn list_children(
        &self,
        folder: Option<&EntryId>,
    ) -> (Vec<&Folder>, Vec<&FileEntry>) {
        let folders: Vec<&Folder> = self
            .folders
            .values()
            .filter(|f| f.parent.as_ref() == folder)
            .collect();

        let files: Vec<&FileEntry> = self
            .files
            .values()
            .filter(|f| f.folder.as_ref() == folder)
            .collect();

        (folders, files)
    }

    /// Combined listing used by the view and the cursor: folders first,
    /// then files, both in insertion order. No sorting is applied.
    #[must_use]
    pub fn children(&self, folder: Option<&EntryId>) -> Vec<ChildRef<'_>> {
        let (folders, files) = self.list_children(folder);
        folders
            .into_iter()
            .map(ChildRef::Folder)
            .chain(files.into_iter().map(ChildRef::File))
            .collect()
    }

    /// Children of the current folder.
    #[must_use]
    pub fn visible_children(&self) -> Vec<ChildRef<'_>> {
        self.children(self.location.current.as_ref())
    }

    #[must_use]
    pub fn folder(&self, id: &EntryId) -> Option<&Folder> {
        self.folders.get(id)
    }

    #[must_use]
    pub fn file(&self, id: &EntryId) -> Option<&FileEntry> {
        self.files.get(id)
    }

    /// Bytes behind a file entry, for download/export.
    #[must_use]
    pub fn content(&self, id: &EntryId) -> Option<Bytes> {
        self.files.get(id).map(|f| f.content.bytes())
    }

    #[must_use]
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Direct children count of a folder.
    #[must_use]
    pub fn item_count(&self, id: &EntryId) -> usize {
        let target = Some(id);
        self.folders
            .values()
            .filter(|f| f.parent.as_ref() == target)
            .count()
            + self
                .files
                .values()
                .filter(|f| f.folder.as_ref() == target)
                .count()
    }

    /// Total file bytes under a folder subtree (`None` = whole drive).
    #[must_use]
    pub fn subtree_size(&self, root: Option<&EntryId>) -> u64 {
        match root {
            None => self.files.values().map(|f| f.size_bytes).sum(),
            Some(id) => {
                let subtree: IndexSet<EntryId> = self.collect_subtrees(vec![id.clone()]);
                self.files
                    .values()
                    .filter(|f| {
                        f.folder
                            .as_ref()
                            .is_some_and(|fid| subtree.contains(fid))
                    })
                    .map(|f| f.size_bytes)
                    .sum()
            }
        }
    }

    /// Expand folder roots to the full set of descendant folder ids
    /// (roots included).
    fn collect_subtrees(&self, roots: Vec<EntryId>) -> IndexSet<EntryId> {
        let mut set: IndexSet<EntryId> = roots.iter().cloned().collect();
        let mut stack: Vec<EntryId> = roots;

        while let Some(fid) = stack.pop() {
            let children: Vec<EntryId> = self
                .folders
                .values()
                .filter(|f| f.parent.as_ref() == Some(&fid))
                .map(|f| f.id.clone())
                .collect();

            for child in children {
                if set.insert(child.clone()) {
                    stack.push(child);
                }
            }
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_file(name: &str, folder: Option<EntryId>) -> FileEntry {
        FileEntry {
            id: EntryId::new(),
            name: CompactString::new(name),
            size_bytes: 1024,
            mime_hint: CompactString::new("txt"),
            uploaded_at: Local::now(),
            folder,
            content: ContentHandle::from(vec![0u8; 16]),
            is_public: false,
        }
    }

    #[test]
    fn test_create_folder_trims_name_and_assigns_unique_ids() {
        let mut tree = FileTree::new();
        let a = tree.create_folder("  Reports  ", None).unwrap();
        let b = tree.create_folder("Reports", None).unwrap();

        assert_eq!(a.name, "Reports");
        assert_eq!(b.name, "Reports");
        assert_ne!(a.id, b.id);
        assert_eq!(tree.folder_count(), 2);
    }

    #[test]
    fn test_create_folder_rejects_blank_names() {
        let mut tree = FileTree::new();
        for bad in ["", "   ", "\t\n"] {
            let err = tree.create_folder(bad, None).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput { .. }));
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn test_create_folder_requires_existing_parent() {
        let mut tree = FileTree::new();
        let ghost = EntryId::new();
        let err = tree.create_folder("Docs", Some(ghost)).unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_add_file_permits_duplicate_names() {
        let mut tree = FileTree::new();
        tree.add_file(dummy_file("notes.txt", None));
        tree.add_file(dummy_file("notes.txt", None));
        assert_eq!(tree.file_count(), 2);
    }

    #[test]
    fn test_list_children_keeps_insertion_order() {
        let mut tree = FileTree::new();
        tree.create_folder("zeta", None).unwrap();
        tree.create_folder("alpha", None).unwrap();
        tree.add_file(dummy_file("b.txt", None));
        tree.add_file(dummy_file("a.txt", None));

        let (folders, files) = tree.list_children(None);
        let folder_names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        let file_names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(folder_names, ["zeta", "alpha"]);
        assert_eq!(file_names, ["b.txt", "a.txt"]);
    }

    #[test]
    fn test_delete_removes_exact_entry_and_nothing_else() {
        let mut tree = FileTree::new();
        let keep = tree.create_folder("keep", None).unwrap();
        let doomed = dummy_file("doomed.txt", None);
        let doomed_id = doomed.id.clone();
        tree.add_file(doomed);
        tree.add_file(dummy_file("survivor.txt", None));

        let removed = tree.delete_entries(&[doomed_id.clone()]);

        assert_eq!(removed, 1);
        assert!(tree.file(&doomed_id).is_none());
        assert!(tree.folder(&keep.id).is_some());
        assert_eq!(tree.file_count(), 1);
    }

    #[test]
    fn test_delete_folder_recurses_into_subtree() {
        let mut tree = FileTree::new();
        let outer = tree.create_folder("outer", None).unwrap();
        let inner = tree.create_folder("inner", Some(outer.id.clone())).unwrap();
        tree.add_file(dummy_file("deep.txt", Some(inner.id.clone())));
        let other = tree.create_folder("other", None).unwrap();
        tree.add_file(dummy_file("top.txt", None));

        let removed = tree.delete_entries(&[outer.id.clone()]);

        // outer + inner + deep.txt
        assert_eq!(removed, 3);
        assert!(tree.folder(&inner.id).is_none());
        assert!(tree.folder(&other.id).is_some());
        assert_eq!(tree.file_count(), 1);
    }

    #[test]
    fn test_delete_purges_stale_selection() {
        let mut tree = FileTree::new();
        let folder = tree.create_folder("gone", None).unwrap();
        tree.toggle_selected(folder.id.clone());
        assert_eq!(tree.selected_count(), 1);

        tree.delete_selected();
        assert_eq!(tree.selected_count(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_navigation_round_trip_restores_root() {
        let mut tree = FileTree::new();
        let folder = tree.create_folder("projects", None).unwrap();

        tree.navigate_into(&folder.id).unwrap();
        assert_eq!(tree.location().current, Some(folder.id.clone()));
        assert_eq!(tree.location().trail.len(), 1);
        assert_eq!(tree.location().trail[0].name, ROOT_NAME);

        tree.navigate_to(None).unwrap();
        assert_eq!(tree.location().current, None);
        assert!(tree.location().trail.is_empty());
    }

    #[test]
    fn test_navigate_to_rejects_target_off_the_trail() {
        let mut tree = FileTree::new();
        let a = tree.create_folder("a", None).unwrap();
        let b = tree.create_folder("b", None).unwrap();
        tree.navigate_into(&a.id).unwrap();

        let err = tree.navigate_to(Some(b.id)).unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        // Location untouched by the failed jump.
        assert_eq!(tree.location().current, Some(a.id));
    }

    #[test]
    fn test_navigate_up_walks_the_trail() {
        let mut tree = FileTree::new();
        let a = tree.create_folder("a", None).unwrap();
        let b = tree.create_folder("b", Some(a.id.clone())).unwrap();

        tree.navigate_into(&a.id).unwrap();
        tree.navigate_into(&b.id).unwrap();
        assert_eq!(tree.location().trail.len(), 2);

        tree.navigate_up().unwrap();
        assert_eq!(tree.location().current, Some(a.id));

        tree.navigate_up().unwrap();
        assert_eq!(tree.location().current, None);

        // At the root this is a no-op.
        tree.navigate_up().unwrap();
        assert_eq!(tree.location().current, None);
    }

    #[test]
    fn test_navigation_clears_selection() {
        let mut tree = FileTree::new();
        let folder = tree.create_folder("a", None).unwrap();
        let file = dummy_file("x.txt", None);
        tree.toggle_selected(file.id.clone());
        tree.add_file(file);

        tree.navigate_into(&folder.id).unwrap();
        assert_eq!(tree.selected_count(), 0);
    }

    #[test]
    fn test_toggle_selected_skips_existence_checks() {
        let mut tree = FileTree::new();
        let ghost = EntryId::new();
        tree.toggle_selected(ghost.clone());
        assert!(tree.is_selected(&ghost));
        tree.toggle_selected(ghost.clone());
        assert!(!tree.is_selected(&ghost));
    }

    #[test]
    fn test_subtree_size_and_item_count() {
        let mut tree = FileTree::new();
        let outer = tree.create_folder("outer", None).unwrap();
        let inner = tree.create_folder("inner", Some(outer.id.clone())).unwrap();

        let mut top = dummy_file("top.bin", Some(outer.id.clone()));
        top.size_bytes = 100;
        tree.add_file(top);

        let mut deep = dummy_file("deep.bin", Some(inner.id.clone()));
        deep.size_bytes = 50;
        tree.add_file(deep);

        assert_eq!(tree.subtree_size(Some(&outer.id)), 150);
        assert_eq!(tree.subtree_size(Some(&inner.id)), 50);
        assert_eq!(tree.subtree_size(None), 150);
        // Direct children only: inner + top.bin.
        assert_eq!(tree.item_count(&outer.id), 2);
    }

    #[test]
    fn test_content_released_with_the_entry() {
        let mut tree = FileTree::new();
        let file = dummy_file("blob.bin", None);
        let id = file.id.clone();
        tree.add_file(file);
        assert!(tree.content(&id).is_some());

        tree.delete_entries(&[id.clone()]);
        assert!(tree.content(&id).is_none());
    }
}
