//! Finalized status entries and their content/diff accessors.

use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wcl_diff::{parse_diff_text, FileDiff};
use wcl_source::{SourceResult, WorkingCopy};
use wcl_types::BlobId;

use crate::error::StatusResult;

/// Kind of change recorded for a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Present in the staged tree, absent from the baseline.
    Added,
    /// Absent from the comparison target, present in the baseline.
    Deleted,
    /// Present on both sides with differing content.
    Modified,
    /// Present on disk, not tracked, not ignored.
    Untracked,
}

impl ChangeKind {
    /// Map a listing status letter to a kind. Unrecognized letters map to
    /// `None` and their rows never surface as entries.
    pub fn from_status_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::Added),
            'D' => Some(Self::Deleted),
            'M' => Some(Self::Modified),
            'U' => Some(Self::Untracked),
            _ => None,
        }
    }
}

/// Which content a [`StatusEntry::content_from`] call resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentSource {
    /// The on-disk working-tree file.
    WorkingFile,
    /// The blob the staged tree points at (`id_index`).
    StagedBlob,
    /// The blob the baseline tree points at (`id_repo`).
    RepoBlob,
}

/// One finalized status record for a path.
///
/// Entries are immutable once reconciliation completes. The only later
/// mutation is the diff memo, a single-assignment cell populated on first
/// successful [`diff`](Self::diff) call; concurrent first access is not
/// supported and must be serialized by the caller.
#[derive(Clone)]
pub struct StatusEntry {
    path: String,
    kind: ChangeKind,
    staged: bool,
    mode_index: Option<String>,
    mode_repo: Option<String>,
    id_index: Option<BlobId>,
    id_repo: Option<BlobId>,
    source: Arc<dyn WorkingCopy>,
    diff_memo: OnceCell<Option<FileDiff>>,
}

impl StatusEntry {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        path: String,
        kind: ChangeKind,
        staged: bool,
        mode_index: Option<String>,
        mode_repo: Option<String>,
        id_index: Option<BlobId>,
        id_repo: Option<BlobId>,
        source: Arc<dyn WorkingCopy>,
    ) -> Self {
        Self {
            path,
            kind,
            staged,
            mode_index,
            mode_repo,
            id_index,
            id_repo,
            source,
            diff_memo: OnceCell::new(),
        }
    }

    /// Path relative to the working-copy root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The recorded kind of change.
    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// Mode in the staged tree.
    pub fn mode_index(&self) -> Option<&str> {
        self.mode_index.as_deref()
    }

    /// Mode in the baseline tree.
    pub fn mode_repo(&self) -> Option<&str> {
        self.mode_repo.as_deref()
    }

    /// Blob id in the staged tree.
    pub fn id_index(&self) -> Option<&BlobId> {
        self.id_index.as_ref()
    }

    /// Blob id in the baseline tree.
    pub fn id_repo(&self) -> Option<&BlobId> {
        self.id_repo.as_ref()
    }

    pub fn is_added(&self) -> bool {
        self.kind == ChangeKind::Added
    }

    pub fn is_deleted(&self) -> bool {
        self.kind == ChangeKind::Deleted
    }

    pub fn is_modified(&self) -> bool {
        self.kind == ChangeKind::Modified
    }

    pub fn is_untracked(&self) -> bool {
        self.kind == ChangeKind::Untracked
    }

    /// The change sits in the staged tree, queued for the next commit.
    pub fn changes_staged(&self) -> bool {
        self.staged
    }

    /// The change lives only in the working tree.
    pub fn changes_unstaged(&self) -> bool {
        !self.staged
    }

    /// Resolve this entry's content from the default source: the working
    /// file for an unstaged change, the staged blob otherwise.
    pub fn content_default(&self) -> SourceResult<Option<Vec<u8>>> {
        let source = if self.changes_unstaged() {
            ContentSource::WorkingFile
        } else {
            ContentSource::StagedBlob
        };
        self.content_from(source)
    }

    /// Resolve this entry's content from a specific source.
    ///
    /// A missing working file and an absent blob id both yield `Ok(None)`;
    /// an id that fails to resolve in storage is an error, propagated
    /// unchanged from the backend.
    pub fn content_from(&self, source: ContentSource) -> SourceResult<Option<Vec<u8>>> {
        match source {
            ContentSource::WorkingFile => self.source.read_working_file(&self.path),
            ContentSource::StagedBlob => self.read_blob(self.id_index.as_ref()),
            ContentSource::RepoBlob => self.read_blob(self.id_repo.as_ref()),
        }
    }

    fn read_blob(&self, id: Option<&BlobId>) -> SourceResult<Option<Vec<u8>>> {
        match id {
            Some(id) => self.source.read_object(id).map(Some),
            None => Ok(None),
        }
    }

    /// The single-file diff record behind this entry, fetched and parsed
    /// lazily, then memoized.
    ///
    /// Untracked entries have no diff. A staged entry is compared across
    /// the baseline-vs-staged boundary, an unstaged one across
    /// staged-vs-working-tree. `Ok(None)` means the scoped diff text held
    /// no sections. Fetch or parse failures are returned and not memoized.
    pub fn diff(&self) -> StatusResult<Option<&FileDiff>> {
        if self.kind == ChangeKind::Untracked {
            return Ok(None);
        }
        if let Some(memo) = self.diff_memo.get() {
            return Ok(memo.as_ref());
        }

        let text = self.source.diff_text(self.staged, Some(&self.path))?;
        let record = parse_diff_text(&text)?.into_iter().next();
        Ok(self.diff_memo.get_or_init(|| record).as_ref())
    }
}

impl fmt::Debug for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusEntry")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("staged", &self.staged)
            .field("id_index", &self.id_index)
            .field("id_repo", &self.id_repo)
            .finish()
    }
}

// Identity covers the reconciled data only; the backend handle and the
// diff memo take no part in it.
impl PartialEq for StatusEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.kind == other.kind
            && self.staged == other.staged
            && self.mode_index == other.mode_index
            && self.mode_repo == other.mode_repo
            && self.id_index == other.id_index
            && self.id_repo == other.id_repo
    }
}

impl Eq for StatusEntry {}
