//! Per-file diff records.

use serde::{Deserialize, Serialize};
use wcl_types::BlobId;

/// One file section of a unified diff, fully parsed.
///
/// `a_*` fields describe the old side of the comparison, `b_*` the new
/// side. Paths are equal for ordinary edits and differ for renames. Ids
/// are `None` where the diff carried the all-zero placeholder (no blob on
/// that side); `new_file`/`deleted_file` are true when the section was
/// explicitly marked, and also whenever the corresponding id is absent.
///
/// `body` holds the raw hunk text (the `---`/`+++` header pair onward),
/// `None` when the section had no content hunks (a pure mode change).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Path on the old side.
    pub a_path: String,
    /// Path on the new side.
    pub b_path: String,
    /// Blob id on the old side; `None` for a created file.
    pub a_id: Option<BlobId>,
    /// Blob id on the new side; `None` for a deleted file.
    pub b_id: Option<BlobId>,
    /// File mode on the old side.
    pub a_mode: Option<String>,
    /// File mode on the new side.
    pub b_mode: Option<String>,
    /// The section carried a `new file mode` marker, or has no old blob.
    pub new_file: bool,
    /// The section carried a `deleted file mode` marker, or has no new blob.
    pub deleted_file: bool,
    /// Raw hunk text, `None` for a mode-only change.
    pub body: Option<String>,
}

impl FileDiff {
    /// Returns `true` if the section changed mode without content hunks.
    pub fn is_mode_only(&self) -> bool {
        self.body.is_none() && !self.new_file && !self.deleted_file
    }
}
