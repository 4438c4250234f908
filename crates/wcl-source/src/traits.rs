use wcl_types::BlobId;

use crate::error::SourceResult;
use crate::row::ListingRow;

/// Producer of unified-diff text.
///
/// Implementations must satisfy these invariants:
/// - The returned text follows the multi-file `diff --git` grammar the
///   parser in `wcl-diff` consumes, byte-exact.
/// - `staged = true` compares the last commit against the staged tree;
///   `staged = false` compares the staged tree against the working tree.
/// - `path = Some(..)` scopes the output to that single path; `None`
///   covers the whole tree. A clean scope yields an empty string.
/// - Calls are blocking and carry no retry or timeout semantics of their
///   own; any such wrapping is the implementation's concern.
pub trait DiffSource: Send + Sync {
    /// Produce unified-diff text for the given boundary and scope.
    fn diff_text(&self, staged: bool, path: Option<&str>) -> SourceResult<String>;
}

/// Producer of the per-path plumbing listings.
///
/// Each method returns one row per path, already split into fields. A
/// listing the backend cannot produce is an error, never an invented
/// empty sequence; the engine does no defaulting on the caller's behalf.
pub trait ListingSource: Send + Sync {
    /// All tracked paths with their staged-tree mode and id.
    fn index_entries(&self) -> SourceResult<Vec<ListingRow>>;

    /// Paths present on disk but not tracked (ignored paths included).
    fn untracked(&self) -> SourceResult<Vec<ListingRow>>;

    /// Untracked paths matched by an ignore rule.
    fn ignored(&self) -> SourceResult<Vec<ListingRow>>;

    /// Paths differing between the staged tree and the working tree.
    fn working_diff(&self) -> SourceResult<Vec<ListingRow>>;

    /// Paths differing between `base_rev` and the staged tree.
    fn staged_diff(&self, base_rev: &str) -> SourceResult<Vec<ListingRow>>;
}

/// Reader of blob content and working-tree files.
pub trait ObjectSource: Send + Sync {
    /// Resolve a blob id to its content.
    ///
    /// Returns `Err(SourceError::NoSuchObject)` if the id is unknown.
    fn read_object(&self, id: &BlobId) -> SourceResult<Vec<u8>>;

    /// Read a working-tree file's bytes.
    ///
    /// Returns `Ok(None)` if the file does not exist; other failures are
    /// errors.
    fn read_working_file(&self, path: &str) -> SourceResult<Option<Vec<u8>>>;
}

/// A complete working-copy backend, usable behind a single handle.
pub trait WorkingCopy: DiffSource + ListingSource + ObjectSource {}

impl<T: DiffSource + ListingSource + ObjectSource> WorkingCopy for T {}
