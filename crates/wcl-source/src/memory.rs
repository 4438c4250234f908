use std::collections::HashMap;

use wcl_types::BlobId;

use crate::error::{SourceError, SourceResult};
use crate::row::ListingRow;
use crate::traits::{DiffSource, ListingSource, ObjectSource};

/// In-memory working-copy backend.
///
/// Intended for tests and embedding. Listings, diff texts, objects, and
/// working-tree files are all configured up front through the builder-style
/// setters; the trait methods then serve clones of that state. Missing diff
/// text for a requested scope is served as an empty string (a clean scope),
/// while a missing object is an error, matching the trait contracts.
#[derive(Default)]
pub struct InMemoryWorkingCopy {
    index: Vec<ListingRow>,
    untracked: Vec<ListingRow>,
    ignored: Vec<ListingRow>,
    working_diff: Vec<ListingRow>,
    staged_diff: Vec<ListingRow>,
    diffs: HashMap<(bool, Option<String>), String>,
    objects: HashMap<String, Vec<u8>>,
    files: HashMap<String, Vec<u8>>,
}

impl InMemoryWorkingCopy {
    /// Create an empty backend: no tracked paths, no changes, no content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index listing.
    pub fn with_index(mut self, rows: Vec<ListingRow>) -> Self {
        self.index = rows;
        self
    }

    /// Replace the untracked listing.
    pub fn with_untracked(mut self, rows: Vec<ListingRow>) -> Self {
        self.untracked = rows;
        self
    }

    /// Replace the ignored listing.
    pub fn with_ignored(mut self, rows: Vec<ListingRow>) -> Self {
        self.ignored = rows;
        self
    }

    /// Replace the working-diff listing.
    pub fn with_working_diff(mut self, rows: Vec<ListingRow>) -> Self {
        self.working_diff = rows;
        self
    }

    /// Replace the staged-diff listing.
    pub fn with_staged_diff(mut self, rows: Vec<ListingRow>) -> Self {
        self.staged_diff = rows;
        self
    }

    /// Serve `text` for `diff_text(staged, path)`.
    pub fn with_diff(mut self, staged: bool, path: Option<&str>, text: &str) -> Self {
        self.diffs
            .insert((staged, path.map(str::to_string)), text.to_string());
        self
    }

    /// Store blob content under a raw id.
    pub fn with_object(mut self, id: &str, content: &[u8]) -> Self {
        self.objects.insert(id.to_string(), content.to_vec());
        self
    }

    /// Place a file in the working tree.
    pub fn with_file(mut self, path: &str, content: &[u8]) -> Self {
        self.files.insert(path.to_string(), content.to_vec());
        self
    }
}

impl std::fmt::Debug for InMemoryWorkingCopy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryWorkingCopy")
            .field("tracked", &self.index.len())
            .field("objects", &self.objects.len())
            .field("files", &self.files.len())
            .finish()
    }
}

impl DiffSource for InMemoryWorkingCopy {
    fn diff_text(&self, staged: bool, path: Option<&str>) -> SourceResult<String> {
        let key = (staged, path.map(str::to_string));
        Ok(self.diffs.get(&key).cloned().unwrap_or_default())
    }
}

impl ListingSource for InMemoryWorkingCopy {
    fn index_entries(&self) -> SourceResult<Vec<ListingRow>> {
        Ok(self.index.clone())
    }

    fn untracked(&self) -> SourceResult<Vec<ListingRow>> {
        Ok(self.untracked.clone())
    }

    fn ignored(&self) -> SourceResult<Vec<ListingRow>> {
        Ok(self.ignored.clone())
    }

    fn working_diff(&self) -> SourceResult<Vec<ListingRow>> {
        Ok(self.working_diff.clone())
    }

    fn staged_diff(&self, _base_rev: &str) -> SourceResult<Vec<ListingRow>> {
        Ok(self.staged_diff.clone())
    }
}

impl ObjectSource for InMemoryWorkingCopy {
    fn read_object(&self, id: &BlobId) -> SourceResult<Vec<u8>> {
        self.objects
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| SourceError::NoSuchObject(id.clone()))
    }

    fn read_working_file(&self, path: &str) -> SourceResult<Option<Vec<u8>>> {
        Ok(self.files.get(path).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_backend_serves_empty_listings() {
        let wc = InMemoryWorkingCopy::new();
        assert!(wc.index_entries().unwrap().is_empty());
        assert!(wc.untracked().unwrap().is_empty());
        assert!(wc.ignored().unwrap().is_empty());
        assert!(wc.working_diff().unwrap().is_empty());
        assert!(wc.staged_diff("HEAD").unwrap().is_empty());
    }

    #[test]
    fn listings_roundtrip() {
        let wc = InMemoryWorkingCopy::new()
            .with_index(vec![ListingRow::index_entry("a.txt", "100644", "86e041d", "0")])
            .with_untracked(vec![ListingRow::untracked("b.txt")]);

        assert_eq!(wc.index_entries().unwrap().len(), 1);
        assert_eq!(wc.untracked().unwrap()[0].path, "b.txt");
    }

    #[test]
    fn diff_text_is_keyed_by_boundary_and_scope() {
        let wc = InMemoryWorkingCopy::new()
            .with_diff(false, Some("a.txt"), "unstaged a")
            .with_diff(true, Some("a.txt"), "staged a")
            .with_diff(false, None, "whole tree");

        assert_eq!(wc.diff_text(false, Some("a.txt")).unwrap(), "unstaged a");
        assert_eq!(wc.diff_text(true, Some("a.txt")).unwrap(), "staged a");
        assert_eq!(wc.diff_text(false, None).unwrap(), "whole tree");
    }

    #[test]
    fn missing_diff_is_empty_text() {
        let wc = InMemoryWorkingCopy::new();
        assert_eq!(wc.diff_text(false, Some("clean.txt")).unwrap(), "");
    }

    #[test]
    fn read_object_resolves_content() {
        let wc = InMemoryWorkingCopy::new().with_object("86e041d", b"foo\nbar\nbaz\n");
        let id = BlobId::from_listing("86e041d").unwrap();
        assert_eq!(wc.read_object(&id).unwrap(), b"foo\nbar\nbaz\n");
    }

    #[test]
    fn read_missing_object_errors() {
        let wc = InMemoryWorkingCopy::new();
        let id = BlobId::from_listing("deadbee").unwrap();
        assert!(matches!(
            wc.read_object(&id),
            Err(SourceError::NoSuchObject(_))
        ));
    }

    #[test]
    fn read_working_file_present_and_missing() {
        let wc = InMemoryWorkingCopy::new().with_file("a.txt", b"contents");
        assert_eq!(wc.read_working_file("a.txt").unwrap().unwrap(), b"contents");
        assert!(wc.read_working_file("missing.txt").unwrap().is_none());
    }

    #[test]
    fn debug_format() {
        let wc = InMemoryWorkingCopy::new().with_object("abc1234", b"x");
        let debug = format!("{wc:?}");
        assert!(debug.contains("InMemoryWorkingCopy"));
        assert!(debug.contains("objects"));
    }
}
