//! Reconciliation of the four per-path listings into one status mapping.
//!
//! The merge runs in a fixed order: index listing, untracked files,
//! working-tree diff, staged diff. Order is load-bearing: later listings
//! merge into (or append after) what earlier ones recorded, and the
//! staged-flag derivation for staged-diff rows inspects the previously
//! recorded state of the same path.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, warn};
use wcl_source::{ListingRow, WorkingCopy};
use wcl_types::BlobId;

use crate::entry::{ChangeKind, StatusEntry};
use crate::error::StatusResult;

/// The raw inputs to one reconciliation, in merge order.
///
/// An explicit parameter rather than implicit call order, so the merge can
/// be exercised without any backend invocation. A listing the caller could
/// not obtain must be supplied as an empty vector; the engine never
/// defaults one silently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listings {
    /// All tracked paths with staged-tree mode/id; no status letter.
    pub index: Vec<ListingRow>,
    /// Paths on disk that are not tracked (may still include ignored ones).
    pub untracked: Vec<ListingRow>,
    /// Untracked paths matched by an ignore rule; subtracted from
    /// `untracked` before the merge.
    pub ignored: Vec<ListingRow>,
    /// Paths differing between the staged tree and the working tree.
    pub working_diff: Vec<ListingRow>,
    /// Paths differing between the baseline revision and the staged tree.
    pub staged_diff: Vec<ListingRow>,
}

/// The one-or-two status records a path resolved to.
///
/// The merge never produces more than two records for a path: one staged
/// and one unstaged change can coexist, nothing else. `Two` keeps merge
/// order: in the canonical two-state scenario the unstaged record comes
/// first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathState {
    One(StatusEntry),
    Two(StatusEntry, StatusEntry),
}

impl PathState {
    /// The records in merge order.
    pub fn entries(&self) -> impl Iterator<Item = &StatusEntry> {
        let (first, second) = match self {
            Self::One(e) => (e, None),
            Self::Two(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    /// Number of records (1 or 2).
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The record whose change is staged, if any.
    pub fn staged(&self) -> Option<&StatusEntry> {
        self.entries().find(|e| e.changes_staged())
    }

    /// The record whose change is unstaged, if any.
    pub fn unstaged(&self) -> Option<&StatusEntry> {
        self.entries().find(|e| e.changes_unstaged())
    }
}

/// The reconciled per-path status of a working copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkingCopyStatus {
    paths: BTreeMap<String, PathState>,
}

impl WorkingCopyStatus {
    /// Pull all five listings from the backend and reconcile them.
    ///
    /// Listing failures (missing index file, unavailable listing) are
    /// propagated unchanged.
    pub fn collect(source: Arc<dyn WorkingCopy>, base_rev: &str) -> StatusResult<Self> {
        let listings = Listings {
            index: source.index_entries()?,
            untracked: source.untracked()?,
            ignored: source.ignored()?,
            working_diff: source.working_diff()?,
            staged_diff: source.staged_diff(base_rev)?,
        };
        Ok(Self::reconcile(source, listings))
    }

    /// Merge the supplied listings into a status mapping.
    ///
    /// Deterministic: identical listings produce an identical mapping.
    pub fn reconcile(source: Arc<dyn WorkingCopy>, listings: Listings) -> Self {
        let mut pending: BTreeMap<String, Vec<PendingRow>> = BTreeMap::new();

        for row in listings.index {
            add_row(&mut pending, PendingRow::new(row, None));
        }

        let ignored: BTreeSet<&str> = listings.ignored.iter().map(|r| r.path.as_str()).collect();
        for row in listings.untracked {
            if ignored.contains(row.path.as_str()) {
                continue;
            }
            add_row(
                &mut pending,
                PendingRow {
                    path: row.path,
                    status_char: Some('U'),
                    staged: Some(false),
                    ..PendingRow::default()
                },
            );
        }

        for row in listings.working_diff {
            // Whatever the row claims, a working-diff hit is unstaged.
            add_row(&mut pending, PendingRow::new(row, Some(false)));
        }

        for row in listings.staged_diff {
            let last = pending.get(&row.path).and_then(|rows| rows.last());

            // A path already recorded as deleted is not reopened by a
            // stale row.
            if last.map_or(false, |l| l.status_char == Some('D')) {
                continue;
            }

            let id_index_present = row
                .id_index
                .as_deref()
                .and_then(BlobId::from_listing)
                .is_some();
            let repo_id_differs = last.map_or(false, |l| l.id_repo != row.id_repo);
            let staged = if id_index_present || row.status_char == Some('D') || repo_id_differs {
                Some(true)
            } else {
                None
            };
            add_row(&mut pending, PendingRow::new(row, staged));
        }

        let mut paths = BTreeMap::new();
        for (path, rows) in pending {
            let mut entries: Vec<StatusEntry> = rows
                .into_iter()
                .filter_map(|row| row.finalize(&source))
                .collect();
            match entries.len() {
                0 => {}
                1 => {
                    paths.insert(path, PathState::One(entries.remove(0)));
                }
                n => {
                    if n > 2 {
                        warn!(path = %path, records = n, "more than two status records; keeping the first two");
                    }
                    let second = entries.swap_remove(1);
                    let first = entries.swap_remove(0);
                    paths.insert(path, PathState::Two(first, second));
                }
            }
        }

        debug!(paths = paths.len(), "working copy status reconciled");
        Self { paths }
    }

    /// Look up the state recorded for a path. `None` means no change was
    /// recorded (the path is clean or not under consideration).
    pub fn get(&self, path: &str) -> Option<&PathState> {
        self.paths.get(path)
    }

    /// Number of paths with a recorded change.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// Iterate `(path, state)` in sorted path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathState)> {
        self.paths.iter().map(|(p, s)| (p.as_str(), s))
    }

    /// Every record, flattened across two-state paths.
    pub fn entries(&self) -> impl Iterator<Item = &StatusEntry> {
        self.paths.values().flat_map(PathState::entries)
    }

    /// Records for files added to the staged tree.
    pub fn added(&self) -> Vec<&StatusEntry> {
        self.entries().filter(|e| e.is_added()).collect()
    }

    /// Records for deleted files.
    pub fn deleted(&self) -> Vec<&StatusEntry> {
        self.entries().filter(|e| e.is_deleted()).collect()
    }

    /// Records for modified files.
    pub fn modified(&self) -> Vec<&StatusEntry> {
        self.entries().filter(|e| e.is_modified()).collect()
    }

    /// Records for untracked files.
    pub fn untracked(&self) -> Vec<&StatusEntry> {
        self.entries().filter(|e| e.is_untracked()).collect()
    }

    /// Records whose change is staged.
    pub fn staged_changes(&self) -> Vec<&StatusEntry> {
        self.entries().filter(|e| e.changes_staged()).collect()
    }

    /// Records whose change is unstaged.
    pub fn unstaged_changes(&self) -> Vec<&StatusEntry> {
        self.entries().filter(|e| e.changes_unstaged()).collect()
    }
}

/// A row mid-merge: listing fields plus the evolving staged flag.
#[derive(Clone, Debug, Default)]
struct PendingRow {
    path: String,
    mode_index: Option<String>,
    mode_repo: Option<String>,
    id_index: Option<String>,
    id_repo: Option<String>,
    status_char: Option<char>,
    stage: Option<String>,
    staged: Option<bool>,
}

impl PendingRow {
    fn new(row: ListingRow, staged: Option<bool>) -> Self {
        Self {
            path: row.path,
            mode_index: row.mode_index,
            mode_repo: row.mode_repo,
            id_index: row.id_index,
            id_repo: row.id_repo,
            status_char: row.status_char,
            stage: row.stage,
            staged,
        }
    }

    /// Overlay `self` (the incoming row) under `earlier`: fields already
    /// recorded win on conflict, fields present on only one side are kept.
    fn merged_under(self, earlier: &PendingRow) -> Self {
        Self {
            path: earlier.path.clone(),
            mode_index: earlier.mode_index.clone().or(self.mode_index),
            mode_repo: earlier.mode_repo.clone().or(self.mode_repo),
            id_index: earlier.id_index.clone().or(self.id_index),
            id_repo: earlier.id_repo.clone().or(self.id_repo),
            status_char: earlier.status_char.or(self.status_char),
            stage: earlier.stage.clone().or(self.stage),
            staged: earlier.staged.or(self.staged),
        }
    }

    fn finalize(self, source: &Arc<dyn WorkingCopy>) -> Option<StatusEntry> {
        let kind = self.status_char.and_then(ChangeKind::from_status_char)?;
        Some(StatusEntry::new(
            self.path,
            kind,
            self.staged.unwrap_or(false),
            self.mode_index,
            self.mode_repo,
            self.id_index.as_deref().and_then(BlobId::from_listing),
            self.id_repo.as_deref().and_then(BlobId::from_listing),
            Arc::clone(source),
        ))
    }
}

/// Record a row for its path.
///
/// A row merges into the last recorded element while that element has no
/// status letter yet, or while the incoming row's staged flag is still
/// undecided; once both are settled the row opens a second record, the
/// staged-plus-unstaged two-state path.
fn add_row(pending: &mut BTreeMap<String, Vec<PendingRow>>, row: PendingRow) {
    let rows = pending.entry(row.path.clone()).or_default();
    let merge_into_last = rows
        .last()
        .map_or(false, |last| last.status_char.is_none() || row.staged.is_none());
    if merge_into_last {
        if let Some(last) = rows.last_mut() {
            let merged = row.merged_under(last);
            *last = merged;
        }
    } else {
        rows.push(row);
    }
}
