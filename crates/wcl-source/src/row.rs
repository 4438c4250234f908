//! Raw listing rows as supplied by a working-copy backend.

use serde::{Deserialize, Serialize};

/// One per-path row from a plumbing listing, already split into fields.
///
/// Ids are carried raw: the all-zero sentinel stays in the row and is only
/// normalized when a row is finalized into a status entry. Which fields are
/// populated depends on the listing the row came from:
///
/// - index listing: `path`, `mode_index`, `id_index`, `stage`
/// - untracked / ignored listings: `path` only
/// - comparison listings (working or staged diff): `path`, both modes,
///   both ids, `status_char`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRow {
    /// Path relative to the working-copy root.
    pub path: String,
    /// Mode in the staged tree.
    pub mode_index: Option<String>,
    /// Mode in the comparison baseline (last-commit tree).
    pub mode_repo: Option<String>,
    /// Raw blob id on the staged side; may be the zero sentinel.
    pub id_index: Option<String>,
    /// Raw blob id on the baseline side; may be the zero sentinel.
    pub id_repo: Option<String>,
    /// Single status letter (`A`, `D`, `M`, ...), absent on baseline rows.
    pub status_char: Option<char>,
    /// Merge-stage number from the index listing.
    pub stage: Option<String>,
}

impl ListingRow {
    /// Row shape of an index (tracked-files) listing entry.
    pub fn index_entry(
        path: impl Into<String>,
        mode: impl Into<String>,
        id: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            mode_index: Some(mode.into()),
            id_index: Some(id.into()),
            stage: Some(stage.into()),
            ..Self::default()
        }
    }

    /// Row shape of an untracked or ignored listing entry.
    pub fn untracked(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Row shape of a comparison (working-diff or staged-diff) entry.
    pub fn comparison(
        path: impl Into<String>,
        mode_repo: impl Into<String>,
        mode_index: impl Into<String>,
        id_repo: impl Into<String>,
        id_index: impl Into<String>,
        status_char: char,
    ) -> Self {
        Self {
            path: path.into(),
            mode_repo: Some(mode_repo.into()),
            mode_index: Some(mode_index.into()),
            id_repo: Some(id_repo.into()),
            id_index: Some(id_index.into()),
            status_char: Some(status_char),
            stage: None,
        }
    }
}
