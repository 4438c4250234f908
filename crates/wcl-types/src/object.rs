use std::fmt;

use serde::{Deserialize, Serialize};

/// Content identifier for a stored blob.
///
/// A `BlobId` wraps the hex digest a version-control tool reports for file
/// content. Both full-length (40 hex characters or longer) and abbreviated
/// digests are accepted; the value is treated as opaque and never re-hashed.
///
/// Listing and diff output use an all-zero digest as a sentinel meaning
/// "no such blob" (a creation or a deletion side, or an unhashed working
/// file). That sentinel never survives into a `BlobId`: construction through
/// [`BlobId::from_listing`] maps it to `None`, so consumers only ever see
/// real identifiers.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobId(String);

impl BlobId {
    /// Normalize a raw id as it appears in listing or diff output.
    ///
    /// Returns `None` for the all-zero sentinel. An empty string is treated
    /// as the sentinel as well, matching the zero-or-more-zeros form the
    /// plumbing uses in abbreviated output.
    pub fn from_listing(raw: &str) -> Option<Self> {
        if raw.chars().all(|c| c == '0') {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    /// The raw hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form (first 7 characters, or the whole id if shorter).
    pub fn short(&self) -> &str {
        let end = self.0.len().min(7);
        &self.0[..end]
    }
}

impl fmt::Debug for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobId({})", self.short())
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BlobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
