//! Error types for the source crate.

use wcl_types::BlobId;

/// Errors reported by a working-copy backend.
///
/// The engines propagate these unchanged; none of them is recovered from
/// silently. A caller that wants a missing listing treated as empty must
/// supply an empty row sequence itself.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A blob id did not resolve to stored content.
    #[error("no such object: {0:?}")]
    NoSuchObject(BlobId),

    /// The staging index file does not exist.
    #[error("index file missing")]
    IndexFileMissing,

    /// A listing could not be produced.
    #[error("listing unavailable: {0}")]
    ListingUnavailable(String),

    /// Underlying I/O failure.
    #[error("io error: {0}")]
    Io(String),
}

/// Convenience alias for source results.
pub type SourceResult<T> = Result<T, SourceError>;
