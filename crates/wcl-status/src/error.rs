//! Error types for the status crate.

use wcl_diff::DiffParseError;
use wcl_source::SourceError;

/// Errors that can occur while collecting or inspecting status.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// A lazily requested diff failed to parse.
    #[error("diff parse error: {0}")]
    Parse(#[from] DiffParseError),

    /// The working-copy backend failed.
    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

/// Convenience alias for status results.
pub type StatusResult<T> = Result<T, StatusError>;
