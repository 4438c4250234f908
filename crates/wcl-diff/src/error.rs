//! Error types for the diff crate.

/// Errors that can occur while parsing diff text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffParseError {
    /// A required header (`diff --git ...` or `index ...`) did not match
    /// while a file section was being parsed.
    #[error("malformed diff at line {line}: {found:?}")]
    MalformedDiff {
        /// 1-based line number of the offending line.
        line: usize,
        /// The line as encountered.
        found: String,
    },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffParseError>;
