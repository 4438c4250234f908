//! Diff engine for Working Copy Lens.
//!
//! Consumes the textual output of a unified multi-file diff command and
//! produces one structured record per file section. The grammar is the
//! `diff --git` section format: optional mode-change prefix, optional
//! new/deleted-file marker, required `index` line, then the hunk body.
//!
//! # Key Types
//!
//! - [`FileDiff`] -- One file section: paths, ids, modes, flags, raw body
//! - [`parse_diff_text`] -- Multi-file text stream -> ordered records
//! - [`DiffStats`] -- Insertion/deletion counts derived from a body
//! - [`DiffParseError`] -- Malformed-section failure with line position

pub mod error;
pub mod parse;
pub mod record;
pub mod stats;

pub use error::{DiffParseError, DiffResult};
pub use parse::parse_diff_text;
pub use record::FileDiff;
pub use stats::DiffStats;
