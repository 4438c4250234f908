//! Status engine for Working Copy Lens.
//!
//! Merges four independently-sourced per-path listings (tracked index,
//! untracked files, working-tree diff, staged diff) into one canonical
//! state per path. A path normally resolves to a single entry; a path
//! that carries both a staged and an independent unstaged change resolves
//! to two.
//!
//! # Key Types
//!
//! - [`StatusEntry`] -- Finalized per-path status with content/diff accessors
//! - [`ChangeKind`] -- Added / Deleted / Modified / Untracked
//! - [`Listings`] -- The four raw listings plus the ignore listing
//! - [`PathState`] -- One or two entries for a path
//! - [`WorkingCopyStatus`] -- The reconciled path -> state mapping

pub mod entry;
pub mod error;
pub mod reconcile;

pub use entry::{ChangeKind, ContentSource, StatusEntry};
pub use error::{StatusError, StatusResult};
pub use reconcile::{Listings, PathState, WorkingCopyStatus};
