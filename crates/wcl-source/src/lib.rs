//! Collaborator seam for Working Copy Lens.
//!
//! The status and diff engines never invoke a version-control tool, walk a
//! directory, or read repository storage themselves. Everything they need
//! from the outside world arrives through the narrow traits defined here,
//! which a backend implements by whatever means it likes (process
//! invocation, libgit-style bindings, a test fixture).
//!
//! # Key Types
//!
//! - [`ListingRow`] -- One raw per-path row from a plumbing listing
//! - [`DiffSource`] / [`ListingSource`] / [`ObjectSource`] -- Backend traits
//! - [`WorkingCopy`] -- Supertrait bundling all three behind one handle
//! - [`InMemoryWorkingCopy`] -- Configurable fake for tests and embedding

pub mod error;
pub mod memory;
pub mod row;
pub mod traits;

pub use error::{SourceError, SourceResult};
pub use memory::InMemoryWorkingCopy;
pub use row::ListingRow;
pub use traits::{DiffSource, ListingSource, ObjectSource, WorkingCopy};
