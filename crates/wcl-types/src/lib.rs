//! Foundation types for Working Copy Lens.
//!
//! # Key Types
//!
//! - [`BlobId`] -- Hex content identifier with all-zero-sentinel normalization

pub mod object;

pub use object::BlobId;
