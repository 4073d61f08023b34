//! # Storage Module
//!
//! Persistence for the flock tracker.
//!
//! All flocks live in one JSON document. The document is read in full at the
//! start of each request and written back in full after a mutation, using a
//! temp file and a rename so readers never observe a half-written file.
//!
//! The domain layer only sees the [`FlockStorage`] trait, so tests can swap in
//! a storage that fails on write.

pub mod json;
pub mod traits;

pub use json::{FlockRepository, JsonConnection};
pub use traits::FlockStorage;
