//! # folio-storage
//!
//! Object store implementations for Folio. Certificate files live flat in
//! a single upload directory on the local filesystem.

pub mod local;

pub use local::{LocalObjectStore, content_type_for};
