//! # Repository Pattern Implementation
//!
//! Storage traits and their SQLite implementations.
//!
//! - `TrackStore` - cached catalog tracks with live and snapshot reads

pub mod track;

pub use track::{SqliteTrackStore, TrackStore};
