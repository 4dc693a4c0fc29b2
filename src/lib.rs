//! Workspace placeholder crate.
//!
//! This crate exposes the `desktop-shims` feature so host applications can
//! depend on `catalog-cache-workspace` and get the catalog service with its
//! desktop bridges wired in, without naming each workspace crate.

#[cfg(feature = "desktop-shims")]
pub use core_service::{CatalogRegistry, CatalogService, CoreError};
