//! # Catalog Module
//!
//! Owns the cached track catalog and the policy that decides between the
//! remote search API and the local cache.
//!
//! ## Overview
//!
//! This module manages:
//! - SQLite schema, migrations and the connection pool (`db`)
//! - The cached track store with live and snapshot reads (`repositories`)
//! - The iTunes Search API client (`remote`)
//! - The single background cache writer (`cache_writer`)
//! - The fetch orchestrator (`repository`)
//!
//! ## Usage
//!
//! ```ignore
//! use core_catalog::{create_pool, DatabaseConfig, ItunesClient, SqliteTrackStore, TrackCatalogRepository};
//! use std::sync::Arc;
//!
//! let pool = create_pool(DatabaseConfig::new("catalog.db")).await?;
//! let repository = TrackCatalogRepository::new(
//!     network_monitor,
//!     Arc::new(ItunesClient::new(http_client, search_api)),
//!     Arc::new(SqliteTrackStore::new(pool)),
//! );
//!
//! let tracks = repository.track_list().wait().await;
//! ```

pub mod cache_writer;
pub mod db;
pub mod error;
pub mod models;
pub mod observable;
pub mod remote;
pub mod repositories;
pub mod repository;

pub use cache_writer::CacheWriter;
pub use db::{create_pool, create_test_pool, DatabaseConfig};
pub use error::{CatalogError, Result};
pub use models::{Track, TrackMinimal};
pub use observable::{Observable, Publisher};
pub use remote::{ItunesClient, TrackSource};
pub use repositories::{SqliteTrackStore, TrackStore};
pub use repository::TrackCatalogRepository;
