//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the catalog cache core:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! Every other core crate reads its settings from [`config::CatalogConfig`]
//! and logs through `tracing`; this crate owns both so hosts configure them
//! in one place.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
