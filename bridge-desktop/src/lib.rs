//! # Desktop Bridge Implementations
//!
//! Default implementations of the bridge traits for desktop platforms
//! (macOS, Windows, Linux) and for running the core in tests and tools:
//! - `HttpClient` using `reqwest`
//! - `NetworkMonitor` using a background TCP reachability probe
//!
//! Mobile hosts inject their own adapters instead of using this crate.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{DesktopNetworkMonitor, ReqwestHttpClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let http_client = Arc::new(ReqwestHttpClient::new());
//!     let network = Arc::new(DesktopNetworkMonitor::new());
//!     // Hand both to core_runtime::config::CatalogConfig::builder()
//! }
//! ```

mod http;
mod network;

pub use http::ReqwestHttpClient;
pub use network::{DesktopNetworkMonitor, DEFAULT_PROBE_TARGET};
