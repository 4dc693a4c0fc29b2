//! # Host Bridge Traits
//!
//! Platform abstraction traits that each host platform implements for the
//! catalog cache core.
//!
//! ## Overview
//!
//! The core never talks to the network stack, the OS connectivity APIs or the
//! host logger directly. Each of those capabilities is a trait here, with a
//! desktop implementation in `bridge-desktop` and native adapters injected by
//! mobile hosts (OkHttp/URLSession, ConnectivityManager/NWPathMonitor,
//! Logcat/OSLog).
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - One-shot async HTTP requests
//! - [`NetworkMonitor`](network::NetworkMonitor) - Synchronous online/offline query
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should convert platform errors into it and keep the message actionable
//! (include the URL or the probed endpoint).
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so implementations can be shared
//! behind `Arc` across async tasks.
//!
//! ## Example
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct OkHttpBridge { /* JNI handle */ }
//!
//! #[async_trait]
//! impl HttpClient for OkHttpBridge {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod http;
pub mod network;
pub mod time;

pub use error::BridgeError;

pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use network::{HostNetworkMonitor, NetworkInfo, NetworkMonitor, NetworkStatus, NetworkType};
pub use time::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
