//! Runtime abstraction layer for the catalog cache core.
//!
//! Every other crate in the workspace spawns tasks, sleeps and builds
//! channels through this crate instead of naming Tokio directly, so the
//! executor choice lives in exactly one manifest.
//!
//! # Modules
//!
//! - `task`: Task spawning and execution
//! - `time`: Sleep, timeout, duration and instant
//! - `sync`: Synchronization primitives and channels
//! - `runtime`: Runtime handles and `block_on`
//!
//! # Examples
//!
//! ```rust
//! use core_async::task;
//! use core_async::time::{sleep, Duration};
//!
//! async fn example() {
//!     let handle = task::spawn(async {
//!         sleep(Duration::from_millis(10)).await;
//!         42
//!     });
//!     assert_eq!(handle.await.unwrap(), 42);
//! }
//! ```

pub mod runtime;
pub mod sync;
pub mod task;
pub mod time;

pub use task::spawn;
pub use time::{sleep, Duration, Instant};
