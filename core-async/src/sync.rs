//! Synchronization primitives.
//!
//! Async-aware primitives from `tokio::sync`. All of them are `Send + Sync`
//! and never block the executor.
//!
//! # Examples
//!
//! ```rust
//! use core_async::sync::watch;
//!
//! async fn example() {
//!     let (tx, mut rx) = watch::channel(0);
//!     tx.send(1).unwrap();
//!     rx.changed().await.unwrap();
//!     assert_eq!(*rx.borrow(), 1);
//! }
//! ```

pub use tokio::sync::{
    broadcast, mpsc, oneshot, watch, Mutex, MutexGuard, Notify, RwLock, RwLockReadGuard,
    RwLockWriteGuard,
};
