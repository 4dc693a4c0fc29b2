//! Observable values
//!
//! An [`Observable`] is the read side of a single-slot channel that starts
//! empty and is filled by its [`Publisher`]. One-shot results (a remote fetch)
//! are resolved exactly once; live queries keep publishing for as long as
//! someone is observing. Dropping the publisher closes the channel; an
//! observable that was never filled stays empty.
//!
//! ```ignore
//! let (publisher, observable) = Observable::pending();
//! core_async::spawn(async move { publisher.resolve(vec![1, 2, 3]) });
//! assert_eq!(observable.wait().await, Some(vec![1, 2, 3]));
//! ```

use core_async::sync::watch;
use futures::future::{self, Either};
use futures::stream::{self, Stream};

/// Read side of an observable value.
pub struct Observable<T> {
    rx: watch::Receiver<Option<T>>,
}

/// Write side of an observable value.
pub struct Publisher<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T: Clone> Observable<T> {
    /// Create an empty observable and the publisher that fills it.
    pub fn pending() -> (Publisher<T>, Observable<T>) {
        let (tx, rx) = watch::channel(None);
        (Publisher { tx }, Observable { rx })
    }

    /// Create an observable that already holds `value`.
    pub fn ready(value: T) -> Self {
        let (_tx, rx) = watch::channel(Some(value));
        Self { rx }
    }

    /// Current value, if one has been published.
    pub fn get(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    /// Whether a value has been published.
    pub fn is_ready(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait for the first published value.
    ///
    /// Returns immediately when a value is already present. Returns `None`
    /// if the publisher is dropped before publishing anything.
    pub async fn wait(&self) -> Option<T> {
        let mut rx = self.rx.clone();
        let value = match rx.wait_for(Option::is_some).await {
            Ok(value) => value.clone(),
            Err(_) => None,
        };
        value
    }

    /// Wait for the next value published after the last one this handle saw.
    ///
    /// Returns `None` once the publisher is gone.
    pub async fn changed(&mut self) -> Option<T> {
        loop {
            self.rx.changed().await.ok()?;
            let value = self.rx.borrow_and_update().clone();
            if value.is_some() {
                return value;
            }
        }
    }

    /// Turn the observable into a stream of every value it publishes,
    /// starting with the current one if present.
    pub fn into_stream(self) -> impl Stream<Item = T>
    where
        T: Send + Sync + 'static,
    {
        stream::unfold((self.rx, true), |(mut rx, first)| async move {
            if first {
                let current = rx.borrow_and_update().clone();
                if let Some(value) = current {
                    return Some((value, (rx, false)));
                }
            }

            loop {
                if rx.changed().await.is_err() {
                    return None;
                }
                let next = rx.borrow_and_update().clone();
                if let Some(value) = next {
                    return Some((value, (rx, false)));
                }
            }
        })
    }
}

impl<T> Publisher<T> {
    /// Publish a value, replacing the previous one.
    pub fn set(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    /// Publish the final value and close the channel.
    pub fn resolve(self, value: T) {
        self.set(value);
    }

    /// `true` once every observer has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Completes when every observer has been dropped.
    pub async fn closed(&self) {
        self.tx.closed().await
    }
}

/// Wait until `publisher` loses its observers or `revision` changes.
///
/// Returns `true` when the caller should re-run its query.
pub(crate) async fn wait_for_revision<T>(
    publisher: &Publisher<T>,
    revision: &mut watch::Receiver<u64>,
) -> bool {
    let closed = publisher.closed();
    let changed = revision.changed();
    futures::pin_mut!(closed, changed);

    match future::select(closed, changed).await {
        Either::Left(_) => false,
        Either::Right((result, _)) => result.is_ok(),
    }
}
