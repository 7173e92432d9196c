//! Request state tracking for views.
//!
//! [`Fetch`] runs a GET whenever its dependency key changes and exposes the
//! loading / data / error observables a panel renders from. [`Submission`]
//! tracks a single in-flight write. Both hand work to the tokio runtime and
//! are drained by the UI thread with `poll`.
//!
//! Dropping either one (or replacing its receiver) discards late responses;
//! the network request itself still runs to completion.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::error::{AppError, Result};

/// GET state bound to a dependency key.
pub struct Fetch<K, T> {
    key: Option<K>,
    data: Option<T>,
    loading: bool,
    error: Option<AppError>,
    rx: Option<mpsc::UnboundedReceiver<Result<T>>>,
}

impl<K, T> Default for Fetch<K, T> {
    fn default() -> Self {
        Self {
            key: None,
            data: None,
            loading: true,
            error: None,
            rx: None,
        }
    }
}

impl<K, T> Fetch<K, T>
where
    K: PartialEq + Clone,
    T: Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a request for `key` unless the last request used the same key.
    ///
    /// Returns `true` when a request was spawned. Any response still pending
    /// for the previous key is discarded.
    pub fn ensure<F, Fut>(&mut self, key: K, rt: &Handle, request: F) -> bool
    where
        F: FnOnce(&K) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        if self.key.as_ref() == Some(&key) {
            return false;
        }

        let future = request(&key);
        let (tx, rx) = mpsc::unbounded_channel();
        self.rx = Some(rx);
        self.key = Some(key);
        self.loading = true;
        self.error = None;

        rt.spawn(async move {
            let _ = tx.send(future.await);
        });
        true
    }

    /// Apply a finished response, if one has arrived.
    ///
    /// Returns `true` when state changed.
    pub fn poll(&mut self) -> bool {
        let Some(mut rx) = self.rx.take() else {
            return false;
        };

        match rx.try_recv() {
            Ok(Ok(data)) => {
                self.data = Some(data);
                self.loading = false;
                true
            }
            Ok(Err(e)) => {
                tracing::warn!("Request failed: {e}");
                self.error = Some(e);
                self.loading = false;
                true
            }
            Err(mpsc::error::TryRecvError::Empty) => {
                self.rx = Some(rx);
                false
            }
            Err(mpsc::error::TryRecvError::Disconnected) => {
                // Task ended without reporting (runtime shut down)
                self.loading = false;
                true
            }
        }
    }
}

impl<K, T> Fetch<K, T> {
    /// Latest resolved data. Stays available while a newer key is loading.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    /// Key of the most recent request.
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }
}

impl<K, T> Fetch<K, Vec<T>> {
    /// Resolved records, or an empty slice before the first response.
    pub fn items(&self) -> &[T] {
        self.data.as_deref().unwrap_or(&[])
    }
}

/// A single in-flight write.
#[derive(Default)]
pub struct Submission {
    rx: Option<mpsc::UnboundedReceiver<Result<()>>>,
    error: Option<AppError>,
}

impl Submission {
    /// Spawn `request`. Ignored while a previous write is still pending.
    pub fn start<Fut>(&mut self, rt: &Handle, request: Fut) -> bool
    where
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        if self.is_pending() {
            return false;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.rx = Some(rx);
        self.error = None;

        rt.spawn(async move {
            let _ = tx.send(request.await);
        });
        true
    }

    /// Returns `Some(true)` once the write succeeded, `Some(false)` once it
    /// failed, and `None` while pending or idle.
    pub fn poll(&mut self) -> Option<bool> {
        let mut rx = self.rx.take()?;

        match rx.try_recv() {
            Ok(Ok(())) => Some(true),
            Ok(Err(e)) => {
                tracing::warn!("Write failed: {e}");
                self.error = Some(e);
                Some(false)
            }
            Err(mpsc::error::TryRecvError::Empty) => {
                self.rx = Some(rx);
                None
            }
            Err(mpsc::error::TryRecvError::Disconnected) => Some(false),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }
}
