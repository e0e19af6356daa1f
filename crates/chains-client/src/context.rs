//! Request context carrying cancellation and deadlines.

use crate::error::Error;
use std::future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;


/// Cancellation scope for a request.
///
/// A context ends when its [`CancelHandle`] is triggered or its deadline
/// passes. Services check it before sending and race the in-flight exchange
/// against it, dropping the exchange as soon as the context ends.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Handle that cancels the [`Context`] it was created with.
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    /// Cancels the associated context and every clone of it.
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

impl Context {
    /// Creates a context that never ends.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Creates a cancellable context and its handle.
    #[must_use]
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            cancel: Some(rx),
            deadline: None,
        };
        (ctx, CancelHandle(tx))
    }

    /// Returns a copy that also ends `timeout` from now.
    ///
    /// An earlier existing deadline is kept.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Returns a copy that also ends at `deadline`.
    ///
    /// An earlier existing deadline is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Returns the deadline, if one is set.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the reason the context ended, or `None` while it is live.
    #[must_use]
    pub fn err(&self) -> Option<Error> {
        if self.cancel.as_ref().is_some_and(|rx| *rx.borrow()) {
            return Some(Error::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(Error::DeadlineExceeded);
        }
        None
    }

    /// Waits until the context ends and returns the reason.
    ///
    /// Never resolves for a background context.
    pub async fn done(&self) -> Error {
        let cancelled = async {
            if let Some(rx) = &self.cancel {
                let mut rx = rx.clone();
                let fired = rx.wait_for(|cancelled| *cancelled).await.is_ok();
                if fired {
                    return;
                }
            }
            // Handle dropped without cancelling.
            future::pending::<()>().await
        };

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = cancelled => Error::Cancelled,
            () = expired => Error::DeadlineExceeded,
        }
    }
}
