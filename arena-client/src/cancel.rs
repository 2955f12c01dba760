//! Supersede-on-new-request cancellation.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use futures::future::{AbortHandle, Abortable};

use crate::{ClientError, ClientResult};

/// Holds the in-flight request of one feature.
///
/// Starting a request through the slot aborts the one before it, so a new
/// user action cancels a long-running generation. The aborted call resolves
/// to [`ClientError::Cancelled`].
#[derive(Debug, Default)]
pub struct CancelSlot {
    current: Mutex<Option<(u64, AbortHandle)>>,
    next_id: AtomicU64,
}

impl CancelSlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `future`, cancelling whatever the slot was running before.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cancelled`] if a later call or
    /// [`CancelSlot::cancel`] aborted this one.
    pub async fn run<F: Future>(&self, future: F) -> ClientResult<F::Output> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (handle, registration) = AbortHandle::new_pair();
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace((id, handle));

        if let Some((_, previous)) = previous {
            tracing::debug!("Superseding in-flight request");
            previous.abort();
        }

        let result = Abortable::new(future, registration).await;
        self.release(id);
        result.map_err(|_| ClientError::Cancelled)
    }

    /// Check if a request is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Abort the in-flight request. Returns false if there was none.
    #[must_use]
    pub fn cancel(&self) -> bool {
        let current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match current {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Empty the slot if it still holds request `id`.
    fn release(&self, id: u64) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current.as_ref().is_some_and(|(held, _)| *held == id) {
            *current = None;
        }
    }
}
