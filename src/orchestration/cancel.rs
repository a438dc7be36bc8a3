//! Internal cancellation token
//!
//! Threaded through the build and publish awaits so a future caller can wire
//! a cancel affordance. No user-facing cancel exists today: the default token
//! is never fired and invocations run to completion or failure.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// Cloneable cancellation token. All clones observe the same state.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the token. Idempotent; wakes every pending `cancelled()` wait.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token fires; pends forever on an unfired token.
    pub async fn cancelled(&self) {
        while !self.is_cancelled() {
            // Register interest before the re-check so a cancel between the
            // two cannot be missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_starts_unfired() {
        let token = CancelToken::new();

        assert!(!token.is_cancelled());
        let pending = tokio::time::timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(pending.is_err());
    }

    #[tokio::test]
    async fn test_cancel_wakes_waiters() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();

        tokio::time::timeout(Duration::from_millis(200), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_immediately_after_fire() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();

        token.cancelled().await;
        assert!(token.is_cancelled());
    }
}
