//! Persistent status overlay
//!
//! A normally-hidden status element injected once into the host window.
//! Callers on any thread or task update it through an async contract; every
//! mutation is marshaled onto the UI executor, and failures while touching
//! the underlying control are logged and swallowed. A broken status label
//! must never abort the publish sequence around it.

use crate::status::ui_executor::UiExecutor;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;

/// The host-window element the overlay drives.
///
/// Lives on the UI executor thread once installed. Every call may fail, e.g.
/// when the element is disposed while the host window closes.
pub trait StatusControl: Send {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
    fn set_visible(&mut self, visible: bool) -> anyhow::Result<()>;

    /// Host-level busy indicator, independent of the overlay's visibility.
    fn set_busy(&mut self, busy: bool) -> anyhow::Result<()>;
}

/// Snapshot of the overlay's state. Diagnostic only; the orchestrator drives
/// the overlay fire-and-forget and never reads it back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayState {
    pub text: String,
    pub visible: bool,
    pub animating: bool,
}

struct OverlayInner {
    state: OverlayState,
    control: Box<dyn StatusControl>,
}

/// Handle to the status overlay, cloneable across threads and tasks.
///
/// Installed once per host window; invocations share the instance and reset
/// it to hidden/non-animating between runs via [`StatusOverlay::hide`].
#[derive(Clone)]
pub struct StatusOverlay {
    executor: Arc<dyn UiExecutor>,
    inner: Arc<Mutex<OverlayInner>>,
}

impl StatusOverlay {
    /// Install the overlay around the given control. Initial state is hidden
    /// and not animating.
    pub fn install<C>(control: C, executor: Arc<dyn UiExecutor>) -> Self
    where
        C: StatusControl + 'static,
    {
        Self {
            executor,
            inner: Arc::new(Mutex::new(OverlayInner {
                state: OverlayState::default(),
                control: Box::new(control),
            })),
        }
    }

    /// Make the overlay visible with the given text.
    ///
    /// Safe to call from any thread; the mutation runs on the UI executor and
    /// this future resolves once it has been applied.
    pub async fn show(&self, text: &str) {
        let text = text.to_owned();
        self.apply("show", move |inner| {
            inner.state.text = text.clone();
            inner.state.visible = true;
            log_control_error("set_text", inner.control.set_text(&text));
            log_control_error("set_visible", inner.control.set_visible(true));
        })
        .await;
    }

    /// Clear the text and collapse visibility, after an optional delay.
    ///
    /// The delay is awaited on the caller's task, never on the UI executor,
    /// so a success or failure message stays readable without holding the UI
    /// thread.
    pub async fn hide(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.apply("hide", move |inner| {
            inner.state.text.clear();
            inner.state.visible = false;
            log_control_error("set_text", inner.control.set_text(""));
            log_control_error("set_visible", inner.control.set_visible(false));
        })
        .await;
    }

    /// Toggle the host-level busy animation.
    pub async fn set_animating(&self, animating: bool) {
        self.apply("set_animating", move |inner| {
            inner.state.animating = animating;
            log_control_error("set_busy", inner.control.set_busy(animating));
        })
        .await;
    }

    /// Diagnostic snapshot of the current state.
    pub fn state(&self) -> OverlayState {
        lock(&self.inner).state.clone()
    }

    /// Post a mutation onto the UI executor and wait for it to complete.
    async fn apply<F>(&self, op: &'static str, mutate: F)
    where
        F: FnOnce(&mut OverlayInner) + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let (ack_tx, ack_rx) = oneshot::channel();

        self.executor.post(Box::new(move || {
            let mut guard = lock(&inner);
            mutate(&mut *guard);
            drop(guard);
            let _ = ack_tx.send(());
        }));

        if ack_rx.await.is_err() {
            tracing::warn!(op, "status overlay update was dropped before completion");
        }
    }
}

fn lock(inner: &Mutex<OverlayInner>) -> MutexGuard<'_, OverlayInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

fn log_control_error(op: &str, result: anyhow::Result<()>) {
    if let Err(e) = result {
        tracing::warn!(op, "status overlay update failed: {e:#}");
    }
}
