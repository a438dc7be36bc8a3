//! Single-threaded execution of UI mutations
//!
//! The host window owns all UI state from one thread. Rather than expose a
//! runtime-specific dispatcher, the overlay is handed a "run on the UI
//! executor" capability: jobs are posted onto a queue drained by a single
//! dedicated thread.

use tokio::sync::mpsc;

/// A unit of work to run on the UI-owning thread.
pub type UiJob = Box<dyn FnOnce() + Send + 'static>;

/// Capability to run jobs on the UI-owning thread.
///
/// Jobs posted from any thread or task execute in posting order on a single
/// thread. `post` never blocks the caller.
pub trait UiExecutor: Send + Sync {
    fn post(&self, job: UiJob);
}

/// A `UiExecutor` backed by one dedicated thread draining a job channel.
///
/// Stands in for the host's UI thread in processes that do not have one, and
/// in tests. Dropping the executor closes the channel; the thread drains
/// pending jobs and exits.
pub struct SingleThreadExecutor {
    tx: mpsc::UnboundedSender<UiJob>,
}

impl SingleThreadExecutor {
    pub fn new() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<UiJob>();

        std::thread::Builder::new()
            .name("ui-executor".to_string())
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    job();
                }
            })
            .expect("failed to spawn ui executor thread");

        Self { tx }
    }
}

impl Default for SingleThreadExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl UiExecutor for SingleThreadExecutor {
    fn post(&self, job: UiJob) {
        if self.tx.send(job).is_err() {
            tracing::warn!("ui executor is shut down; dropping posted job");
        }
    }
}
