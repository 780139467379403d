//! Process-wide Ctrl-C routing

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct InterruptState {
    prompt_waiting: AtomicBool,
    notify: Notify,
}

/// Hands an interrupt to a prompt that is waiting for input, or reports it
/// as unclaimed when no prompt is waiting.
///
/// One listener per process owns the Ctrl-C handler; prompts only wait on
/// the handle.
#[derive(Debug, Clone, Default)]
pub struct InterruptHandle {
    state: Arc<InterruptState>,
}

impl InterruptHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a prompt is currently waiting for an interrupt
    pub fn is_prompt_waiting(&self) -> bool {
        self.state.prompt_waiting.load(Ordering::SeqCst)
    }

    /// Deliver one interrupt. Returns `true` when a waiting prompt took it.
    pub fn interrupt(&self) -> bool {
        if !self.is_prompt_waiting() {
            return false;
        }
        self.state.notify.notify_waiters();
        true
    }

    /// Resolve on the next interrupt. The prompt counts as waiting until
    /// this future completes or is dropped.
    pub async fn wait(&self) {
        let notified = self.state.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        let _waiting = WaitingGuard::enter(&self.state.prompt_waiting);
        notified.await;
    }

    /// Spawn the Ctrl-C listener. Interrupts no prompt is waiting for run
    /// `on_unclaimed`.
    pub fn spawn_listener<F>(&self, on_unclaimed: F) -> JoinHandle<()>
    where
        F: Fn() + Send + 'static,
    {
        let handle = self.clone();
        tokio::spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Cannot listen for Ctrl-C: {}", e);
                    return;
                }

                if handle.interrupt() {
                    debug!("Ctrl-C handed to the waiting prompt");
                } else {
                    on_unclaimed();
                }
            }
        })
    }
}

struct WaitingGuard<'a>(&'a AtomicBool);

impl<'a> WaitingGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for WaitingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
