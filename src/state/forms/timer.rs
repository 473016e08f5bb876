//! Scheduled expiry of the transient success/error message

use super::form_state::TransientFlag;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Delivered when a flag timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagExpiry {
    /// Flag the timer was scheduled for
    pub flag: TransientFlag,
    /// Generation of the timer that fired
    pub generation: u64,
}

/// Owns at most one pending flag timer.
///
/// Expiries are sent over a channel and applied by the event loop, so the
/// engine is only ever mutated from one place.
#[derive(Debug)]
pub struct FlagTimer {
    tx: UnboundedSender<FlagExpiry>,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl FlagTimer {
    pub fn new(tx: UnboundedSender<FlagExpiry>) -> Self {
        Self {
            tx,
            pending: None,
            generation: 0,
        }
    }

    /// Cancel any pending timer and schedule a new one for `flag`
    pub fn schedule(&mut self, flag: TransientFlag, delay: Duration) -> u64 {
        self.cancel();
        self.generation += 1;
        let expiry = FlagExpiry {
            flag,
            generation: self.generation,
        };
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(expiry);
        }));
        tracing::debug!(?flag, generation = self.generation, ?delay, "scheduled flag timer");
        self.generation
    }

    /// Abort the pending timer, if any. Also invalidates its generation so a
    /// send that already happened is ignored.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            self.generation += 1;
        }
    }

    /// Whether `generation` belongs to the timer currently scheduled
    pub fn is_current(&self, generation: u64) -> bool {
        self.has_pending() && self.generation == generation
    }

    /// Forget the handle of a timer that has fired
    pub fn mark_fired(&mut self) {
        self.pending = None;
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for FlagTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
