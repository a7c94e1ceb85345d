// CiteSleuth - app/verify.rs
//
// Simulated verification cycle. Running verification never changes any
// brief data; the cycle is a fixed-delay background sleep whose only
// observable effect is the UI's transient "verifying" state. Uses the
// same manager/channel shape as app::fetch.

use crate::app::fetch::sleep_with_cancel;
use crate::core::model::VerifyProgress;
use crate::util::constants;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

/// Manages a verification cycle on a background thread.
pub struct VerifyManager {
    progress_rx: Option<mpsc::Receiver<VerifyProgress>>,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl VerifyManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start a verification cycle with the given delay.
    ///
    /// Callers must not start a cycle while one is active (the gui loop
    /// gates on the state's verify flag); starting anyway cancels the
    /// running cycle first rather than stacking two.
    pub fn start_verify(&mut self, delay_ms: u64) {
        self.cancel_verify();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        let delay = delay_ms.min(constants::ABSOLUTE_MAX_DELAY_MS);
        std::thread::spawn(move || {
            run_verify(delay, tx, cancel);
        });

        tracing::info!(delay_ms = delay, "Verification cycle started");
    }

    /// Request cancellation of the running cycle (application shutdown).
    pub fn cancel_verify(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
    }

    /// Poll for progress messages without blocking.
    pub fn poll_progress(&self) -> Vec<VerifyProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }
}

impl Default for VerifyManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Verification worker: one fixed-delay sleep, then done.
fn run_verify(delay_ms: u64, tx: mpsc::Sender<VerifyProgress>, cancel: Arc<AtomicBool>) {
    if tx.send(VerifyProgress::Started).is_err() {
        return;
    }

    if sleep_with_cancel(delay_ms, &cancel) {
        let _ = tx.send(VerifyProgress::Cancelled);
        return;
    }

    let _ = tx.send(VerifyProgress::Completed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_reports_started_then_completed() {
        let (tx, rx) = mpsc::channel();
        run_verify(1, tx, Arc::new(AtomicBool::new(false)));
        let messages: Vec<_> = rx.try_iter().collect();
        assert!(matches!(messages.first(), Some(VerifyProgress::Started)));
        assert!(matches!(messages.last(), Some(VerifyProgress::Completed)));
    }

    #[test]
    fn cancelled_cycle_reports_cancelled() {
        let (tx, rx) = mpsc::channel();
        run_verify(1, tx, Arc::new(AtomicBool::new(true)));
        let messages: Vec<_> = rx.try_iter().collect();
        assert!(matches!(messages.last(), Some(VerifyProgress::Cancelled)));
    }
}
