// CiteSleuth - app/fetch.rs
//
// Simulated brief fetch. There is no network: the worker sleeps for a
// configured latency, then resolves the brief from its source (the
// embedded sample or a JSON file). Failures are injected via
// `fail_attempts` so the bounded-retry path is reachable and testable.
//
// Architecture (shared with app::verify):
//   - `FetchManager` lives on the UI thread; `run_fetch` runs on a
//     background thread.
//   - An `Arc<AtomicBool>` cancel flag allows the UI to stop the fetch
//     cooperatively; sleeps wake periodically to check it.
//   - All cross-thread communication is via `FetchProgress` channel
//     messages drained by `poll_progress` each frame.

use crate::app::state::BriefSource;
use crate::core::brief;
use crate::core::model::{Brief, FetchProgress};
use crate::util::constants;
use crate::util::error::{BriefError, FetchError};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

// =============================================================================
// Configuration
// =============================================================================

/// Tunables of the simulated fetch. Defaults come from util::constants;
/// config.toml and the CLI may override them.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Artificial latency per attempt (ms).
    pub delay_ms: u64,

    /// Total attempts before giving up (initial attempt + retries).
    pub max_attempts: u32,

    /// Fixed delay between attempts (ms).
    pub retry_delay_ms: u64,

    /// Number of leading attempts that fail. 0 = always succeed.
    pub fail_attempts: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            delay_ms: constants::DEFAULT_FETCH_DELAY_MS,
            max_attempts: constants::DEFAULT_MAX_FETCH_ATTEMPTS,
            retry_delay_ms: constants::DEFAULT_FETCH_RETRY_DELAY_MS,
            fail_attempts: 0,
        }
    }
}

// =============================================================================
// FetchManager
// =============================================================================

/// Manages a fetch operation on a background thread.
pub struct FetchManager {
    /// Channel receiver for the UI to poll progress messages.
    progress_rx: Option<mpsc::Receiver<FetchProgress>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl FetchManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start fetching from `source`. Spawns a background thread
    /// immediately; progress is sent over the channel. If a fetch is
    /// already running it is cancelled first.
    pub fn start_fetch(&mut self, source: BriefSource, config: FetchConfig) {
        self.cancel_fetch();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        std::thread::spawn(move || {
            run_fetch(source, config, tx, cancel);
        });

        tracing::info!("Fetch started");
    }

    /// Request cancellation of the running fetch.
    pub fn cancel_fetch(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
    }

    /// Poll for progress messages without blocking. Returns all pending
    /// messages.
    pub fn poll_progress(&self) -> Vec<FetchProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }
}

impl Default for FetchManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background fetch worker
// =============================================================================

/// Sleep `total_ms`, waking periodically to check the cancel flag.
/// Returns true if cancellation was requested during the sleep.
pub(crate) fn sleep_with_cancel(total_ms: u64, cancel: &AtomicBool) -> bool {
    let interval = constants::FETCH_CANCEL_CHECK_INTERVAL_MS;
    let mut remaining = total_ms;
    while remaining > 0 {
        if cancel.load(Ordering::SeqCst) {
            return true;
        }
        let slice = remaining.min(interval);
        std::thread::sleep(Duration::from_millis(slice));
        remaining -= slice;
    }
    cancel.load(Ordering::SeqCst)
}

/// Fetch worker: simulated latency → injected failures with bounded retry
/// → brief resolution. Runs on a background thread.
fn run_fetch(
    source: BriefSource,
    config: FetchConfig,
    tx: mpsc::Sender<FetchProgress>,
    cancel: Arc<AtomicBool>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return; // Receiver dropped (UI closed); exit quietly.
            }
        };
    }

    macro_rules! check_cancelled {
        ($cancelled:expr) => {
            if $cancelled {
                send!(FetchProgress::Cancelled);
                return;
            }
        };
    }

    send!(FetchProgress::Started);

    let max_attempts = config.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        check_cancelled!(sleep_with_cancel(config.delay_ms, &cancel));

        if attempt <= config.fail_attempts {
            let err = FetchError::AttemptFailed {
                attempt,
                max_attempts,
            };
            tracing::warn!(attempt, max_attempts, "Simulated fetch attempt failed");
            send!(FetchProgress::AttemptFailed {
                attempt,
                max_attempts,
            });

            if attempt == max_attempts {
                send!(FetchProgress::Failed {
                    attempts: max_attempts,
                    error: FetchError::RetriesExhausted {
                        attempts: max_attempts,
                    }
                    .to_string(),
                });
                return;
            }

            tracing::debug!(error = %err, delay_ms = config.retry_delay_ms, "Retrying fetch");
            send!(FetchProgress::Retrying {
                attempt,
                delay_ms: config.retry_delay_ms,
            });
            check_cancelled!(sleep_with_cancel(config.retry_delay_ms, &cancel));
            continue;
        }

        // Successful attempt: resolve the brief from its source.
        match resolve_brief(&source) {
            Ok(brief) => {
                tracing::info!(
                    attempt,
                    citations = brief.citations.len(),
                    "Brief fetched"
                );
                send!(FetchProgress::Completed {
                    brief: Box::new(brief),
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "Brief resolution failed");
                send!(FetchProgress::Failed {
                    attempts: attempt,
                    error: e.to_string(),
                });
            }
        }
        return;
    }
}

/// Resolve a brief from its source. File reading lives here (app layer);
/// parsing and validation live in core::brief.
fn resolve_brief(source: &BriefSource) -> Result<Brief, BriefError> {
    match source {
        BriefSource::Sample => brief::load_sample_brief(),
        BriefSource::File(path) => load_brief_file(path),
    }
}

/// Read and parse a brief JSON file, enforcing the size cap before the
/// content is pulled into memory.
pub fn load_brief_file(path: &Path) -> Result<Brief, BriefError> {
    let metadata = std::fs::metadata(path).map_err(|e| BriefError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > constants::MAX_BRIEF_FILE_SIZE {
        return Err(BriefError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_BRIEF_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| BriefError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    brief::parse_brief_json(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Config with near-zero delays so worker tests run fast.
    fn quick_config(fail_attempts: u32, max_attempts: u32) -> FetchConfig {
        FetchConfig {
            delay_ms: 1,
            max_attempts,
            retry_delay_ms: 1,
            fail_attempts,
        }
    }

    /// Run the worker synchronously and collect every message it sends.
    fn collect_progress(source: BriefSource, config: FetchConfig) -> Vec<FetchProgress> {
        let (tx, rx) = mpsc::channel();
        run_fetch(source, config, tx, Arc::new(AtomicBool::new(false)));
        rx.try_iter().collect()
    }

    #[test]
    fn fetch_without_failures_completes() {
        let messages = collect_progress(BriefSource::Sample, quick_config(0, 3));
        assert!(matches!(messages.first(), Some(FetchProgress::Started)));
        assert!(matches!(
            messages.last(),
            Some(FetchProgress::Completed { .. })
        ));
    }

    #[test]
    fn fetch_recovers_after_transient_failures() {
        let messages = collect_progress(BriefSource::Sample, quick_config(2, 3));

        let failed = messages
            .iter()
            .filter(|m| matches!(m, FetchProgress::AttemptFailed { .. }))
            .count();
        let retried = messages
            .iter()
            .filter(|m| matches!(m, FetchProgress::Retrying { .. }))
            .count();
        assert_eq!(failed, 2);
        assert_eq!(retried, 2);
        assert!(matches!(
            messages.last(),
            Some(FetchProgress::Completed { .. })
        ));
    }

    #[test]
    fn fetch_reports_failure_after_exhausting_attempts() {
        let messages = collect_progress(BriefSource::Sample, quick_config(3, 3));
        match messages.last() {
            Some(FetchProgress::Failed { attempts, error }) => {
                assert_eq!(*attempts, 3);
                assert!(error.contains("3 attempts"), "error was: {error}");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn fetch_missing_file_reports_failure() {
        let source = BriefSource::File("/nonexistent/citesleuth-test.json".into());
        let messages = collect_progress(source, quick_config(0, 1));
        assert!(matches!(
            messages.last(),
            Some(FetchProgress::Failed { attempts: 1, .. })
        ));
    }

    #[test]
    fn cancelled_fetch_reports_cancelled() {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(true));
        run_fetch(BriefSource::Sample, quick_config(0, 3), tx, cancel);
        let messages: Vec<_> = rx.try_iter().collect();
        assert!(matches!(
            messages.last(),
            Some(FetchProgress::Cancelled)
        ));
    }

    #[test]
    fn load_brief_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.json");
        std::fs::write(
            &path,
            r#"{"title":"T","content":"See [[CITATION:1]].","citations":[
                {"id":"cit-1","text":"t","caseName":"c","reporter":"r","year":2001}
            ],"verificationResults":[]}"#,
        )
        .unwrap();

        let brief = load_brief_file(&path).unwrap();
        assert_eq!(brief.title, "T");
        assert_eq!(brief.citations.len(), 1);
    }

    #[test]
    fn load_brief_file_rejects_oversized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.json");
        let padding = "x".repeat((constants::MAX_BRIEF_FILE_SIZE + 1) as usize);
        std::fs::write(&path, padding).unwrap();

        let result = load_brief_file(&path);
        assert!(matches!(result, Err(BriefError::FileTooLarge { .. })));
    }
}
