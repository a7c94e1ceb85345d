// CiteSleuth - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "CiteSleuth";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "CiteSleuth";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Fetch simulation
// =============================================================================

/// Artificial latency before the simulated fetch resolves (ms).
pub const DEFAULT_FETCH_DELAY_MS: u64 = 1500;

/// Maximum fetch attempts before giving up (initial attempt + retries).
pub const DEFAULT_MAX_FETCH_ATTEMPTS: u32 = 3;

/// Fixed delay between fetch retries (ms).
pub const DEFAULT_FETCH_RETRY_DELAY_MS: u64 = 400;

/// How often the worker wakes during a sleep to check the cancel flag (ms).
pub const FETCH_CANCEL_CHECK_INTERVAL_MS: u64 = 50;

/// Hard upper bound on configurable fetch attempts (prevents config mistakes).
pub const ABSOLUTE_MAX_FETCH_ATTEMPTS: u32 = 10;

/// Hard upper bound on configurable delays (ms). One minute of simulated
/// latency is already far beyond anything useful.
pub const ABSOLUTE_MAX_DELAY_MS: u64 = 60_000;

// =============================================================================
// Verification cycle
// =============================================================================

/// Fixed delay of the simulated verification cycle (ms).
pub const DEFAULT_VERIFY_DELAY_MS: u64 = 650;

// =============================================================================
// Brief loading
// =============================================================================

/// Maximum size of a brief JSON file in bytes. Files exceeding this are
/// rejected before parsing to prevent unbounded memory from malformed input.
pub const MAX_BRIEF_FILE_SIZE: u64 = 4 * 1024 * 1024; // 4 MB

// =============================================================================
// Export
// =============================================================================

/// Prefix of generated notes filenames:
/// `<prefix>-<sanitised-title>-<YYYY-MM-DD>.txt`.
pub const EXPORT_FILE_PREFIX: &str = "citesleuth-notes";

/// Extension of the notes export.
pub const NOTES_EXTENSION: &str = "txt";

/// Extension of the CSV export.
pub const CSV_EXTENSION: &str = "csv";

/// Status label used in exports for citations without a verification result.
pub const PENDING_STATUS_LABEL: &str = "Pending";

/// Note message used in exports for citations without a verification result.
pub const PENDING_MESSAGE: &str = "Verification pending.";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config specify one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Config file
// =============================================================================

/// Name of the configuration file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
