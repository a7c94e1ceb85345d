// CiteSleuth - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all CiteSleuth operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum CiteSleuthError {
    /// Brief loading or validation failed.
    Brief(BriefError),

    /// Simulated fetch failed.
    Fetch(FetchError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for CiteSleuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brief(e) => write!(f, "Brief error: {e}"),
            Self::Fetch(e) => write!(f, "Fetch error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for CiteSleuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Brief(e) => Some(e),
            Self::Fetch(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<BriefError> for CiteSleuthError {
    fn from(e: BriefError) -> Self {
        Self::Brief(e)
    }
}

impl From<FetchError> for CiteSleuthError {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

impl From<ExportError> for CiteSleuthError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

impl From<ConfigError> for CiteSleuthError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Brief errors
// ---------------------------------------------------------------------------

/// Errors related to brief loading and validation.
#[derive(Debug)]
pub enum BriefError {
    /// JSON content could not be parsed into a brief.
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Brief file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// I/O error reading a brief file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for BriefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonParse { path, source } => {
                write!(f, "Failed to parse brief '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Brief '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "Failed to read brief '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for BriefError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::JsonParse { source, .. } => Some(source),
            Self::FileTooLarge { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch errors
// ---------------------------------------------------------------------------

/// Errors from the simulated fetch path.
#[derive(Debug)]
pub enum FetchError {
    /// A single simulated attempt failed (injected via fail_attempts).
    AttemptFailed { attempt: u32, max_attempts: u32 },

    /// All attempts failed; the fetch gave up.
    RetriesExhausted { attempts: u32 },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttemptFailed {
                attempt,
                max_attempts,
            } => write!(f, "Fetch attempt {attempt} of {max_attempts} failed"),
            Self::RetriesExhausted { attempts } => {
                write!(f, "Brief could not be loaded after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for FetchError {}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors from notes/CSV export.
#[derive(Debug)]
pub enum ExportError {
    /// CSV serialisation failed.
    Csv { path: PathBuf, source: csv::Error },

    /// I/O error writing the export.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv { path, source } => {
                write!(f, "CSV export to '{}' failed: {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Export write to '{}' failed: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to config.toml loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading the config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse config '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Failed to read config '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}
