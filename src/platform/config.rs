// CiteSleuth - platform/config.rs
//
// Platform-specific path resolution and config.toml loading with startup
// validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::{ProjectDirs, UserDirs};
use std::path::{Path, PathBuf};

/// Resolved platform paths for CiteSleuth configuration and exports.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/citesleuth/ or
    /// %APPDATA%\CiteSleuth\).
    pub config_dir: PathBuf,

    /// Default directory offered by the export save dialogs
    /// (the user's documents folder where available).
    pub export_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        let config_dir = match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => proj_dirs.config_dir().to_path_buf(),
            None => {
                tracing::warn!("Could not determine platform directories, using current directory");
                PathBuf::from(".")
            }
        };

        let export_dir = UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::debug!(
            config = %config_dir.display(),
            export = %export_dir.display(),
            "Platform paths resolved"
        );

        Self {
            config_dir,
            export_dir,
        }
    }

    /// Full path of the config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[fetch]` section.
    pub fetch: FetchSection,
    /// `[verify]` section.
    pub verify: VerifySection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[fetch]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FetchSection {
    /// Simulated fetch latency per attempt in ms.
    pub delay_ms: Option<u64>,
    /// Total fetch attempts before giving up.
    pub max_attempts: Option<u32>,
    /// Fixed delay between attempts in ms.
    pub retry_delay_ms: Option<u64>,
    /// Leading attempts that fail (failure-path demo/testing).
    pub fail_attempts: Option<u32>,
}

/// `[verify]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct VerifySection {
    /// Simulated verification cycle delay in ms.
    pub delay_ms: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", or "trace".
    pub level: Option<String>,
}

/// Validated application configuration with every field resolved.
///
/// Holds plain values only; main.rs assembles the app-layer configs from
/// these so the platform layer stays independent of app types.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fetch_delay_ms: u64,
    pub fetch_max_attempts: u32,
    pub fetch_retry_delay_ms: u64,
    pub fetch_fail_attempts: u32,
    pub verify_delay_ms: u64,
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: constants::DEFAULT_FETCH_DELAY_MS,
            fetch_max_attempts: constants::DEFAULT_MAX_FETCH_ATTEMPTS,
            fetch_retry_delay_ms: constants::DEFAULT_FETCH_RETRY_DELAY_MS,
            fetch_fail_attempts: 0,
            verify_delay_ms: constants::DEFAULT_VERIFY_DELAY_MS,
            log_level: None,
        }
    }
}

/// Read and parse config.toml if it exists.
///
/// A missing file is not an error (defaults apply); a malformed file is.
pub fn load_raw_config(path: &Path) -> Result<Option<RawConfig>, ConfigError> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "No config file (using defaults)");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let raw = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "Configuration loaded");
    Ok(Some(raw))
}

/// Validate a raw config into an `AppConfig`, clamping out-of-range values
/// with a warning rather than failing startup.
pub fn validate_config(raw: RawConfig) -> AppConfig {
    let defaults = AppConfig::default();

    let fetch_delay_ms = clamp_delay("fetch.delay_ms", raw.fetch.delay_ms, defaults.fetch_delay_ms);
    let fetch_retry_delay_ms = clamp_delay(
        "fetch.retry_delay_ms",
        raw.fetch.retry_delay_ms,
        defaults.fetch_retry_delay_ms,
    );
    let verify_delay_ms = clamp_delay(
        "verify.delay_ms",
        raw.verify.delay_ms,
        defaults.verify_delay_ms,
    );

    let fetch_max_attempts = match raw.fetch.max_attempts {
        Some(0) => {
            tracing::warn!("fetch.max_attempts = 0 is invalid; using 1");
            1
        }
        Some(n) if n > constants::ABSOLUTE_MAX_FETCH_ATTEMPTS => {
            tracing::warn!(
                requested = n,
                max = constants::ABSOLUTE_MAX_FETCH_ATTEMPTS,
                "fetch.max_attempts exceeds the hard limit; clamping"
            );
            constants::ABSOLUTE_MAX_FETCH_ATTEMPTS
        }
        Some(n) => n,
        None => defaults.fetch_max_attempts,
    };

    AppConfig {
        fetch_delay_ms,
        fetch_max_attempts,
        fetch_retry_delay_ms,
        fetch_fail_attempts: raw.fetch.fail_attempts.unwrap_or(0),
        verify_delay_ms,
        log_level: raw.logging.level,
    }
}

/// Clamp an optional delay to the hard upper bound, warning on excess.
fn clamp_delay(field: &str, value: Option<u64>, default: u64) -> u64 {
    match value {
        Some(ms) if ms > constants::ABSOLUTE_MAX_DELAY_MS => {
            tracing::warn!(
                field,
                requested = ms,
                max = constants::ABSOLUTE_MAX_DELAY_MS,
                "Delay exceeds the hard limit; clamping"
            );
            constants::ABSOLUTE_MAX_DELAY_MS
        }
        Some(ms) => ms,
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_raw_config(&dir.path().join("config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[fetch]\ndelay_ms = 10\nmax_attempts = 5\n\n[verify]\ndelay_ms = 20\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let raw = load_raw_config(&path).unwrap().unwrap();
        let config = validate_config(raw);
        assert_eq!(config.fetch_delay_ms, 10);
        assert_eq!(config.fetch_max_attempts, 5);
        assert_eq!(config.verify_delay_ms, 20);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let raw: RawConfig =
            toml::from_str("[fetch]\ndelay_ms = 3\nfuture_knob = true\n[surprise]\nx = 1\n")
                .unwrap();
        assert_eq!(raw.fetch.delay_ms, Some(3));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let raw: RawConfig = toml::from_str(
            "[fetch]\ndelay_ms = 999999999\nmax_attempts = 200\n[verify]\ndelay_ms = 999999999\n",
        )
        .unwrap();
        let config = validate_config(raw);
        assert_eq!(config.fetch_delay_ms, constants::ABSOLUTE_MAX_DELAY_MS);
        assert_eq!(
            config.fetch_max_attempts,
            constants::ABSOLUTE_MAX_FETCH_ATTEMPTS
        );
        assert_eq!(config.verify_delay_ms, constants::ABSOLUTE_MAX_DELAY_MS);
    }

    #[test]
    fn zero_max_attempts_becomes_one() {
        let raw: RawConfig = toml::from_str("[fetch]\nmax_attempts = 0\n").unwrap();
        assert_eq!(validate_config(raw).fetch_max_attempts, 1);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fetch\ndelay_ms = ").unwrap();
        assert!(matches!(
            load_raw_config(&path),
            Err(ConfigError::TomlParse { .. })
        ));
    }
}
