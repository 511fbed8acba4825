//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `EHR_*` environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::registration::SimulatedSubmitter;
use crate::session::{SessionConfig, SessionError};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub registration: RegistrationSettings,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Idle-session timing
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: u64,

    #[serde(default = "default_warning_minutes")]
    pub warning_minutes: u64,

    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

fn default_timeout_minutes() -> u64 {
    20
}

fn default_warning_minutes() -> u64 {
    5
}

fn default_tick_interval() -> u64 {
    1000
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            timeout_minutes: default_timeout_minutes(),
            warning_minutes: default_warning_minutes(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl SessionSettings {
    /// Validate into a monitor configuration
    pub fn to_session_config(&self) -> Result<SessionConfig, SessionError> {
        Ok(SessionConfig::new(self.timeout_minutes, self.warning_minutes)?
            .tick_interval(Duration::from_millis(self.tick_interval_ms)))
    }
}

/// Registration submission settings
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationSettings {
    /// Simulated backend latency
    #[serde(default = "default_submit_delay")]
    pub submit_delay_ms: u64,
}

fn default_submit_delay() -> u64 {
    2000
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay(),
        }
    }
}

impl RegistrationSettings {
    pub fn submitter(&self) -> SimulatedSubmitter {
        SimulatedSubmitter::new(Duration::from_millis(self.submit_delay_ms))
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Check `X-User-Permissions` against each route's access level
    #[serde(default)]
    pub enforce_access: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
            request_timeout_secs: default_request_timeout(),
            enforce_access: false,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("ehr-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/ehr-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(host) = std::env::var("EHR_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = env_parse("EHR_API_PORT") {
            self.api.port = port;
        }

        // Session overrides
        if let Some(minutes) = env_parse("EHR_SESSION_TIMEOUT_MINUTES") {
            self.session.timeout_minutes = minutes;
        }
        if let Some(minutes) = env_parse("EHR_SESSION_WARNING_MINUTES") {
            self.session.warning_minutes = minutes;
        }

        if let Some(delay) = env_parse("EHR_SUBMIT_DELAY_MS") {
            self.registration.submit_delay_ms = delay;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("EHR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("EHR_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Unparseable values are ignored
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# EHR Dashboard Configuration
#
# Environment variables override these settings:
# - EHR_API_HOST
# - EHR_API_PORT
# - EHR_SESSION_TIMEOUT_MINUTES
# - EHR_SESSION_WARNING_MINUTES
# - EHR_SUBMIT_DELAY_MS
# - EHR_LOG_LEVEL
# - EHR_LOG_FORMAT

[session]
# Minutes of inactivity before the session expires
timeout_minutes = 20

# Minutes before expiry at which the warning is shown
warning_minutes = 5

# Countdown tick period (ms)
tick_interval_ms = 1000

[registration]
# Simulated submission latency (ms)
submit_delay_ms = 2000

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8086

# Allowed CORS origins
cors_origins = ["http://localhost:8080", "http://127.0.0.1:8080"]

# Request timeout in seconds
request_timeout_secs = 30

# Require X-User-Permissions on protected routes
enforce_access = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/ehr-dashboard/ehr-dashboard.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let file = write_config(&generate_default_config());
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.session.timeout_minutes, 20);
        assert_eq!(config.session.warning_minutes, 5);
        assert_eq!(config.registration.submit_delay_ms, 2000);
        assert_eq!(config.api.port, 8086);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let file = write_config("[session]\ntimeout_minutes = 2\nwarning_minutes = 1\n");
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.session.timeout_minutes, 2);
        assert_eq!(config.session.tick_interval_ms, 1000);
        assert_eq!(config.api.host, "0.0.0.0");

        let session = config.session.to_session_config().unwrap();
        assert_eq!(session.timeout_secs(), 120);
        assert_eq!(session.warning_secs(), 60);
    }

    #[test]
    fn test_invalid_session_settings_rejected() {
        let settings = SessionSettings {
            timeout_minutes: 5,
            warning_minutes: 5,
            tick_interval_ms: 1000,
        };
        assert!(settings.to_session_config().is_err());
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/ehr/config.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let file = write_config("[session\ntimeout_minutes = ");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("EHR_SESSION_TIMEOUT_MINUTES", "30");
        std::env::set_var("EHR_API_PORT", "not-a-port");
        let config = Config::from_env();
        std::env::remove_var("EHR_SESSION_TIMEOUT_MINUTES");
        std::env::remove_var("EHR_API_PORT");

        assert_eq!(config.session.timeout_minutes, 30);
        assert_eq!(config.api.port, 8086);
    }
}
