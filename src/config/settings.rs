//! Configuration settings for the verification engine.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::GuardError;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Security configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Challenge lifetime in seconds. One knob feeds both the
    /// timestamp-window check and the nonce TTL.
    #[serde(default = "default_lifetime")]
    pub lifetime_seconds: u64,
    /// Name of the header carrying the challenge.
    #[serde(default = "default_header_name")]
    pub header_name: String,
}

impl SecurityConfig {
    /// The lifetime window as a duration.
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.lifetime_seconds)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("pretty" or "json").
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Whether audit logging is enabled.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
    /// Path to the audit log file.
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,
}

// Default value functions
fn default_lifetime() -> u64 {
    300
}

fn default_header_name() -> String {
    "X-WSSE".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_audit_enabled() -> bool {
    false
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("/var/log/wsse-guard/audit.log")
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            lifetime_seconds: default_lifetime(),
            header_name: default_header_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            log_path: default_audit_log_path(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            security: SecurityConfig::default(),
            logging: LoggingConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GuardError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GuardError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| GuardError::Config {
            message: format!("Failed to parse config file '{}': {}", path.display(), e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate the settings.
    fn validate(&self) -> Result<(), GuardError> {
        if self.security.lifetime_seconds == 0 {
            return Err(GuardError::Config {
                message: "lifetime_seconds must be greater than zero".to_string(),
            });
        }

        if self.security.header_name.is_empty() {
            return Err(GuardError::Config {
                message: "header_name must not be empty".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(GuardError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(GuardError::Config {
                message: format!(
                    "Invalid log format '{}'. Valid formats: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        Ok(())
    }
}
