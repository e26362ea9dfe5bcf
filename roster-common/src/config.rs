//! Configuration loading
//!
//! Bootstrap settings come from a TOML file resolved in priority order:
//! 1. Command-line argument (`--config`)
//! 2. Environment variable (`ROSTER_CONFIG`)
//! 3. `<config dir>/roster/config.toml` when it exists
//! 4. Compiled defaults
//!
//! CLI flags then override individual values, and the admin credentials and
//! token secret can be supplied through the environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::import::ValidationRules;
use crate::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "ROSTER_CONFIG";
pub const ADMIN_USERNAME_ENV_VAR: &str = "ADMIN_USERNAME";
pub const ADMIN_PASSWORD_ENV_VAR: &str = "ADMIN_PASSWORD";
pub const TOKEN_SECRET_ENV_VAR: &str = "ROSTER_TOKEN_SECRET";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// SQLite database file; OS data directory when unset
    pub database_path: Option<PathBuf>,
    pub bind_host: String,
    pub port: u16,
    /// Records per page in the table view
    pub page_size: usize,
    /// Request body limit in bytes
    pub max_body_bytes: usize,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub validation: ValidationRules,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            bind_host: "127.0.0.1".to_string(),
            port: 5790,
            page_size: crate::pagination::PAGE_SIZE,
            max_body_bytes: 10 * 1024 * 1024,
            logging: LoggingConfig::default(),
            auth: AuthConfig::default(),
            validation: ValidationRules::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error); `RUST_LOG` wins
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Admin credentials and token settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    /// Empty disables login
    pub password: String,
    /// Token signing secret; empty means use the one persisted in the database
    pub secret: String,
    pub token_lifetime_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: String::new(),
            secret: String::new(),
            token_lifetime_secs: 10 * 60 * 60,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("secret", &redact(&self.secret))
            .field("token_lifetime_secs", &self.token_lifetime_secs)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Resolve, read and override the configuration
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let path = resolve_config_path(overrides.config_path.as_deref());
        Self::load_from(path.as_deref(), overrides)
    }

    /// Read `path` (compiled defaults when `None`), then apply overrides
    ///
    /// An explicitly named file must exist; callers pass `None` only when
    /// resolution found nothing.
    pub fn load_from(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.apply_cli_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Credentials and secret from the environment replace file values
    pub fn apply_env_overrides(&mut self) {
        if let Ok(username) = std::env::var(ADMIN_USERNAME_ENV_VAR) {
            self.auth.username = username;
        }
        if let Ok(password) = std::env::var(ADMIN_PASSWORD_ENV_VAR) {
            self.auth.password = password;
        }
        if let Ok(secret) = std::env::var(TOKEN_SECRET_ENV_VAR) {
            self.auth.secret = secret;
        }
    }

    pub fn apply_cli_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.database_path {
            self.database_path = Some(path.clone());
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if self.auth.token_lifetime_secs == 0 {
            return Err(Error::Config("auth.token_lifetime_secs must be at least 1".to_string()));
        }
        if self.validation.email_domain.trim().is_empty() {
            return Err(Error::Config("validation.email_domain must not be empty".to_string()));
        }
        Ok(())
    }

    /// Configured database path, or the OS default
    pub fn database_path(&self) -> PathBuf {
        self.database_path.clone().unwrap_or_else(default_database_path)
    }
}

/// Config file location by priority, `None` when only defaults apply
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Per-user config file, only if present
    dirs::config_dir()
        .map(|d| d.join("roster").join("config.toml"))
        .filter(|path| path.exists())
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("roster"))
        .unwrap_or_else(|| PathBuf::from("./roster_data"))
        .join("roster.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.port, 5790);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.auth.token_lifetime_secs, 36_000);
        assert_eq!(config.validation.email_domain, "gmail.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
            port = 8080

            [validation]
            places = ["Goa"]
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.validation.places, ["Goa"]);
        assert_eq!(config.validation.genders.len(), 3);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(TomlConfig::from_toml_str("port = \"high\""), Err(Error::Config(_))));
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = TomlConfig::default();
        config.apply_cli_overrides(&ConfigOverrides {
            config_path: None,
            database_path: Some(PathBuf::from("/tmp/x.db")),
            port: Some(9000),
        });
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = TomlConfig {
            page_size: 0,
            ..TomlConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let auth = AuthConfig {
            password: "hunter2".to_string(),
            ..AuthConfig::default()
        };
        let printed = format!("{auth:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_default_database_path_ends_with_file_name() {
        assert!(default_database_path().ends_with("roster.db"));
    }
}
