// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub app: AppConfig,
    #[serde(default)]
    pub data: DataConfig,
}

/// Configuration that passed startup validation. The server refuses to boot
/// on anything invalid, so the rest of the code never re-checks.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub app: AppConfig,
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl ServerConfig {
    pub fn address_tuple(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

fn default_workers() -> usize {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join("config.yaml");
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        let config: Config = serde_yaml::from_str(&config_content).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Loads and validates configuration at startup. If validation fails, the application should not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        let config = Self::load(root)?;

        Self::validate_server(&config.server)?;
        Self::validate_logging(&config.logging)?;
        Self::validate_app(&config.app)?;

        Ok(ValidatedConfig {
            server: config.server,
            logging: config.logging,
            app: config.app,
            data: config.data,
        })
    }

    fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
        if server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host cannot be empty".to_string(),
            ));
        }
        if server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }
        if server.workers == 0 {
            return Err(ConfigError::ValidationError(
                "server.workers must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        match logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::ValidationError(format!(
                "logging.level must be one of trace, debug, info, warn, error, got: {}",
                other
            ))),
        }
    }

    fn validate_app(app: &AppConfig) -> Result<(), ConfigError> {
        if app.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "app.name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_fixtures::TestFixtureRoot;
    use std::fs;

    fn base_server_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: 1,
        }
    }

    fn base_app_config() -> AppConfig {
        AppConfig {
            name: "Larder".to_string(),
            description: "A personal recipe collection API".to_string(),
        }
    }

    #[test]
    fn validate_server_accepts_plain_listener() {
        assert!(Config::validate_server(&base_server_config()).is_ok());
    }

    #[test]
    fn validate_server_rejects_blank_host() {
        let mut server = base_server_config();
        server.host = "   ".to_string();
        assert!(Config::validate_server(&server).is_err());
    }

    #[test]
    fn validate_server_rejects_zero_port() {
        let mut server = base_server_config();
        server.port = 0;
        assert!(Config::validate_server(&server).is_err());
    }

    #[test]
    fn validate_server_rejects_zero_workers() {
        let mut server = base_server_config();
        server.workers = 0;
        assert!(Config::validate_server(&server).is_err());
    }

    #[test]
    fn validate_logging_accepts_known_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "WARN"] {
            let logging = LoggingConfig {
                level: level.to_string(),
            };
            assert!(Config::validate_logging(&logging).is_ok(), "level {}", level);
        }
    }

    #[test]
    fn validate_logging_rejects_unknown_level() {
        let logging = LoggingConfig {
            level: "verbose".to_string(),
        };
        assert!(Config::validate_logging(&logging).is_err());
    }

    #[test]
    fn validate_app_rejects_blank_name() {
        let mut app = base_app_config();
        app.name = "".to_string();
        assert!(Config::validate_app(&app).is_err());
    }

    #[test]
    fn load_applies_section_defaults() {
        let fixture = TestFixtureRoot::new_unique("config-defaults").unwrap();
        let config_path = fixture.path().join("config.yaml");
        fs::write(
            &config_path,
            "server:\n  host: \"0.0.0.0\"\n  port: 5000\napp:\n  name: \"Larder\"\n  description: \"A personal recipe collection API\"\n",
        )
        .unwrap();

        let validated = Config::load_and_validate(fixture.path()).expect("valid config");
        assert_eq!(validated.server.workers, 4);
        assert_eq!(validated.logging.level, "info");
        assert!(validated.data.pretty);
        assert_eq!(validated.server.address_tuple(), ("0.0.0.0", 5000));
    }

    #[test]
    fn load_reports_missing_config_file() {
        let fixture = TestFixtureRoot::new_unique("config-missing").unwrap();
        let err = Config::load(fixture.path()).expect_err("missing config should fail");
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn load_and_validate_rejects_bad_level() {
        let fixture = TestFixtureRoot::new_unique("config-bad-level").unwrap();
        let config_path = fixture.path().join("config.yaml");
        fs::write(
            &config_path,
            "server:\n  host: \"0.0.0.0\"\n  port: 5000\nlogging:\n  level: \"loud\"\napp:\n  name: \"Larder\"\n  description: \"A personal recipe collection API\"\n",
        )
        .unwrap();

        let err = Config::load_and_validate(fixture.path()).expect_err("invalid level");
        assert!(err.to_string().contains("logging.level"));
    }
}
