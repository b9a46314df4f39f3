//! Deployment environment and logging settings

use serde::{Deserialize, Serialize};
use std::{env, fmt, str::FromStr};

/// Where the server runs; picks the configuration preset and file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    /// Reads `ENVIRONMENT` (or `NODE_ENV`), defaulting to development
    pub fn from_env() -> Self {
        env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Optional TOML file layered over the preset
    pub fn config_file(&self) -> &'static str {
        match self {
            Environment::Development => "config.development.toml",
            Environment::Staging => "config.staging.toml",
            Environment::Production => "config.production.toml",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Logging configuration for the `env_logger` backend
///
/// `RUST_LOG` still wins over `level` when it is set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,

    #[serde(default = "default_timestamp")]
    pub timestamp: bool,

    /// Prefix records with the emitting module path
    #[serde(default)]
    pub module_path: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            timestamp: default_timestamp(),
            module_path: false,
        }
    }
}

impl LoggingConfig {
    pub fn for_environment(env: Environment) -> Self {
        match env {
            // sqlx statement logs are noisy below warn
            Environment::Development => Self {
                level: String::from("debug,sqlx=warn"),
                timestamp: true,
                module_path: true,
            },
            Environment::Staging | Environment::Production => Self::default(),
        }
    }
}

fn default_timestamp() -> bool {
    true
}
