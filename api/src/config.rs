//! Layered configuration loading
//!
//! Precedence, lowest first: the environment preset built by
//! `AppConfig::from_env` (which already honours the flat variables such as
//! `DATABASE_URL`, `JWT_SECRET` or `SERVER_PORT`), then an optional
//! per-environment TOML file, then `RENTHUB__*` variables addressing any
//! nested key, e.g. `RENTHUB__EVENTS__KEEP_ALIVE_SECS=30`.

use ::config::{Config, ConfigError, Environment as EnvSource, File};
use rh_shared::config::AppConfig;

const ENV_PREFIX: &str = "RENTHUB";

/// Loads the application configuration
pub fn load() -> Result<AppConfig, ConfigError> {
    let preset = AppConfig::from_env();
    let config_file = preset.environment.config_file().to_string();
    load_from(preset, &config_file)
}

/// Layers `file` (when present) and prefixed variables over `preset`
pub fn load_from(preset: AppConfig, file: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = Config::builder()
        .add_source(Config::try_from(&preset)?)
        .add_source(File::with_name(file).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins"),
        )
        .build()?
        .try_deserialize()?;

    if config.auth.jwt.is_using_default_secret() && config.environment.is_production() {
        return Err(ConfigError::Message(
            "JWT_SECRET must be set in production".to_string(),
        ));
    }

    Ok(config)
}
