// src/config/mod.rs
mod models;

pub use models::*;

use config::{Environment, Map};

/// Prefix for environment overrides, e.g. `HEALTHCHECK_REQUEST_TIMEOUT_MS`.
pub const ENV_PREFIX: &str = "HEALTHCHECK";

/// Build the configuration from the process environment and the probe
/// commands (every argument after the program name).
pub fn load_config<I>(args: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    load_config_from(None, args)
}

/// Same as [`load_config`], but reads overrides from `env` instead of the
/// process environment when it is `Some`.
pub fn load_config_from<I>(
    env: Option<Map<String, String>>,
    args: I,
) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let raw = config::Config::builder()
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    let settings: Settings = raw.try_deserialize()?;
    let config = Config::new(settings, args.into_iter().collect());
    config.validate()?;
    Ok(config)
}
