use crate::error::CoreError;
use config::{Config as Cfg, Environment, File};
use serde::de::DeserializeOwned;

/// Load a settings struct from an optional `<file_stem>.{toml,yaml,json}`
/// file, overlaid with `<PREFIX>_*` environment variables.
///
/// Nested keys use a double underscore, e.g. `STRIPE_HTTP__TIMEOUT_SECS`.
pub fn load<T: DeserializeOwned>(file_stem: &str, env_prefix: &str) -> Result<T, CoreError> {
    dotenvy::dotenv().ok();

    let config = Cfg::builder()
        .add_source(File::with_name(file_stem).required(false))
        .add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
