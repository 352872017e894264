use bootcfg_domain::config::AppConfig;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Environment prefix for overrides (`BOOTCFG__LOGGING__LEVEL=debug`).
pub const ENV_PREFIX: &str = "BOOTCFG";
const ENV_SEPARATOR: &str = "__";

/// Custom error type for config loading.
#[bootcfg_derive::bootcfg_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration structure from a file layered with environment overrides.
///
/// Layers, lowest precedence first:
/// 1. **Defaults**: whatever `T`'s `#[serde(default)]` attributes provide.
/// 2. **File**: `path`, if given. The format follows the extension (`.toml`, `.json`, `.yaml`).
///    A given path must exist.
/// 3. **Environment**: variables prefixed with `BOOTCFG__`. Nested keys use double underscores,
///    so `BOOTCFG__CATALOG__PATH` maps to `catalog.path`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or malformed, or if the merged values
/// do not deserialize into `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path: Option<&Path> = path.as_ref().map(|p| p.as_ref());
    load_layered(path, environment())
}

/// Loads the application config ([`AppConfig`]) with the layering of [`load_config`].
///
/// # Errors
/// See [`load_config`].
pub fn load_app_config(path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    load_config(path)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR).convert_case(config::Case::Snake)
}

fn load_layered<T>(path: Option<&Path>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = path {
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    } else {
        debug!("No config file given, using defaults and environment overrides");
    }

    let config = builder
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        environment().source(Some(map))
    }

    #[test]
    fn defaults_apply_without_file() -> Result<(), ConfigError> {
        let cfg: AppConfig = load_layered(None, env_from(&[]))?;
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.catalog.path.is_none());
        Ok(())
    }

    #[test]
    fn file_values_are_loaded() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bootcfg.toml");
        fs::write(&path, "[logging]\nlevel = \"debug\"\n\n[catalog]\npath = \"usb.toml\"\n")?;

        let cfg: AppConfig = load_layered(Some(path.as_path()), env_from(&[]))?;
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.catalog.path, Some(PathBuf::from("usb.toml")));
        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bootcfg.toml");
        fs::write(&path, "[logging]\nlevel = \"debug\"\n")?;

        let cfg: AppConfig =
            load_layered(Some(path.as_path()), env_from(&[("BOOTCFG__LOGGING__LEVEL", "warn")]))?;
        assert_eq!(cfg.logging.level, "warn");
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let result: Result<AppConfig, _> =
            load_layered(Some(Path::new("/nonexistent/bootcfg.toml")), env_from(&[]));
        assert!(matches!(result, Err(ConfigError::Config { context: Some(_), .. })));
    }
}
