//! Layered configuration: defaults, then an optional TOML file, then
//! `ONLINE_WALLET__SECTION__KEY` environment variables.

use std::path::Path;

use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "online-wallet";

/// Prefix of environment overrides, e.g. `ONLINE_WALLET__SERVER__PORT`.
pub const ENV_PREFIX: &str = "ONLINE_WALLET";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite database file.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Settings {
    /// Load settings. An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`Settings::load`], but reads the environment layer from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("database.path", "wallet.db")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("log.level", "info")?
            .set_default("log.json", false)?;

        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.database.path, "wallet.db");
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.log.level, "info");
        assert!(!settings.log.json);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[database]
path = "/tmp/custom.db"

[server]
port = 9090
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.database.path, "/tmp/custom.db");
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/online-wallet.toml")));
        assert!(result.is_err());
    }

    fn env(vars: &[(&str, &str)]) -> Map<String, String> {
        vars.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides_defaults() {
        let settings = Settings::load_with_env(
            None,
            Some(env(&[
                ("ONLINE_WALLET__SERVER__PORT", "9999"),
                ("ONLINE_WALLET__LOG__JSON", "true"),
            ])),
        )
        .unwrap();

        assert_eq!(settings.server.port, 9999);
        assert!(settings.log.json);
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[database]
path = "/tmp/from-file.db"

[server]
port = 9090
"#
        )
        .unwrap();

        let settings = Settings::load_with_env(
            Some(file.path()),
            Some(env(&[("ONLINE_WALLET__SERVER__PORT", "7070")])),
        )
        .unwrap();

        assert_eq!(settings.server.port, 7070);
        assert_eq!(settings.database.path, "/tmp/from-file.db");
    }

    #[test]
    fn test_unprefixed_env_is_ignored() {
        let settings =
            Settings::load_with_env(None, Some(env(&[("SERVER__PORT", "1234")]))).unwrap();
        assert_eq!(settings.server.port, 8080);
    }
}
