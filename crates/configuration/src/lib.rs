use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, LogFormat, LogSettings, ServerSettings, Settings};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Legacy variable that overrides `database.url` when present.
pub const DB_URI_VAR: &str = "DB_URI";

/// Loads the application settings.
///
/// Sources are layered, later ones winning: built-in defaults, the optional
/// TOML file at `path`, `APP__SECTION__KEY` environment variables, and
/// finally `DB_URI`.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let db_uri = std::env::var(DB_URI_VAR).ok();
    let settings = build(path, app_environment(), db_uri)?;
    tracing::debug!(?settings, "Configuration loaded.");
    Ok(settings)
}

/// `APP__SECTION__KEY` variables, e.g. `APP__SERVER__PORT=8080`.
fn app_environment() -> config::Environment {
    config::Environment::with_prefix("APP")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn build(
    path: &Path,
    environment: config::Environment,
    db_uri: Option<String>,
) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5555)?
        .set_default("database.url", "sqlite://app.db")?
        .set_default("database.max_connections", 5)?
        .set_default("log.filter", "info,tower_http=debug")?
        .set_default("log.format", "text")?
        .add_source(config::File::from(path).required(false))
        .add_source(environment)
        .set_override_option("database.url", db_uri)?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;

    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.database.url.trim().is_empty() {
        return Err(ConfigError::ValidationError("database.url must not be empty".to_string()));
    }
    if settings.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// The `APP__*` layer fed from a fixed map instead of the process environment.
    fn env_from(vars: &[(&str, &str)]) -> config::Environment {
        let source = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        app_environment().source(Some(source))
    }

    #[test]
    fn defaults_apply_without_a_config_file() {
        let settings = build(Path::new("does-not-exist.toml"), env_from(&[]), None).unwrap();
        assert_eq!(settings.server.port, 5555);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.database.url, "sqlite://app.db");
        assert_eq!(settings.log.format, LogFormat::Text);
        assert!(settings.log.directory.is_none());
        assert_eq!(settings.server.socket_addr().unwrap().port(), 5555);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 8080\n\n[database]\nurl = \"sqlite://heroes.db\"\n\n[log]\nformat = \"json\""
        )
        .unwrap();

        let settings = build(file.path(), env_from(&[]), None).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.url, "sqlite://heroes.db");
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.log.format, LogFormat::Json);
    }

    #[test]
    fn db_uri_wins_over_everything() {
        let settings = build(
            Path::new("does-not-exist.toml"),
            env_from(&[("APP__DATABASE__URL", "sqlite://from-env.db")]),
            Some("sqlite::memory:".to_string()),
        )
        .unwrap();
        assert_eq!(settings.database.url, "sqlite::memory:");
    }

    #[test]
    fn zero_connections_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[database]\nmax_connections = 0").unwrap();
        assert!(matches!(
            build(file.path(), env_from(&[]), None),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 8080").unwrap();

        let settings = build(
            file.path(),
            env_from(&[("APP__SERVER__PORT", "9000"), ("APP__LOG__FILTER", "debug")]),
            None,
        )
        .unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.log.filter, "debug");
    }
}
