//! Settings for the application.
//!
//! Values are read from an optional `settings.toml` and then overridden by
//! `FINPAL_*` environment variables, with `__` between nested keys (for
//! example `FINPAL_SERVER__PORT=9000` or `FINPAL_AUTH__SECRET=...`).
//!
//! See `settings.toml` at the repository root for every key.
use config::{Config, ConfigError, Environment, File};
use engine::{BudgetRules, RemoteAnalyzerConfig};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 8000,
            database: Database::Sqlite("finpal.db".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Auth {
    pub secret: String,
    pub token_ttl_minutes: u64,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            secret: server::DEFAULT_SECRET.to_string(),
            token_ttl_minutes: 30,
        }
    }
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Analysis {
    pub mode: AnalysisMode,
    pub rules: BudgetRules,
    pub remote: RemoteAnalyzerConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub auth: Auth,
    pub analysis: Analysis,
}

impl Settings {
    /// Load `path` (extension optional, file optional) and apply the
    /// environment on top.
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("FINPAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(raw: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_gives_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.auth.secret, server::DEFAULT_SECRET);
        assert_eq!(settings.auth.token_ttl_minutes, 30);
        assert_eq!(settings.analysis.mode, AnalysisMode::Local);
        assert_eq!(settings.analysis.rules.savings_ratio, 0.2);
        assert_eq!(settings.analysis.remote.timeout_secs, 30);
    }

    #[test]
    fn sections_override_defaults() {
        let settings = from_toml(
            r#"
            [server]
            port = 9000
            database = "memory"

            [auth]
            secret = "s3cret"

            [analysis]
            mode = "remote"

            [analysis.rules]
            housing_ceiling = 30.0

            [analysis.remote]
            model = "gpt-4o-mini"
            api_key = "sk-test"
            "#,
        );
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.database, Database::Memory);
        assert_eq!(settings.auth.secret, "s3cret");
        assert_eq!(settings.analysis.mode, AnalysisMode::Remote);
        assert_eq!(settings.analysis.rules.housing_ceiling, 30.0);
        assert_eq!(settings.analysis.rules.food_ceiling, 15.0);
        assert_eq!(settings.analysis.remote.model, "gpt-4o-mini");
        assert_eq!(settings.analysis.remote.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn sqlite_path_is_read() {
        let settings = from_toml(
            r#"
            [server.database]
            sqlite = "/var/lib/finpal/finpal.db"
            "#,
        );
        assert_eq!(
            settings.server.database,
            Database::Sqlite("/var/lib/finpal/finpal.db".to_string())
        );
    }
}
