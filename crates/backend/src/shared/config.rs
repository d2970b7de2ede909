use crate::shared::data::db::DatabaseTarget;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
}

/// Рабочее хранилище для одиночных команд (dedupe, seed, import-csv, ...)
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Путь к файлу SQLite (используется, если `url` не задан)
    pub path: String,
    /// URL Postgres
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ssl: bool,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Пара хранилищ для команды migrate
#[derive(Debug, Deserialize, Clone)]
pub struct MigrationConfig {
    /// Исходный файл SQLite
    #[serde(default = "default_source_path")]
    pub source_path: String,
    /// URL целевого Postgres
    #[serde(default)]
    pub destination_url: Option<String>,
    #[serde(default)]
    pub destination_ssl: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            destination_url: None,
            destination_ssl: false,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_source_path() -> String {
    "database.sqlite".into()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "database.sqlite"
max_connections = 5

[migration]
source_path = "database.sqlite"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Explicit path (`--config`)
/// 2. Next to the executable
/// 3. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");
            if config_path.exists() {
                return load_config_from(&config_path);
            }
            tracing::debug!("config.toml not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from: {}", path.display());
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config file {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Config {
    /// Применить переменные окружения поверх файла конфигурации.
    ///
    /// `var` передается снаружи, чтобы не трогать окружение процесса в тестах.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = var("DATABASE_URL").filter(|v| !v.trim().is_empty());
        let force_sqlite = var("FORCE_SQLITE").map(|v| is_truthy(&v)).unwrap_or(false);

        if force_sqlite {
            self.database.url = None;
        } else if let Some(url) = &database_url {
            self.database.url = Some(url.clone());
        }

        if let Some(url) = database_url {
            self.migration.destination_url = Some(url);
        }

        if let Some(storage) = var("DB_STORAGE").filter(|v| !v.trim().is_empty()) {
            self.database.path = storage.clone();
            self.migration.source_path = storage;
        }

        let ssl = var("DB_SSL").map(|v| is_truthy(&v)).unwrap_or(false)
            || var("NODE_ENV").as_deref() == Some("production");
        if ssl {
            self.database.ssl = true;
            self.migration.destination_ssl = true;
        }
    }

    /// Рабочее хранилище: Postgres, если задан URL, иначе файл SQLite
    pub fn database_target(&self) -> DatabaseTarget {
        match &self.database.url {
            Some(url) => DatabaseTarget::Postgres {
                url: url.clone(),
                ssl: self.database.ssl,
            },
            None => DatabaseTarget::Sqlite {
                path: resolve_path(&self.database.path),
            },
        }
    }

    pub fn migration_source(&self) -> DatabaseTarget {
        DatabaseTarget::Sqlite {
            path: resolve_path(&self.migration.source_path),
        }
    }

    pub fn migration_destination(&self) -> anyhow::Result<DatabaseTarget> {
        let url = self
            .migration
            .destination_url
            .clone()
            .context("DATABASE_URL (or migration.destination_url) is required for migrate")?;
        Ok(DatabaseTarget::Postgres {
            url,
            ssl: self.migration.destination_ssl,
        })
    }
}

/// Relative paths are resolved against the current working directory
fn resolve_path(path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|dir| dir.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn default_config() -> Config {
        toml::from_str(DEFAULT_CONFIG).unwrap()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_loads() {
        let config = default_config();
        assert_eq!(config.database.path, "database.sqlite");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.url.is_none());
        assert_eq!(config.migration.source_path, "database.sqlite");
    }

    #[test]
    fn test_missing_migration_section_uses_defaults() {
        let config: Config = toml::from_str("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(config.migration.source_path, "database.sqlite");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let mut config = default_config();
        config.apply_env(env(&[("DATABASE_URL", "postgres://u:p@h/db")]));
        assert_eq!(
            config.database_target(),
            DatabaseTarget::Postgres {
                url: "postgres://u:p@h/db".into(),
                ssl: false
            }
        );
        assert!(config.migration_destination().is_ok());
    }

    #[test]
    fn test_force_sqlite_wins_over_database_url() {
        let mut config = default_config();
        config.apply_env(env(&[
            ("DATABASE_URL", "postgres://u:p@h/db"),
            ("FORCE_SQLITE", "true"),
            ("DB_STORAGE", "/tmp/catalog.sqlite"),
        ]));
        assert_eq!(
            config.database_target(),
            DatabaseTarget::Sqlite {
                path: PathBuf::from("/tmp/catalog.sqlite")
            }
        );
        // migrate still needs the Postgres destination
        assert!(config.migration_destination().is_ok());
    }

    #[test]
    fn test_production_enables_ssl() {
        let mut config = default_config();
        config.apply_env(env(&[
            ("DATABASE_URL", "postgres://h/db"),
            ("NODE_ENV", "production"),
        ]));
        assert!(config.database.ssl);
        assert!(config.migration.destination_ssl);

        let mut config = default_config();
        config.apply_env(env(&[("DB_SSL", "false")]));
        assert!(!config.database.ssl);
    }

    #[test]
    fn test_migrate_requires_destination() {
        let config = default_config();
        assert!(config.migration_destination().is_err());
    }
}
