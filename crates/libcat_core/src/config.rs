//! Startup configuration for storage and logging.
//!
//! # Responsibility
//! - Resolve the database location and logging settings before any work runs.
//! - Layer defaults, an optional JSON file, and environment overrides.
//!
//! # Invariants
//! - Precedence is defaults < config file < environment.
//! - Loading never mutates the process environment.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Path of an optional JSON config file.
pub const CONFIG_FILE_ENV: &str = "LIBCAT_CONFIG";
pub const DB_PATH_ENV: &str = "LIBCAT_DB_PATH";
pub const BUSY_TIMEOUT_ENV: &str = "LIBCAT_BUSY_TIMEOUT_MS";
pub const LOG_LEVEL_ENV: &str = "LIBCAT_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "LIBCAT_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "libcat.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "libcat-logs";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);
/// SQLite takes the busy timeout as an `i32` millisecond count.
pub const MAX_BUSY_TIMEOUT_MS: u64 = i32::MAX as u64;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidValue {
        key: String,
        value: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config file `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config file `{}`: {source}", path.display())
            }
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for `{key}`")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Read-only view of environment variables.
///
/// Lets tests feed values without touching the real process environment.
pub trait ConfigEnv {
    fn string(&self, name: &str) -> Option<String>;
}

/// Environment access backed by the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigEnv for ProcessEnv {
    fn string(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Connection parameters for the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub path: PathBuf,
    pub busy_timeout: Duration,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db: DbConfig,
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    db: FileDbSection,
    log: FileLogSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileDbSection {
    path: Option<PathBuf>,
    busy_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileLogSection {
    level: Option<String>,
    dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let temp_dir = std::env::temp_dir();
        Self {
            db: DbConfig::new(temp_dir.join(DEFAULT_DB_FILE_NAME)),
            log: LogConfig {
                level: crate::logging::default_log_level().to_string(),
                dir: temp_dir.join(DEFAULT_LOG_DIR_NAME),
            },
        }
    }
}

impl AppConfig {
    /// Loads configuration from the real process environment.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&ProcessEnv)
    }

    /// Loads configuration using `env` for every variable lookup.
    ///
    /// # Errors
    /// - Returns `Io`/`Parse` when the file named by `LIBCAT_CONFIG` is
    ///   unreadable or malformed.
    /// - Returns `InvalidValue` for empty paths, non-numeric timeouts, or
    ///   timeouts above `MAX_BUSY_TIMEOUT_MS`.
    pub fn load_from(env: &impl ConfigEnv) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = non_empty(env, CONFIG_FILE_ENV) {
            config.merge_file(Path::new(&path))?;
        }

        if let Some(path) = non_empty(env, DB_PATH_ENV) {
            config.db.path = PathBuf::from(path);
        }
        if let Some(raw) = non_empty(env, BUSY_TIMEOUT_ENV) {
            let millis = raw
                .parse::<u64>()
                .map_err(|_| invalid(BUSY_TIMEOUT_ENV, &raw))?;
            config.db.busy_timeout = busy_timeout(BUSY_TIMEOUT_ENV, millis)?;
        }
        if let Some(level) = non_empty(env, LOG_LEVEL_ENV) {
            config.log.level = level;
        }
        if let Some(dir) = non_empty(env, LOG_DIR_ENV) {
            config.log.dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> ConfigResult<()> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(db_path) = file.db.path {
            if db_path.as_os_str().is_empty() {
                return Err(invalid("db.path", ""));
            }
            self.db.path = db_path;
        }
        if let Some(millis) = file.db.busy_timeout_ms {
            self.db.busy_timeout = busy_timeout("db.busy_timeout_ms", millis)?;
        }
        if let Some(level) = file.log.level {
            self.log.level = level;
        }
        if let Some(dir) = file.log.dir {
            self.log.dir = dir;
        }
        Ok(())
    }
}

fn non_empty(env: &impl ConfigEnv, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn busy_timeout(key: &str, millis: u64) -> ConfigResult<Duration> {
    if millis > MAX_BUSY_TIMEOUT_MS {
        return Err(invalid(key, &millis.to_string()));
    }
    Ok(Duration::from_millis(millis))
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppConfig, ConfigEnv, ConfigError, BUSY_TIMEOUT_ENV, CONFIG_FILE_ENV, DB_PATH_ENV,
        LOG_LEVEL_ENV, MAX_BUSY_TIMEOUT_MS,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    #[derive(Default)]
    struct MapEnv(HashMap<&'static str, String>);

    impl MapEnv {
        fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
            self.0.insert(name, value.into());
            self
        }
    }

    impl ConfigEnv for MapEnv {
        fn string(&self, name: &str) -> Option<String> {
            self.0.get(name).cloned()
        }
    }

    #[test]
    fn defaults_live_under_temp_dir() {
        let config = AppConfig::load_from(&MapEnv::default()).unwrap();
        assert!(config.db.path.starts_with(std::env::temp_dir()));
        assert!(config.log.dir.is_absolute());
        assert_eq!(config.db.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let env = MapEnv::default().with(DB_PATH_ENV, "   ");
        let config = AppConfig::load_from(&env).unwrap();
        assert_eq!(config.db.path, AppConfig::default().db.path);
    }

    #[test]
    fn environment_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("libcat.json");
        std::fs::write(
            &file,
            r#"{
                "db": { "path": "/srv/from-file.sqlite3", "busy_timeout_ms": 250 },
                "log": { "level": "warn" }
            }"#,
        )
        .unwrap();

        let env = MapEnv::default()
            .with(CONFIG_FILE_ENV, file.to_string_lossy())
            .with(LOG_LEVEL_ENV, "debug");
        let config = AppConfig::load_from(&env).unwrap();

        assert_eq!(config.db.path, PathBuf::from("/srv/from-file.sqlite3"));
        assert_eq!(config.db.busy_timeout, Duration::from_millis(250));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("libcat.json");
        std::fs::write(&file, r#"{ "db": { "host": "localhost" } }"#).unwrap();

        let env = MapEnv::default().with(CONFIG_FILE_ENV, file.to_string_lossy());
        let err = AppConfig::load_from(&env).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");

        let env = MapEnv::default().with(CONFIG_FILE_ENV, missing.to_string_lossy());
        let err = AppConfig::load_from(&env).unwrap_err();
        assert!(matches!(err, ConfigError::Io { path, .. } if path == missing));
    }

    #[test]
    fn non_numeric_busy_timeout_is_rejected() {
        let env = MapEnv::default().with(BUSY_TIMEOUT_ENV, "soon");
        let err = AppConfig::load_from(&env).unwrap_err();
        assert_eq!(err.to_string(), "invalid value `soon` for `LIBCAT_BUSY_TIMEOUT_MS`");
    }

    #[test]
    fn busy_timeout_from_environment_must_fit_sqlite_range() {
        let at_limit = MapEnv::default().with(BUSY_TIMEOUT_ENV, MAX_BUSY_TIMEOUT_MS.to_string());
        let config = AppConfig::load_from(&at_limit).unwrap();
        assert_eq!(
            config.db.busy_timeout,
            Duration::from_millis(MAX_BUSY_TIMEOUT_MS)
        );

        let too_big = MapEnv::default().with(BUSY_TIMEOUT_ENV, "3000000000");
        let err = AppConfig::load_from(&too_big).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key, value }
                if key == BUSY_TIMEOUT_ENV && value == "3000000000"
        ));
    }

    #[test]
    fn busy_timeout_from_file_must_fit_sqlite_range() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("libcat.json");
        std::fs::write(&file, r#"{ "db": { "busy_timeout_ms": 3000000000 } }"#).unwrap();

        let env = MapEnv::default().with(CONFIG_FILE_ENV, file.to_string_lossy());
        let err = AppConfig::load_from(&env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key, .. } if key == "db.busy_timeout_ms"
        ));
    }
}
