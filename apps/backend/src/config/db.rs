//! Database configuration read from the environment.

use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Which store the backend talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    /// Private in-memory SQLite, one per pool. Used by tests.
    SqliteMemory,
}

impl DbKind {
    /// Read `COLORPASS_DB_KIND`, defaulting to Postgres.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("COLORPASS_DB_KIND") {
            Ok(raw) => raw.parse(),
            Err(_) => Ok(DbKind::Postgres),
        }
    }

    pub fn engine(self) -> &'static str {
        match self {
            DbKind::Postgres => "postgresql",
            DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
        }
    }
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "Unknown database kind '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

/// Per-connection session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbSettings {
    Postgres {
        statement_timeout_ms: u64,
        lock_timeout_ms: u64,
    },
    Sqlite {
        busy_timeout_ms: u64,
    },
}

/// Pool sizing and per-connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_ms: u64,
    pub db_settings: DbSettings,
}

impl ConnectionSettings {
    pub fn from_env(kind: DbKind) -> Result<Self, AppError> {
        let acquire_timeout_ms = env_u64("COLORPASS_DB_ACQUIRE_TIMEOUT_MS", 5_000)?;
        let db_settings = match kind {
            DbKind::Postgres => DbSettings::Postgres {
                statement_timeout_ms: env_u64("COLORPASS_DB_STATEMENT_TIMEOUT_MS", 5_000)?,
                lock_timeout_ms: env_u64("COLORPASS_DB_LOCK_TIMEOUT_MS", 2_000)?,
            },
            DbKind::SqliteFile | DbKind::SqliteMemory => DbSettings::Sqlite {
                busy_timeout_ms: env_u64("COLORPASS_SQLITE_BUSY_TIMEOUT_MS", 5_000)?,
            },
        };

        // Every connection to :memory: is a separate database, so pin the pool to one.
        let (min_connections, max_connections) = match kind {
            DbKind::SqliteMemory => (1, 1),
            _ => {
                let max = env_u64("COLORPASS_DB_MAX_CONNECTIONS", 10)?;
                let max = u32::try_from(max).map_err(|_| {
                    AppError::config("COLORPASS_DB_MAX_CONNECTIONS is out of range")
                })?;
                if max == 0 {
                    return Err(AppError::config(
                        "COLORPASS_DB_MAX_CONNECTIONS must be at least 1",
                    ));
                }
                (1, max)
            }
        };

        Ok(Self {
            max_connections,
            min_connections,
            acquire_timeout_ms,
            db_settings,
        })
    }
}

/// Builds a database URL from environment variables.
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = must_var("POSTGRES_DB")?;
            let username = must_var("POSTGRES_USER")?;
            let password = must_var("POSTGRES_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path = must_var("COLORPASS_SQLITE_PATH")?;
            Ok(format!("sqlite://{path}"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// URL with the password masked, for logs.
pub fn sanitize_db_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let creds = &url[scheme_end + 3..at];
            match creds.find(':') {
                Some(colon) => format!(
                    "{}{}:***{}",
                    &url[..scheme_end + 3],
                    &creds[..colon],
                    &url[at..]
                ),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}

fn env_u64(name: &str, default: u64) -> Result<u64, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AppError::config(format!("Environment variable '{name}' must be a number, got '{raw}'"))
        }),
        Err(_) => Ok(default),
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
