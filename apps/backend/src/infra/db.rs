//! Database connection bootstrap.

use std::str::FromStr;
use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand};
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, trace};

use crate::config::db::{db_url, sanitize_db_url, ConnectionSettings, DbKind, DbSettings};
use crate::error::AppError;

/// Ordered session statements run on every new pooled connection.
fn build_session_statements(settings: &DbSettings) -> Vec<String> {
    match settings {
        DbSettings::Sqlite { busy_timeout_ms } => vec![
            "PRAGMA foreign_keys = ON;".to_string(),
            format!("PRAGMA busy_timeout = {busy_timeout_ms};"),
        ],
        DbSettings::Postgres {
            statement_timeout_ms,
            lock_timeout_ms,
        } => vec![
            "SET application_name = 'colorpass';".to_string(),
            "SET timezone = 'UTC';".to_string(),
            format!("SET statement_timeout = {statement_timeout_ms};"),
            format!("SET lock_timeout = {lock_timeout_ms};"),
        ],
    }
}

/// Open a pool for `kind`. Does NOT run migrations.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    let settings = ConnectionSettings::from_env(kind)?;
    let statements = build_session_statements(&settings.db_settings);
    let started = Instant::now();

    let conn = match kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?
                .create_if_missing(true);

            let mut pool_opts = SqlitePoolOptions::new()
                .min_connections(settings.min_connections)
                .max_connections(settings.max_connections)
                .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms));
            if kind == DbKind::SqliteMemory {
                // Dropping the only connection would drop the database with it.
                pool_opts = pool_opts.idle_timeout(None).max_lifetime(None);
            }

            let pool = pool_opts
                .after_connect(move |conn, _meta| {
                    let statements = statements.clone();
                    Box::pin(async move {
                        for stmt in &statements {
                            sqlx::query(stmt).execute(&mut *conn).await?;
                        }
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| AppError::config(format!("failed to create SQLite pool: {e}")))?;
            SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)
        }
        DbKind::Postgres => {
            let connect_opts = PgConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid Postgres connection options: {e}")))?;

            let pool = PgPoolOptions::new()
                .min_connections(settings.min_connections)
                .max_connections(settings.max_connections)
                .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
                .idle_timeout(Duration::from_secs(30))
                .after_connect(move |conn, _meta| {
                    let statements = statements.clone();
                    Box::pin(async move {
                        for stmt in &statements {
                            sqlx::query(stmt).execute(&mut *conn).await?;
                        }
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| AppError::db_unavailable(format!("failed to connect to Postgres: {e}")))?;
            SqlxPostgresConnector::from_sqlx_postgres_pool(pool)
        }
    };

    info!(
        engine = kind.engine(),
        url = %sanitize_db_url(&url),
        max_connections = settings.max_connections,
        acquire_timeout_ms = settings.acquire_timeout_ms,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Database pool ready"
    );
    Ok(conn)
}

/// Connect and bring the schema up to date. Single entrypoint for the
/// server and tests.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("failed to apply migrations: {e}")))?;
    Ok(conn)
}
