use colorpass::config::db::DbKind;
use colorpass::infra::state::build_state;
use colorpass::state::app_state::AppState;
use colorpass::AppError;

/// Fresh, migrated in-memory database per call, so tests never share rooms.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state().with_db(DbKind::SqliteMemory).build().await
}

/// Migrated SQLite database in a file under `dir`, behind a multi-connection
/// pool, so transactions on it really overlap. Sets `COLORPASS_SQLITE_PATH`;
/// callers must be `#[serial]`.
pub async fn build_file_state(dir: &std::path::Path) -> Result<AppState, AppError> {
    std::env::set_var("COLORPASS_SQLITE_PATH", dir.join("colorpass.db"));
    build_state().with_db(DbKind::SqliteFile).build().await
}
