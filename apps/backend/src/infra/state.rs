use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_kind: Option<DbKind>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self { db_kind: None }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    /// Connect and migrate. Without an explicit kind, `COLORPASS_DB_KIND` decides.
    pub async fn build(self) -> Result<AppState, AppError> {
        let kind = match self.db_kind {
            Some(kind) => kind,
            None => DbKind::from_env()?,
        };
        // single entrypoint: build + migrate
        let conn = bootstrap_db(kind).await?;
        Ok(AppState::new(conn))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
