use sea_orm::DatabaseConnection;

/// Application state shared by every worker.
///
/// Holds no game state; rooms live in the database only.
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
