//! Transaction helpers.
//!
//! Every room action runs inside exactly one transaction: commit on `Ok`,
//! rollback on `Err`. Closures are written as
//! `|txn| Box::pin(async move { ... })` and may only capture owned data.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{AccessMode, DatabaseTransaction, IsolationLevel, TransactionTrait};
use tracing::warn;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Boxed future returned by transaction closures.
pub type TxnFuture<'t, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 't>>;

async fn run_in<R, F>(txn: DatabaseTransaction, f: F) -> Result<R, AppError>
where
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> TxnFuture<'t, R>,
{
    let out = f(&txn).await;
    match out {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}

/// Run `f` in a read-write transaction.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> TxnFuture<'t, R>,
{
    let txn = state.db().begin().await?;
    run_in(txn, f).await
}

/// Run `f` in a read-only repeatable-read transaction so a snapshot never
/// mixes rows from before and after a concurrent write.
///
/// SQLite ignores both settings; its single writer already gives readers a
/// consistent view.
pub async fn with_read_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> TxnFuture<'t, R>,
{
    let txn = state
        .db()
        .begin_with_config(
            Some(IsolationLevel::RepeatableRead),
            Some(AccessMode::ReadOnly),
        )
        .await?;
    run_in(txn, f).await
}
