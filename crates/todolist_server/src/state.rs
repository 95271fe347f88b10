//! Shared request state.

use crate::error::AppError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use todolist_core::{ListService, SqliteListStore, StoreResult};

/// Handle to the single store connection shared by all requests.
///
/// Store calls run on the blocking pool so a slow query suspends only the
/// request that issued it.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps an opened, migrated connection (see `todolist_core::db`).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one list use-case against the store.
    pub async fn with_service<T, F>(&self, op: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(&ListService<SqliteListStore<'c>>) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| AppError::Internal("store connection lock poisoned".to_string()))?;
            let service = ListService::new(SqliteListStore::new(&guard));
            op(&service).map_err(AppError::from)
        })
        .await?
    }
}
