//! Shared application state handed to every handler.

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::auth::JwtAuth;
use crate::error::ApiError;
use crate::memory::StoreResult;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub auth: Arc<JwtAuth>,
}

impl AppState {
    pub fn new(conn: Connection, auth: JwtAuth) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            auth: Arc::new(auth),
        }
    }

    /// Run one store call on the blocking pool. The connection lock is held
    /// only for the duration of `f`.
    pub async fn with_db<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|e| ApiError::Internal(format!("db lock poisoned: {e}")))?;
            f(&conn).map_err(ApiError::from)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("db task failed: {e}")))?
    }
}
