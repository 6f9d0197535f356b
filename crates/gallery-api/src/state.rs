use std::sync::Arc;

use tracing::error;

use gallery_db::{Database, StoreResult};

use crate::error::AppError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Username every write is attributed to.
    pub attribution: String,
}

impl AppStateInner {
    pub fn new(db: Database, attribution: impl Into<String>) -> AppState {
        Arc::new(Self {
            db,
            attribution: attribution.into(),
        })
    }
}

/// Run blocking store work off the async runtime.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, AppError>
where
    F: FnOnce(&AppStateInner) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            AppError::Join
        })?
        .map_err(AppError::from)
}
