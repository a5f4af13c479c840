use std::sync::Arc;

use sagashelf_sgdb::SgdbClient;
use sagashelf_store::RecordStoreClient;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the config is behind `Arc` and both clients share a
/// pooled `reqwest::Client`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub sgdb: SgdbClient,
    /// `None` when `RECORD_STORE_URL` is unset.
    pub store: Option<RecordStoreClient>,
}

impl AppState {
    pub fn store(&self) -> AppResult<&RecordStoreClient> {
        self.store
            .as_ref()
            .ok_or_else(|| AppError::Unavailable("Record store is not configured".into()))
    }
}
