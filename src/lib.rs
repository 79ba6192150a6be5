pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod store;
pub mod telemetry;
pub mod validator;

use std::sync::Arc;
use fetcher::Fetcher;
use store::RecordStore;

/// Dependencies shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub fetcher: Fetcher,
}
