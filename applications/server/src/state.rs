/// Shared application state
use crate::services::AuthService;
use cantor_setlist::SetlistService;
use cantor_storage::SqliteStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteStore>,
    pub setlists: Arc<SetlistService<SqliteStore>>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<SqliteStore>, auth_service: Arc<AuthService>) -> Self {
        let setlists = Arc::new(SetlistService::new(Arc::clone(&store)));
        Self {
            store,
            setlists,
            auth_service,
        }
    }
}
