use std::sync::Arc;

use crate::auth::TelegramVerifier;
use crate::store::ResourceStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TelegramVerifier>,
    pub store: Arc<dyn ResourceStore>,
}

impl AppState {
    pub fn new(verifier: TelegramVerifier, store: Arc<dyn ResourceStore>) -> Self {
        Self {
            verifier: Arc::new(verifier),
            store,
        }
    }
}
