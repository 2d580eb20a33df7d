//! Shared router state

use std::sync::Arc;

use crate::api::ErrorTranslator;
use crate::gateway::Gateway;

/// State shared by every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub translator: ErrorTranslator,
    api_token: Arc<str>,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>, api_token: &str, translator: ErrorTranslator) -> Self {
        Self {
            gateway,
            translator,
            api_token: Arc::from(api_token),
        }
    }

    /// The configured shared secret
    pub fn api_token(&self) -> &str {
        &self.api_token
    }
}
