use std::sync::Arc;

use contextor::ChatService;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chat pipeline over the prebuilt FAQ index.
    pub chat: Arc<ChatService>,
    /// Include error chains in 5xx bodies.
    pub expose_error_details: bool,
}

impl AppState {
    pub fn new(chat: ChatService, expose_error_details: bool) -> Self {
        Self {
            chat: Arc::new(chat),
            expose_error_details,
        }
    }
}
