use std::sync::Arc;

use crate::llm_client::ModelGateway;
use crate::taxonomy::InterviewStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both collaborators sit behind trait objects: `PgStore` and
/// `AnthropicGateway` in production, in-memory/scripted doubles in tests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InterviewStore>,
    pub gateway: Arc<dyn ModelGateway>,
}
