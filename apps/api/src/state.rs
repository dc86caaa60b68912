use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: GeminiClient,
    pub sessions: SessionStore,
}
