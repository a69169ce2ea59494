use std::sync::Arc;

use crate::config::Config;
use crate::extraction::blueprint::SkillBlueprint;
use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. The API key lives in `config` and is threaded explicitly into
/// each call; no handler reads ambient storage.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
    pub config: Config,
    /// Curated skill/role registry, loaded once at startup.
    pub blueprint: Arc<SkillBlueprint>,
}
