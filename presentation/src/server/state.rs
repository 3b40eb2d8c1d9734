//! Shared server state

use super::csrf::CsrfTokens;
use fusion_application::RunFusionUseCase;
use std::sync::Arc;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub fusion: Arc<RunFusionUseCase>,
    pub api_key: Option<Arc<str>>,
    pub csrf: CsrfTokens,
}

impl AppState {
    pub fn new(fusion: Arc<RunFusionUseCase>, csrf: CsrfTokens) -> Self {
        Self {
            fusion,
            api_key: None,
            csrf,
        }
    }

    /// Set the expected `code-x-key`; blank keys count as unset
    pub fn with_api_key(mut self, api_key: Option<&str>) -> Self {
        self.api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .map(Arc::from);
        self
    }
}
