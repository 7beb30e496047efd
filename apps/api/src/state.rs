use std::sync::Arc;

use crate::config::Config;
use crate::templates::TemplateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup, read-only afterwards.
    pub store: Arc<TemplateStore>,
    pub config: Config,
}
