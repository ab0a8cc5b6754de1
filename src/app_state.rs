use std::sync::Arc;

use crate::{config::Config, fetcher::render::PageRenderer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// When set, pages are acquired through a rendering collaborator instead
    /// of a direct fetch.
    pub renderer: Option<Arc<dyn PageRenderer>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            renderer: None,
        }
    }

    pub fn with_renderer(config: Config, renderer: Arc<dyn PageRenderer>) -> Self {
        Self {
            config,
            renderer: Some(renderer),
        }
    }
}
