use std::sync::Arc;
use nt_scrappers::ScraperManager;

pub struct AppState {
    pub manager: Arc<ScraperManager>,
}

impl AppState {
    pub fn new(manager: ScraperManager) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }
}
