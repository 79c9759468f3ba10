use std::sync::Arc;
use std::time::Instant;

use showroom_core::ImageLocator;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub locator: Arc<dyn ImageLocator>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(locator: Arc<dyn ImageLocator>) -> Self {
        Self {
            locator,
            started_at: Instant::now(),
        }
    }
}
