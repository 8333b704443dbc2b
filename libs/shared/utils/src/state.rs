use std::sync::Arc;

use shared_config::AppConfig;
use shared_database::Database;

use crate::clock::{Clock, SystemClock};

/// Router state shared by every cell.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: Arc<Database>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            db: Arc::new(Database::new()),
            clock,
        }
    }
}
