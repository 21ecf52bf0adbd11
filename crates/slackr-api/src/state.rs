use std::sync::Arc;

use slackr_db::Database;

use crate::config::Config;

pub type AppState = Arc<AppStateInner>;

/// One workspace: its data and the limits it enforces. Constructed by the
/// process entry point and handed to every service call.
pub struct AppStateInner {
    pub db: Database,
    pub config: Config,
}

impl AppStateInner {
    pub fn new(config: Config) -> AppState {
        Arc::new(Self {
            db: Database::new(),
            config,
        })
    }
}

/// Current time in epoch seconds.
pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
