use std::sync::Arc;

use playtracker_config::AppConfig;
use playtracker_db::PlayStore;

use crate::templates::Templates;

/// Shared application state accessible from all request handlers.
pub struct AppState {
    pub config: AppConfig,
    pub plays: PlayStore,
    pub templates: Templates,
}

impl AppState {
    pub fn new(config: AppConfig, plays: PlayStore, templates: Templates) -> Self {
        Self {
            config,
            plays,
            templates,
        }
    }
}

pub type SharedState = Arc<AppState>;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use playtracker_config::AppConfig;
    use playtracker_db::{PlayStore, open_in_memory, run_migrations};

    use super::{AppState, SharedState};
    use crate::templates::Templates;

    const ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../..");

    /// State over a freshly migrated in-memory database and the repository's
    /// own templates and static files.
    pub(crate) fn state() -> SharedState {
        let mut config = AppConfig::default();
        config.database.migrations_dir = format!("{ROOT}/migrations").into();
        config.web.templates_dir = format!("{ROOT}/templates").into();
        config.web.static_dir = format!("{ROOT}/static").into();

        let conn = open_in_memory().unwrap();
        run_migrations(&conn, &config.database.migrations_dir).unwrap();
        let templates = Templates::load(&config.web.templates_dir, &config.web.site_title).unwrap();
        Arc::new(AppState::new(config, PlayStore::new(conn), templates))
    }
}
