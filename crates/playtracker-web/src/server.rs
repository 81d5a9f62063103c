use std::sync::Arc;

use playtracker_common::{Error, Result};
use playtracker_config::AppConfig;
use playtracker_db::{PlayStore, open_database, run_migrations};
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;
use crate::templates::Templates;

/// Binds to the configured address and serves the tracker pages.
pub struct WebServer {
    config: AppConfig,
}

impl WebServer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Open and migrate the database, then serve until the listener fails.
    /// A migration failure aborts startup before anything is bound.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let state = Arc::new(self.init_state()?);
        let app = build_router(state);

        let listener = TcpListener::bind(&addr).await?;
        info!("playtracker listening on http://{}", addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| Error::Web(format!("server error: {e}")))?;

        Ok(())
    }

    fn init_state(self) -> Result<AppState> {
        let db = &self.config.database;
        let conn = open_database(&db.path)?;

        let report = run_migrations(&conn, &db.migrations_dir)?;
        info!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "database migrations complete"
        );

        let templates = Templates::load(&self.config.web.templates_dir, &self.config.web.site_title)?;
        Ok(AppState::new(self.config, PlayStore::new(conn), templates))
    }
}
