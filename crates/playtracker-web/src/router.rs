use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error_page::render_error_pages;
use crate::handlers;
use crate::state::SharedState;

/// Build the application router: HTML pages, the JSON status API, static
/// files, and the error-page layer over all of them.
pub fn build_router(state: SharedState) -> Router {
    let static_files = ServeDir::new(&state.config.web.static_dir);

    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/plays",
            get(handlers::list_plays).post(handlers::create_play),
        )
        .route("/plays/new", get(handlers::new_play))
        .route("/plays/{id}", get(handlers::show_play))
        .route("/health", get(handlers::health))
        .route("/api/status", get(handlers::status))
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            render_error_pages,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
