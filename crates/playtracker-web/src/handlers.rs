use axum::Json;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect};
use chrono::Local;
use minijinja::context;
use playtracker_common::{DIFFICULTIES, Error};
use serde_json::{Value, json};
use tracing::info;

use crate::error::WebResult;
use crate::state::SharedState;
use crate::validation::PlayForm;

pub async fn home(State(state): State<SharedState>) -> WebResult<Html<String>> {
    let html = state.templates.render(
        "index.html",
        context! { title => state.config.web.site_title.as_str() },
    )?;
    Ok(Html(html))
}

pub async fn list_plays(State(state): State<SharedState>) -> WebResult<Html<String>> {
    let plays = state.plays.list_plays()?;
    let html = state
        .templates
        .render("plays.html", context! { title => "Plays", plays })?;
    Ok(Html(html))
}

pub async fn show_play(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> WebResult<Html<String>> {
    let play = state
        .plays
        .get_play(id)?
        .ok_or_else(|| Error::NotFound(format!("play {id}")))?;
    let html = state
        .templates
        .render("play.html", context! { title => "Play", play })?;
    Ok(Html(html))
}

pub async fn new_play(State(state): State<SharedState>) -> WebResult<Html<String>> {
    let scenarios = state.plays.list_scenarios()?;
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let html = state.templates.render(
        "new_play.html",
        context! {
            title => "New Play",
            scenarios,
            difficulties => DIFFICULTIES,
            today,
        },
    )?;
    Ok(Html(html))
}

pub async fn create_play(
    State(state): State<SharedState>,
    Form(form): Form<PlayForm>,
) -> WebResult<Redirect> {
    let new_play = form.validate()?;
    if !state.plays.scenario_exists(new_play.scenario_id)? {
        return Err(Error::Validation(format!("unknown scenario {}", new_play.scenario_id)).into());
    }

    let play = state.plays.create_play(&new_play)?;
    info!(id = play.id, outcome = %play.outcome, "play logged");
    Ok(Redirect::to("/plays"))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn status(State(state): State<SharedState>) -> WebResult<Json<Value>> {
    let plays = state.plays.play_count()?;
    let migrations = state.plays.applied_migrations()?;
    Ok(Json(json!({
        "status": "running",
        "plays": plays,
        "migrations_applied": migrations.len(),
    })))
}

pub async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
