use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use minijinja::context;
use tracing::error;

use crate::state::SharedState;

/// Title and message shown to the user for an error status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPage {
    pub title: &'static str,
    pub message: &'static str,
}

impl ErrorPage {
    pub fn for_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self {
                title: "Page Not Found",
                message: "The page you're looking for doesn't exist.",
            },
            StatusCode::INTERNAL_SERVER_ERROR => Self {
                title: "Internal Server Error",
                message: "Something went wrong on our end.",
            },
            _ => Self {
                title: "An Unexpected Error Occurred",
                message: "We've encountered an error and our team has been notified.",
            },
        }
    }
}

/// Replace the body of every 4xx/5xx response with the rendered error page,
/// keeping the status and other headers.
pub async fn render_error_pages(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let page = ErrorPage::for_status(status);
    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_LENGTH);

    let ctx = context! {
        title => page.title,
        message => page.message,
        code => status.as_u16(),
    };
    let (body, content_type) = match state.templates.render("error.html", ctx) {
        Ok(html) => (html, "text/html; charset=utf-8"),
        Err(e) => {
            error!("failed to render error page for {status}: {e}");
            (page.title.to_string(), "text/plain; charset=utf-8")
        }
    };
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    Response::from_parts(parts, Body::from(body))
}
