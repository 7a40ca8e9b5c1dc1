//! Home page handler.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use mb_site::render_home;

use crate::handlers::html_response;
use crate::state::AppState;

/// Handle GET /.
pub(crate) async fn home(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let html = render_home(&state.site, &state.dataset);
    html_response(&state, &headers, html)
}
