//! HTTP request handlers.

pub(crate) mod diseases;
pub(crate) mod health;
pub(crate) mod home;
pub(crate) mod listings;
pub(crate) mod search;

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use md5::{Digest, Md5};
use mb_site::{ListingData, Pagination, render_not_found};
use mb_store::{DirectoryStore, DoctorPage, DoctorQuery};
use serde::Deserialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Listing page size.
pub(crate) const PER_PAGE: u64 = 20;

/// Query parameters for paginated listings.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingParams {
    /// Raw `?pagina=` value; anything unparseable falls back to page 1.
    pagina: Option<String>,
}

impl ListingParams {
    /// 1-based page selected by the request.
    pub(crate) fn page(&self) -> u64 {
        self.pagina
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(1)
    }
}

/// Render a 404 response with the site's not-found page.
pub(crate) fn not_found(state: &AppState) -> Response {
    (StatusCode::NOT_FOUND, Html(render_not_found(&state.site))).into_response()
}

/// Fallback handler for paths outside every route.
pub(crate) async fn not_found_fallback(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Response {
    not_found(&state)
}

/// Build an HTML response with ETag and conditional-request handling.
pub(crate) fn html_response(state: &AppState, headers: &HeaderMap, html: String) -> Response {
    let etag = compute_etag(&state.version, &html);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    (
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "public, max-age=60".to_string()),
        ],
        Html(html),
    )
        .into_response()
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars) - sufficient for
/// cache invalidation with negligible collision probability.
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

/// Run a find query off the async runtime (the store client is blocking).
pub(crate) async fn find_doctors(
    store: Arc<dyn DirectoryStore>,
    query: DoctorQuery,
) -> Result<DoctorPage, ServerError> {
    Ok(tokio::task::spawn_blocking(move || store.find(&query)).await??)
}

/// Assemble listing data from a query result.
pub(crate) fn listing(page: DoctorPage, current_page: u64, base_path: String) -> ListingData {
    ListingData {
        pagination: Pagination::build(current_page, PER_PAGE, page.total),
        doctors: page.doctors,
        base_path,
    }
}
