//! Disease page handlers (`/enfermedades` routes).

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use mb_directory::PageIntent;
use mb_site::{DiseasePageData, articles, find_article, render_disease_page, render_diseases_index};
use mb_store::DoctorQuery;

use crate::error::ServerError;
use crate::handlers::{ListingParams, PER_PAGE, find_doctors, html_response, listing, not_found};
use crate::state::AppState;

/// Handle GET /enfermedades (diseases index).
pub(crate) async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let html = render_diseases_index(&state.site, &state.dataset, articles());
    html_response(&state, &headers, html)
}

/// Handle GET /enfermedades/{enfermedad}.
///
/// Resolution is pure; the existence predicate it needs (an article or at
/// least one store record) runs here, off the async runtime. A store failure
/// during the check surfaces as an error rather than a 404, so outages don't
/// masquerade as missing pages.
pub(crate) async fn disease(
    Path(enfermedad): Path<String>,
    Query(params): Query<ListingParams>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let page = params.page();

    let dataset = Arc::clone(&state.dataset);
    let store = Arc::clone(&state.store);
    let slug = enfermedad.clone();
    let (intent, check_failure) = tokio::task::spawn_blocking(move || {
        let article_exists = find_article(&slug).is_some();
        let mut check_failure = None;
        let intent = dataset.resolve_disease(&slug, |name| {
            if article_exists {
                return true;
            }
            match store.count(&DoctorQuery::new().disease(name)) {
                Ok(total) => total > 0,
                Err(err) => {
                    check_failure = Some(err);
                    false
                }
            }
        });
        (intent, check_failure)
    })
    .await?;

    match intent {
        PageIntent::Disease { disease_name } => {
            let query = DoctorQuery::new()
                .disease(disease_name.clone())
                .page(page)
                .per_page(PER_PAGE);
            let doctors = find_doctors(Arc::clone(&state.store), query).await?;

            let data = DiseasePageData {
                article: find_article(&enfermedad),
                listing: listing(doctors, page, format!("/enfermedades/{enfermedad}")),
                disease_name,
            };
            let html = render_disease_page(&state.site, &data);
            Ok(html_response(&state, &headers, html))
        }
        _ => {
            if let Some(err) = check_failure {
                return Err(err.into());
            }
            Ok(not_found(&state))
        }
    }
}
