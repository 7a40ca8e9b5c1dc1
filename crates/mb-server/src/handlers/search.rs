//! Search handlers: the results page and the JSON autocomplete endpoint.
//!
//! Both run the same doctor-name query, so search works identically with
//! and without client scripting. Suggestions additionally match the
//! reference dataset (cities, specialties, diseases) accent-insensitively.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use mb_directory::{DOCTORS_PREFIX, fold, slugify};
use mb_site::{SearchPageData, render_search_page};
use mb_store::DoctorQuery;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::handlers::{ListingParams, PER_PAGE, find_doctors, html_response, listing};
use crate::state::AppState;

/// Maximum suggestions returned by the autocomplete endpoint.
const SUGGESTION_LIMIT: usize = 10;

/// Minimum query length before suggestions are computed.
const MIN_QUERY_LEN: usize = 2;

/// Query parameters for both search endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    /// Search text.
    q: Option<String>,
    /// Listing page (results page only).
    pagina: Option<String>,
}

impl SearchParams {
    fn query(&self) -> &str {
        self.q.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Response for GET /api/search.
#[derive(Debug, Serialize)]
pub(crate) struct SearchResponse {
    suggestions: Vec<SuggestionResponse>,
}

/// One autocomplete suggestion.
#[derive(Debug, Serialize)]
struct SuggestionResponse {
    /// Display text.
    label: String,
    /// Target URL for the suggestion.
    url: String,
    /// Entity kind: "city", "specialty", "disease" or "doctor".
    kind: &'static str,
}

/// Handle GET /buscar (server-rendered results page).
pub(crate) async fn search_page(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let query_text = params.query().to_owned();
    let page = ListingParams {
        pagina: params.pagina.clone(),
    }
    .page();

    let doctors = if query_text.is_empty() {
        mb_store::DoctorPage::default()
    } else {
        let query = DoctorQuery::new()
            .name_prefix(query_text.clone())
            .page(page)
            .per_page(PER_PAGE);
        find_doctors(Arc::clone(&state.store), query).await?
    };

    let base_path = format!("/buscar?q={}", encode_query(&query_text));
    let data = SearchPageData {
        listing: listing(doctors, page, base_path),
        query: query_text,
    };
    let html = render_search_page(&state.site, &data);
    Ok(html_response(&state, &headers, html))
}

/// Handle GET /api/search (JSON autocomplete).
pub(crate) async fn api_search(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SearchResponse>, ServerError> {
    let query_text = params.query();
    if query_text.len() < MIN_QUERY_LEN {
        return Ok(Json(SearchResponse {
            suggestions: Vec::new(),
        }));
    }

    let mut suggestions = dataset_suggestions(&state, query_text);

    if suggestions.len() < SUGGESTION_LIMIT {
        let query = DoctorQuery::new()
            .name_prefix(query_text)
            .per_page((SUGGESTION_LIMIT - suggestions.len()) as u64);
        let doctors = find_doctors(Arc::clone(&state.store), query).await?;
        suggestions.extend(doctors.doctors.into_iter().map(|doctor| {
            SuggestionResponse {
                url: format!("/buscar?q={}", encode_query(&doctor.name)),
                label: doctor.name,
                kind: "doctor",
            }
        }));
    }

    suggestions.truncate(SUGGESTION_LIMIT);
    Ok(Json(SearchResponse { suggestions }))
}

/// Suggestions from the reference dataset, matched accent-insensitively.
fn dataset_suggestions(state: &AppState, query_text: &str) -> Vec<SuggestionResponse> {
    let needle = fold(query_text);
    let mut suggestions = Vec::new();

    for state_slug in state.dataset.state_slugs() {
        let Some(cities) = state.dataset.city_names(state_slug) else {
            continue;
        };
        for city in cities {
            if !fold(city).starts_with(&needle) {
                continue;
            }
            let city_slug = slugify(city);
            // The self-named city's canonical URL is the state URL.
            let url = if city_slug == state_slug {
                format!("{DOCTORS_PREFIX}/{state_slug}")
            } else {
                format!("{DOCTORS_PREFIX}/{state_slug}/{city_slug}")
            };
            suggestions.push(SuggestionResponse {
                label: city.to_owned(),
                url,
                kind: "city",
            });
        }
    }

    for specialty in state.dataset.specialty_names() {
        if fold(specialty).starts_with(&needle) {
            suggestions.push(SuggestionResponse {
                label: specialty.to_owned(),
                url: format!("/buscar?q={}", encode_query(specialty)),
                kind: "specialty",
            });
        }
    }

    for disease in state.dataset.disease_names() {
        if fold(disease).starts_with(&needle) {
            suggestions.push(SuggestionResponse {
                label: disease.to_owned(),
                url: format!("/enfermedades/{}", slugify(disease)),
                kind: "disease",
            });
        }
    }

    suggestions
}

/// Percent-encode a value for use in a query string.
fn encode_query(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}
