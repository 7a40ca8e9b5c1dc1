//! Doctor listing handlers (`/doctores` routes).
//!
//! The two-segment route is where slug resolution happens: the second
//! segment may name a city or a specialty, and the resolver decides which
//! before any data is fetched.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use mb_directory::{DOCTORS_PREFIX, PageIntent};
use mb_site::{
    CityPageData, SpecialtyPageData, StatePageData, render_city_page, render_specialty_page,
    render_state_page, render_states_index, specialty_description,
};
use mb_store::DoctorQuery;

use crate::error::ServerError;
use crate::handlers::{ListingParams, PER_PAGE, find_doctors, html_response, listing, not_found};
use crate::state::AppState;

/// Handle GET /doctores (states directory).
pub(crate) async fn states_index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let html = render_states_index(&state.site, &state.dataset);
    html_response(&state, &headers, html)
}

/// Handle GET /doctores/{estado}.
pub(crate) async fn state_page(
    Path(estado): Path<String>,
    Query(params): Query<ListingParams>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    match state.dataset.resolve_state(&estado) {
        PageIntent::State {
            state_slug,
            self_named_city,
        } => {
            let page = params.page();
            let query = DoctorQuery::new()
                .state(state_slug.clone())
                .page(page)
                .per_page(PER_PAGE);
            let doctors = find_doctors(Arc::clone(&state.store), query).await?;

            let data = StatePageData {
                cities: state
                    .dataset
                    .city_names(&state_slug)
                    .into_iter()
                    .flatten()
                    .map(str::to_owned)
                    .collect(),
                specialties: state.dataset.specialty_names().map(str::to_owned).collect(),
                listing: listing(doctors, page, format!("{DOCTORS_PREFIX}/{state_slug}")),
                state_slug,
                self_named_city,
            };
            let html = render_state_page(&state.site, &data);
            Ok(html_response(&state, &headers, html))
        }
        _ => Ok(not_found(&state)),
    }
}

/// Handle GET /doctores/{estado}/{segundo}.
///
/// The second segment is ambiguous between city and specialty; the resolver
/// decides, and the self-named city collapses to the state URL with a
/// permanent redirect.
pub(crate) async fn state_and_city(
    Path((estado, segundo)): Path<(String, String)>,
    Query(params): Query<ListingParams>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let page = params.page();
    match state.dataset.resolve_state_and_city(&estado, &segundo) {
        PageIntent::Redirect { target } => Ok(Redirect::permanent(&target).into_response()),
        PageIntent::City {
            state_slug,
            city_name,
        } => {
            let query = DoctorQuery::new()
                .state(state_slug.clone())
                .city(city_name.clone())
                .page(page)
                .per_page(PER_PAGE);
            let doctors = find_doctors(Arc::clone(&state.store), query).await?;

            let data = CityPageData {
                listing: listing(
                    doctors,
                    page,
                    format!("{DOCTORS_PREFIX}/{state_slug}/{segundo}"),
                ),
                state_slug,
                city_name,
            };
            let html = render_city_page(&state.site, &data);
            Ok(html_response(&state, &headers, html))
        }
        PageIntent::StateSpecialty {
            state_slug,
            city_name,
            specialty_name,
        } => {
            let query = DoctorQuery::new()
                .city(city_name.clone())
                .specialty(specialty_name.clone())
                .page(page)
                .per_page(PER_PAGE);
            let doctors = find_doctors(Arc::clone(&state.store), query).await?;

            // Pagination links use the canonical specialty slug even when
            // the request arrived through the accent-fold fallback.
            let canonical_segment = mb_directory::slugify(&specialty_name);
            let data = SpecialtyPageData {
                description: specialty_description(&state.dataset, &specialty_name),
                listing: listing(
                    doctors,
                    page,
                    format!("{DOCTORS_PREFIX}/{state_slug}/{canonical_segment}"),
                ),
                state_slug,
                city_name,
                specialty_name,
            };
            let html = render_specialty_page(&state.site, &data);
            Ok(html_response(&state, &headers, html))
        }
        _ => Ok(not_found(&state)),
    }
}
