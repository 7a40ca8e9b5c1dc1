//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/", get(handlers::home::home))
        .route("/doctores", get(handlers::listings::states_index))
        .route("/doctores/{estado}", get(handlers::listings::state_page))
        .route(
            "/doctores/{estado}/{segundo}",
            get(handlers::listings::state_and_city),
        )
        .route("/enfermedades", get(handlers::diseases::index))
        .route("/enfermedades/{enfermedad}", get(handlers::diseases::disease))
        .route("/buscar", get(handlers::search::search_page))
        .route("/api/search", get(handlers::search::api_search))
        .route("/health", get(handlers::health::health))
        .fallback(handlers::not_found_fallback);

    // Add security headers middleware
    router
        .layer(
            ServiceBuilder::new()
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use mb_directory::ReferenceDataset;
    use mb_site::SiteContext;
    use mb_store::{Doctor, MockStore};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    const FIXTURE: &str = r#"
specialties = ["Cardiólogo", "Pediatra"]
diseases = ["Diabetes"]

[specialty_descriptions]
"Cardiólogo" = "Especialista en el corazón."

[[states]]
slug = "ciudad-de-mexico"
cities = ["Ciudad de México", "Tlalpan"]

[[states]]
slug = "nuevo-leon"
cities = ["Monterrey"]
"#;

    fn doctor(name: &str, state: &str, city: &str, specialty: &str, disease: &str) -> Doctor {
        Doctor {
            name: name.to_owned(),
            state_slug: state.to_owned(),
            cities: vec![city.to_owned()],
            specialties: vec![specialty.to_owned()],
            diseases: vec![disease.to_owned()],
            address: None,
            phone: None,
        }
    }

    fn mock_store() -> MockStore {
        MockStore::new().with_doctors([
            doctor(
                "Dr. Luis Soto",
                "ciudad-de-mexico",
                "Ciudad de México",
                "Cardiólogo",
                "Colitis Nerviosa",
            ),
            doctor(
                "Dra. Ana Ruiz",
                "ciudad-de-mexico",
                "Tlalpan",
                "Pediatra",
                "Asma",
            ),
            doctor(
                "Dra. Marta Vega",
                "nuevo-leon",
                "Monterrey",
                "Cardiólogo",
                "Diabetes",
            ),
        ])
    }

    fn app_with_store(store: MockStore) -> Router {
        let state = Arc::new(AppState {
            dataset: Arc::new(ReferenceDataset::from_toml_str(FIXTURE).unwrap()),
            store: Arc::new(store),
            site: SiteContext {
                site_name: "MediBusca".to_owned(),
            },
            version: "test".to_owned(),
        });
        create_router(state)
    }

    fn app() -> Router {
        app_with_store(mock_store())
    }

    async fn get_response(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn home_page_renders() {
        let (status, headers, body) = get_response(app(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Encuentra doctores"));
        assert!(headers.contains_key(header::ETAG));
        assert_eq!(
            headers.get("x-content-type-options").unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn state_page_lists_cities_and_doctors() {
        let (status, _, body) = get_response(app(), "/doctores/ciudad-de-mexico").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Tlalpan"));
        assert!(body.contains("Dr. Luis Soto"));
        assert!(body.contains("Dra. Ana Ruiz"));
    }

    #[tokio::test]
    async fn unknown_state_is_404() {
        let (status, _, body) = get_response(app(), "/doctores/xx-unknown").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Página no encontrada"));
    }

    #[tokio::test]
    async fn unknown_second_segment_is_404() {
        let (status, _, _) = get_response(app(), "/doctores/nuevo-leon/no-existe").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn city_page_lists_city_doctors() {
        let (status, _, body) = get_response(app(), "/doctores/ciudad-de-mexico/tlalpan").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Doctores en Tlalpan"));
        assert!(body.contains("Dra. Ana Ruiz"));
        assert!(!body.contains("Dra. Marta Vega"));
    }

    #[tokio::test]
    async fn self_named_city_redirects_to_state_url() {
        let (status, headers, _) =
            get_response(app(), "/doctores/ciudad-de-mexico/ciudad-de-mexico").await;

        assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            headers.get(header::LOCATION).unwrap(),
            "/doctores/ciudad-de-mexico"
        );
    }

    #[tokio::test]
    async fn specialty_page_in_self_named_city() {
        let (status, _, body) = get_response(app(), "/doctores/ciudad-de-mexico/cardiologo").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Cardiólogo en Ciudad de México"));
        assert!(body.contains("Especialista en el corazón."));
        assert!(body.contains("Dr. Luis Soto"));
    }

    #[tokio::test]
    async fn specialty_without_self_named_city_is_404() {
        let (status, _, _) = get_response(app(), "/doctores/nuevo-leon/cardiologo").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn canonical_disease_page_renders_article() {
        let (status, _, body) = get_response(app(), "/enfermedades/diabetes").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Diabetes</h1>"));
        assert!(body.contains("Dra. Marta Vega"));
    }

    #[tokio::test]
    async fn article_only_disease_page_renders() {
        // "Asma" has an article but is not in the canonical disease list.
        let (status, _, body) = get_response(app(), "/enfermedades/asma").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Asma</h1>"));
    }

    #[tokio::test]
    async fn record_only_disease_page_renders() {
        // No canonical entry, no article; only a store record references it.
        let (status, _, body) = get_response(app(), "/enfermedades/colitis-nerviosa").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Colitis Nerviosa"));
        assert!(body.contains("Dr. Luis Soto"));
    }

    #[tokio::test]
    async fn unknown_disease_is_404() {
        let (status, _, _) = get_response(app(), "/enfermedades/no-existe").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_page_finds_doctors_by_prefix() {
        let (status, _, body) = get_response(app(), "/buscar?q=Dra").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Dra. Ana Ruiz"));
        assert!(body.contains("Dra. Marta Vega"));
    }

    #[tokio::test]
    async fn api_search_suggests_dataset_and_doctors() {
        let (status, _, body) = get_response(app(), "/api/search?q=car").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let labels: Vec<&str> = json["suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["label"].as_str().unwrap())
            .collect();
        assert!(labels.contains(&"Cardiólogo"));
    }

    #[tokio::test]
    async fn api_search_short_query_is_empty() {
        let (status, _, body) = get_response(app(), "/api/search?q=c").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["suggestions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn api_search_suggests_self_named_city_at_state_url() {
        let (status, _, body) = get_response(app(), "/api/search?q=ciudad").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let urls: Vec<&str> = json["suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["url"].as_str().unwrap())
            .collect();
        assert!(urls.contains(&"/doctores/ciudad-de-mexico"));
    }

    #[tokio::test]
    async fn etag_round_trip_yields_not_modified() {
        let (_, headers, _) = get_response(app(), "/").await;
        let etag = headers.get(header::ETAG).unwrap().clone();

        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn store_failure_is_bad_gateway() {
        let (status, _, _) = get_response(
            app_with_store(MockStore::new().unavailable()),
            "/doctores/nuevo-leon/monterrey",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let (status, _, body) = get_response(app(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], "test");
    }

    #[tokio::test]
    async fn unmatched_path_falls_back_to_404_page() {
        let (status, _, body) = get_response(app(), "/algo/raro/aqui").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Página no encontrada"));
    }

    #[tokio::test]
    async fn invalid_page_param_falls_back_to_first_page() {
        let (status, _, body) =
            get_response(app(), "/doctores/ciudad-de-mexico/tlalpan?pagina=abc").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Dra. Ana Ruiz"));
    }
}
