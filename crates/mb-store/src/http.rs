//! HTTP Data API backend.
//!
//! Speaks a JSON find/count API: each operation is a POST to
//! `{base_url}/action/{name}` carrying the data source, database, collection
//! and a filter document, authenticated with an `api-key` header. The
//! backend's own query language never leaks past this module.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::query::DoctorQuery;
use crate::record::Doctor;
use crate::store::{DirectoryStore, DoctorPage, ErrorStatus, StoreError, StoreErrorKind};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Backend identifier used in errors.
const BACKEND: &str = "Http";

/// Connection settings for [`HttpStore`].
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    /// Data API base URL.
    pub base_url: String,
    /// Data source (cluster) name.
    pub data_source: String,
    /// Database name.
    pub database: String,
    /// Collection holding doctor records.
    pub collection: String,
    /// API key sent with every request.
    pub api_key: String,
}

/// Hosted Data API client.
pub struct HttpStore {
    agent: Agent,
    config: HttpStoreConfig,
}

impl HttpStore {
    /// Create a client from connection settings.
    #[must_use]
    pub fn new(config: HttpStoreConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            config: HttpStoreConfig {
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                ..config
            },
        }
    }

    /// POST one action and decode its JSON response.
    fn post<T: DeserializeOwned>(
        &self,
        action: &'static str,
        body: &impl Serialize,
    ) -> Result<T, StoreError> {
        let url = format!("{}/action/{action}", self.config.base_url);

        let response = self
            .agent
            .post(&url)
            .header("api-key", &self.config.api_key)
            .header("Accept", "application/json")
            .send_json(body)
            .map_err(|err| {
                tracing::warn!(action, error = %err, "Data API request failed");
                StoreError::new(StoreErrorKind::Unavailable)
                    .with_status(ErrorStatus::Temporary)
                    .with_backend(BACKEND)
                    .with_operation(action)
                    .with_source(err)
            })?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            tracing::warn!(action, status, body = %error_body, "Data API error response");
            return Err(StoreError::from_http_status(status)
                .with_backend(BACKEND)
                .with_operation(action));
        }

        body_reader.read_json().map_err(|err| {
            StoreError::new(StoreErrorKind::Decode)
                .with_backend(BACKEND)
                .with_operation(action)
                .with_source(err)
        })
    }

    fn request<'a>(&'a self, query: &'a DoctorQuery) -> ActionRequest<'a> {
        ActionRequest {
            data_source: &self.config.data_source,
            database: &self.config.database,
            collection: &self.config.collection,
            filter: Filter::from_query(query),
            skip: query.offset(),
            limit: query.limit(),
        }
    }
}

impl DirectoryStore for HttpStore {
    fn find(&self, query: &DoctorQuery) -> Result<DoctorPage, StoreError> {
        let response: FindResponse = self.post("find", &self.request(query))?;
        Ok(DoctorPage {
            doctors: response.documents,
            total: response.total,
        })
    }

    fn count(&self, query: &DoctorQuery) -> Result<u64, StoreError> {
        let response: CountResponse = self.post("count", &self.request(query))?;
        Ok(response.total)
    }
}

/// Request body for find/count actions.
#[derive(Debug, Serialize)]
struct ActionRequest<'a> {
    #[serde(rename = "dataSource")]
    data_source: &'a str,
    database: &'a str,
    collection: &'a str,
    filter: Filter<'a>,
    skip: u64,
    limit: u64,
}

/// Filter document; multi-valued record fields match on membership.
#[derive(Debug, Serialize)]
struct Filter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    state_slug: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cities: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    specialties: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diseases: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name_prefix: Option<&'a str>,
}

impl<'a> Filter<'a> {
    fn from_query(query: &'a DoctorQuery) -> Self {
        Self {
            state_slug: query.state_slug.as_deref(),
            cities: query.city.as_deref(),
            specialties: query.specialty.as_deref(),
            diseases: query.disease.as_deref(),
            name_prefix: query.name_prefix.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    documents: Vec<Doctor>,
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    #[serde(default)]
    total: u64,
}
