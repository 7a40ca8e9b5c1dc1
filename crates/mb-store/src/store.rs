//! Store trait and error types.
//!
//! Provides the core [`DirectoryStore`] trait for abstracting doctor
//! lookups, along with [`StoreError`] for unified error handling across
//! backends.

use crate::query::DoctorQuery;
use crate::record::Doctor;

/// One page of doctor results plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DoctorPage {
    /// Records for the requested page, in backend order.
    pub doctors: Vec<Doctor>,
    /// Total records matching the query across all pages.
    pub total: u64,
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// Collection or endpoint does not exist.
    NotFound,
    /// Credentials missing or rejected.
    Unauthorized,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Too many requests.
    RateLimited,
    /// Operation timed out.
    Timeout,
    /// Response could not be decoded.
    Decode,
    /// Other/unknown error category.
    Other,
}

/// Retry guidance.
#[derive(Debug, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    /// Don't retry (config error, not found).
    #[default]
    Permanent,
    /// Retry immediately (timeout, connection reset).
    Temporary,
    /// Retry with backoff (rate limited, service unavailable).
    Persistent,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    /// Semantic error category.
    pub kind: StoreErrorKind,
    /// Retry guidance.
    pub status: ErrorStatus,
    /// Backend identifier (e.g., "Http", "Mock").
    pub backend: Option<&'static str>,
    /// Short description of the failing operation (e.g., "find").
    pub operation: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            status: ErrorStatus::Permanent,
            backend: None,
            operation: None,
            source: None,
        }
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the failing operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Set retry status.
    #[must_use]
    pub fn with_status(mut self, status: ErrorStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Map an HTTP status code to a store error.
    #[must_use]
    pub fn from_http_status(status: u16) -> Self {
        let kind = match status {
            401 | 403 => StoreErrorKind::Unauthorized,
            404 => StoreErrorKind::NotFound,
            429 => StoreErrorKind::RateLimited,
            500..=599 => StoreErrorKind::Unavailable,
            _ => StoreErrorKind::Other,
        };
        let retry = match status {
            429 | 500..=599 => ErrorStatus::Persistent,
            _ => ErrorStatus::Permanent,
        };
        Self::new(kind).with_status(retry)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (operation: find)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Not found",
            StoreErrorKind::Unauthorized => "Unauthorized",
            StoreErrorKind::Unavailable => "Unavailable",
            StoreErrorKind::RateLimited => "Rate limited",
            StoreErrorKind::Timeout => "Timeout",
            StoreErrorKind::Decode => "Decode error",
            StoreErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(operation) = self.operation {
            write!(f, " (operation: {operation})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Store abstraction for doctor lookups.
///
/// Provides a unified interface regardless of backend. Implementations map
/// [`DoctorQuery`] filters to their own query language; the trait consumer
/// never sees that language.
///
/// Empty results are not errors: `find` returns an empty [`DoctorPage`] and
/// `count` returns 0 when nothing matches.
pub trait DirectoryStore: Send + Sync {
    /// Fetch one page of doctors matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport or backend failure.
    fn find(&self, query: &DoctorQuery) -> Result<DoctorPage, StoreError>;

    /// Count doctors matching the query across all pages.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport or backend failure.
    fn count(&self, query: &DoctorQuery) -> Result<u64, StoreError>;
}
