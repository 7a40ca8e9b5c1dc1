//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use mb_directory::ReferenceDataset;
use mb_site::SiteContext;
use mb_store::DirectoryStore;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Compiled reference dataset (immutable for the process lifetime).
    pub(crate) dataset: Arc<ReferenceDataset>,
    /// Doctor record store.
    pub(crate) store: Arc<dyn DirectoryStore>,
    /// Site presentation context.
    pub(crate) site: SiteContext,
    /// Application version for cache validation.
    pub(crate) version: String,
}
