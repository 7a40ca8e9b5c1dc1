//! Hosted data-store client for MediBusca doctor records.
//!
//! This crate provides a [`DirectoryStore`] trait for abstracting doctor
//! lookups from the underlying hosted store. This enables:
//!
//! - **Unit testing** without network access
//! - **Backend flexibility** (hosted Data API today, anything else tomorrow)
//! - **Clean separation** between page logic and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`DirectoryStore`] trait with `find()` and `count()` methods
//! - [`HttpStore`] implementation speaking a JSON find/count Data API
//! - [`MockStore`] for testing (behind the `mock` feature flag)
//!
//! Queries are built with [`DoctorQuery`] and never fail on empty results:
//! an empty page is a normal outcome, [`StoreError`] is reserved for
//! transport and backend failures.

mod http;
#[cfg(feature = "mock")]
mod mock;
mod query;
mod record;
mod store;

pub use http::{HttpStore, HttpStoreConfig};
#[cfg(feature = "mock")]
pub use mock::MockStore;
pub use query::DoctorQuery;
pub use record::Doctor;
pub use store::{DirectoryStore, DoctorPage, ErrorStatus, StoreError, StoreErrorKind};
