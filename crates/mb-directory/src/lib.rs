//! Reference dataset and URL slug resolution for MediBusca.
//!
//! This crate holds the directory's immutable reference tables (states with
//! their cities, canonical specialties, canonical diseases) and the logic
//! that interprets ambiguous URL path segments against them.
//!
//! # Architecture
//!
//! - [`ReferenceDataset`] is built once at startup from a TOML file and
//!   shared read-only across request handlers. All slugs are precomputed at
//!   construction.
//! - [`slugify`] is the single normalization function used both to build
//!   outgoing links and to match incoming path segments, so a generated link
//!   always resolves back to the entity it was generated from.
//! - Resolution produces a [`PageIntent`]: exactly one variant holds for any
//!   input path, and `NotFound` is a normal outcome, not an error.
//!
//! Resolution is pure and synchronous. The only external collaborator is the
//! existence predicate injected into [`ReferenceDataset::resolve_disease`].

mod dataset;
mod resolver;
mod slug;

pub use dataset::{DatasetError, DatasetFile, ReferenceDataset, StateEntry};
pub use resolver::{DOCTORS_PREFIX, PageIntent};
pub use slug::{display_name_from_slug, fold, slugify};
