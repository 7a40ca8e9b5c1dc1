//! CLI command implementations.

pub(crate) mod check_dataset;
pub(crate) mod serve;

pub(crate) use check_dataset::CheckDatasetArgs;
pub(crate) use serve::ServeArgs;
