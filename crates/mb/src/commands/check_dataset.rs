//! `medibusca check-dataset` command implementation.
//!
//! Compiles the reference dataset and reports the data-quality constraints
//! the resolver assumes but does not enforce: slug collisions between cities
//! of one state and between folded specialty names.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use mb_config::{CliSettings, Config};
use mb_directory::{ReferenceDataset, fold, slugify};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check-dataset command.
#[derive(Args)]
pub(crate) struct CheckDatasetArgs {
    /// Path to configuration file (default: auto-discover medibusca.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reference dataset file (overrides config).
    #[arg(short, long)]
    dataset: Option<PathBuf>,
}

impl CheckDatasetArgs {
    /// Execute the check-dataset command.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset fails to load or a slug collision is
    /// found.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: None,
            port: None,
            dataset: self.dataset,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let dataset = ReferenceDataset::load(&config.dataset_path)?;

        output.info(&format!("Dataset: {}", config.dataset_path.display()));

        let mut collisions = 0;
        collisions += report_city_collisions(&output, &dataset);
        collisions += report_specialty_collisions(&output, &dataset);

        let city_count: usize = dataset
            .state_slugs()
            .filter_map(|slug| dataset.city_names(slug).map(Iterator::count))
            .sum();
        output.info(&format!(
            "States: {}, cities: {}, specialties: {}, diseases: {}",
            dataset.state_slugs().count(),
            city_count,
            dataset.specialty_names().count(),
            dataset.disease_names().count(),
        ));

        if collisions > 0 {
            return Err(CliError::Validation(format!(
                "{collisions} slug collision(s) found"
            )));
        }
        output.success("Dataset OK");
        Ok(())
    }
}

/// Report cities of one state whose names slugify identically.
fn report_city_collisions(output: &Output, dataset: &ReferenceDataset) -> usize {
    let mut collisions = 0;
    for state_slug in dataset.state_slugs() {
        let Some(cities) = dataset.city_names(state_slug) else {
            continue;
        };
        let mut by_slug: HashMap<String, &str> = HashMap::new();
        for city in cities {
            if let Some(previous) = by_slug.insert(slugify(city), city) {
                output.warning(&format!(
                    "{state_slug}: cities {previous:?} and {city:?} share a slug"
                ));
                collisions += 1;
            }
        }
    }
    collisions
}

/// Report specialties whose folded forms coincide (the resolver's
/// accent-insensitive fallback would always pick the first).
fn report_specialty_collisions(output: &Output, dataset: &ReferenceDataset) -> usize {
    let mut collisions = 0;
    let mut by_fold: HashMap<String, &str> = HashMap::new();
    for specialty in dataset.specialty_names() {
        if let Some(previous) = by_fold.insert(fold(specialty), specialty) {
            output.warning(&format!(
                "specialties {previous:?} and {specialty:?} fold to the same form"
            ));
            collisions += 1;
        }
    }
    collisions
}
