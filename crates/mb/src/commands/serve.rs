//! `medibusca serve` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use mb_config::{CliSettings, Config};
use mb_directory::ReferenceDataset;
use mb_server::{ServerConfig, run_server};
use mb_store::{HttpStore, HttpStoreConfig};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover medibusca.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reference dataset file (overrides config).
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request logs and timing).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or dataset loading fails, the
    /// `[store]` section is missing, or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            dataset: self.dataset,
        };

        // Load config and compile the reference dataset
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let dataset = Arc::new(ReferenceDataset::load(&config.dataset_path)?);

        let store_config = config.require_store()?;
        let store = Arc::new(HttpStore::new(HttpStoreConfig {
            base_url: store_config.base_url.clone(),
            data_source: store_config.data_source.clone(),
            database: store_config.database.clone(),
            collection: store_config.collection.clone(),
            api_key: store_config.api_key.clone(),
        }));

        // Print startup info
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Dataset: {}", config.dataset_path.display()));
        output.info(&format!(
            "States: {}, specialties: {}, diseases: {}",
            dataset.state_slugs().count(),
            dataset.specialty_names().count(),
            dataset.disease_names().count(),
        ));
        output.info(&format!("Data store: {}", store_config.base_url));

        let server_config = ServerConfig {
            host: config.server.host.clone(),
            port: config.server.port,
            site_name: config.site.name.clone(),
            version: version.to_string(),
        };
        run_server(server_config, dataset, store)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
