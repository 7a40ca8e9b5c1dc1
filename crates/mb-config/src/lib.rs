//! Configuration management for MediBusca.
//!
//! Parses `medibusca.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `store.base_url`
//! - `store.api_key`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override reference dataset path.
    pub dataset: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "medibusca.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site presentation configuration.
    pub site: SiteConfig,
    /// Hosted data-store configuration.
    ///
    /// Optional section; commands that query the store require it via
    /// [`Config::require_store`].
    pub store: Option<StoreConfig>,
    /// Reference dataset configuration (path is a relative string from TOML).
    #[serde(default)]
    dataset: DatasetConfigRaw,

    /// Resolved dataset path (set after loading).
    #[serde(skip)]
    pub dataset_path: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Site presentation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name shown in titles and the header.
    pub name: String,
    /// Public base URL, used for canonical links (optional).
    pub base_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "MediBusca".to_owned(),
            base_url: None,
        }
    }
}

/// Hosted data-store configuration.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Data API base URL.
    pub base_url: String,
    /// Data source (cluster) name.
    pub data_source: String,
    /// Database name.
    pub database: String,
    /// API key; supports `${VAR}` expansion so secrets stay out of the file.
    pub api_key: String,
    /// Collection holding doctor records.
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    "doctors".to_owned()
}

impl StoreConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has an
    /// invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "store.base_url")?;
        require_http_url(&self.base_url, "store.base_url")?;
        require_non_empty(&self.data_source, "store.data_source")?;
        require_non_empty(&self.database, "store.database")?;
        require_non_empty(&self.api_key, "store.api_key")?;
        require_non_empty(&self.collection, "store.collection")?;
        Ok(())
    }
}

/// Raw dataset configuration as parsed from TOML (path as string).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DatasetConfigRaw {
    path: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`store.api_key`").
        field: String,
        /// Error message (e.g., "${`MB_API_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `medibusca.toml` in the current directory and
    /// parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(dataset) = &settings.dataset {
            self.dataset_path.clone_from(dataset);
        }
    }

    /// Get validated store configuration.
    ///
    /// Returns the store config if the `[store]` section is present and all
    /// fields are valid. Use this instead of accessing the `store` field
    /// directly when the command requires the data store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_store(&self) -> Result<&StoreConfig, ConfigError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("[store] section required in config".into()))?;
        store.validate()?;
        Ok(store)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            store: None,
            dataset: DatasetConfigRaw::default(),
            dataset_path: base.join("dataset.toml"),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        require_non_empty(&self.site.name, "site.name")?;
        if let Some(ref base_url) = self.site.base_url {
            require_http_url(base_url, "site.base_url")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref mut store) = self.store {
            store.base_url = expand::expand_env(&store.base_url, "store.base_url")?;
            store.api_key = expand::expand_env(&store.api_key, "store.api_key")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.dataset_path = config_dir.join(self.dataset.path.as_deref().unwrap_or("dataset.toml"));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert_eq!(config.site.name, "MediBusca");
        assert_eq!(config.dataset_path, PathBuf::from("/test/dataset.toml"));
        assert!(config.store.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert_eq!(config.site.name, "MediBusca");
    }

    #[test]
    fn test_parse_server_and_site_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000

[site]
name = "DocFinder"
base_url = "https://docfinder.example"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.site.name, "DocFinder");
        assert_eq!(
            config.site.base_url.as_deref(),
            Some("https://docfinder.example")
        );
    }

    #[test]
    fn test_load_explicit_missing_file_is_not_found() {
        let err = Config::load(Some(Path::new("/nonexistent/medibusca.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_resolves_dataset_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medibusca.toml");
        std::fs::write(&path, "[dataset]\npath = \"data/reference.toml\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.dataset_path, dir.path().join("data/reference.toml"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_cli_settings_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medibusca.toml");
        std::fs::write(&path, "[server]\nhost = \"10.0.0.1\"\nport = 8000\n").unwrap();

        let settings = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9999),
            dataset: Some(PathBuf::from("/elsewhere/dataset.toml")),
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.dataset_path, PathBuf::from("/elsewhere/dataset.toml"));
    }

    #[test]
    fn test_port_zero_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medibusca.toml");
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_store_section_expansion_and_validation() {
        unsafe { std::env::set_var("MB_CONFIG_TEST_KEY", "secret-key") };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medibusca.toml");
        std::fs::write(
            &path,
            r#"
[store]
base_url = "https://data.example/api/v1"
data_source = "cluster0"
database = "medibusca"
api_key = "${MB_CONFIG_TEST_KEY}"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        let store = config.require_store().unwrap();

        assert_eq!(store.api_key, "secret-key");
        assert_eq!(store.collection, "doctors");
    }

    #[test]
    fn test_require_store_missing_section() {
        let config = Config::default_with_base(Path::new("/test"));

        let err = config.require_store().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_store_invalid_url_is_rejected() {
        let store = StoreConfig {
            base_url: "ftp://nope".to_owned(),
            data_source: "cluster0".to_owned(),
            database: "medibusca".to_owned(),
            api_key: "k".to_owned(),
            collection: "doctors".to_owned(),
        };

        assert!(matches!(
            store.validate(),
            Err(ConfigError::Validation(_))
        ));
    }
}
