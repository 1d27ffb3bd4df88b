pub mod store_config;
pub mod view_config;

pub use store_config::StoreConfig;
pub use view_config::ViewConfig;

use anyhow::{Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/catalog.toml";
pub const ENV_PREFIX: &str = "SOLAR_CATALOG";

/// Top-level configuration file (`config/catalog.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

impl AppConfig {
    /// Reads the TOML file (optional) and overlays `SOLAR_CATALOG__SECTION__KEY`
    /// environment variables. Credentials are not loaded here.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read catalog config: {}", path))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse catalog config: {}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse catalog config")
    }
}
