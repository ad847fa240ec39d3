use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CASES_URL: &str = "https://functions.poehali.dev/196ef5ca-dd1d-4d1f-ae2e-e95a90b5b8e1";
const CLIENTS_URL: &str = "https://functions.poehali.dev/e47a5187-bd9e-4e30-9749-5aaf274af1f5";
const PAYMENTS_URL: &str = "https://functions.poehali.dev/6e812ba0-fe2d-47bb-9441-603d0b7b3f55";

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct CrmConfig {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// One backend function URL per entity. An empty URL means the function
/// is not deployed and every call to it fails.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct EndpointsConfig {
    pub cases: String,
    pub clients: String,
    pub payments: String,
    pub expenses: String,
    pub tasks: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            cases: CASES_URL.to_string(),
            clients: CLIENTS_URL.to_string(),
            payments: PAYMENTS_URL.to_string(),
            expenses: String::new(),
            tasks: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 15 }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CrmConfig {
    /// Load from `path`, or from the per-user config file. The per-user file
    /// is created with defaults on first run; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let config_path = get_config_path();
                write_default_if_missing(&config_path)?;
                config_path
            }
        };

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: CrmConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }
}

fn write_default_if_missing(config_path: &Path) -> Result<(), ConfigError> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    let body = toml::to_string_pretty(&CrmConfig::default())
        .map_err(|e| ConfigError::Message(format!("Failed to render default config: {e}")))?;
    let default_config = format!(
        "# Backend function URLs. An empty URL marks a function that is not deployed.\n\
         # RUST_LOG overrides [logging] level.\n\n{body}"
    );
    std::fs::write(config_path, default_config)
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("lexdesk").join("client.toml")
    } else {
        PathBuf::from("client.toml")
    }
}
