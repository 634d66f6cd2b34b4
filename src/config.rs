//! Endpoint configuration.
//!
//! Loaded from a TOML file (every key optional), then overridden from the
//! environment:
//!
//! ```toml
//! name = "sample-endpoint"
//!
//! [server]
//! bind = "127.0.0.1:8080"
//! webhook_path = "/"
//!
//! [random]
//! default_max = 10000
//!
//! [upload]
//! source_url = "https://example.com/sample.pdf"
//! file_name = "somefile.pdf"
//!
//! [settings]
//! token = "abc"
//! ```
//!
//! | variable | overrides |
//! |---|---|
//! | `ENDPOINT_NAME` | `name` |
//! | `ENDPOINT_BIND` | `server.bind` |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_UPLOAD_SOURCE: &str =
    "https://jsoncompare.org/LearningContainer/SampleFiles/PDF/sample-pdf-with-images.pdf";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub name: String,
    pub server: ServerConfig,
    pub random: RandomConfig,
    pub upload: UploadConfig,
    /// Free-form settings handed to functions.
    pub settings: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub webhook_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Upper bound used when `randomNumber` gets no `max`.
    pub default_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub source_url: String,
    pub file_name: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            name: "sample-endpoint".to_string(),
            server: ServerConfig::default(),
            random: RandomConfig::default(),
            upload: UploadConfig::default(),
            settings: Map::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            webhook_path: "/".to_string(),
        }
    }
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            default_max: 10_000.0,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_UPLOAD_SOURCE.to_string(),
            file_name: "somefile.pdf".to_string(),
        }
    }
}

impl EndpointConfig {
    /// Load from `path` (defaults when `None`), then apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `ENDPOINT_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("ENDPOINT_NAME") {
            self.name = name;
        }
        if let Some(bind) = lookup("ENDPOINT_BIND") {
            self.server.bind = bind;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server.webhook_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "server.webhook_path must start with '/', got {:?}",
                self.server.webhook_path
            )));
        }
        if self.server.webhook_path.contains([':', '*']) {
            return Err(ConfigError::Invalid(format!(
                "server.webhook_path must be a literal path without ':' or '*', got {:?}",
                self.server.webhook_path
            )));
        }
        if !self.random.default_max.is_finite() {
            return Err(ConfigError::Invalid(
                "random.default_max must be a finite number".into(),
            ));
        }
        if self.upload.file_name.is_empty() {
            return Err(ConfigError::Invalid("upload.file_name is empty".into()));
        }
        Ok(())
    }
}
