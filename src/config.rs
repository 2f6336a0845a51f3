use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub omdb_api_key: Option<String>,
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: ListenConfig::default(),
            omdb_api_key: None,
            mode: default_mode(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_mode() -> String {
    "debug".to_string()
}

impl Config {
    /// Load the config file and apply environment overrides. A missing
    /// file is not an error; everything has a workable default.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => serde_yaml::from_str(&content)
                .map_err(|e| ConfigError::ParseError(path.to_string(), e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(ConfigError::ReadError(path.to_string(), e)),
        };
        config.apply_env();
        Ok(config)
    }

    /// Environment variables win over file values: OMDB_API_KEY, PORT
    /// (hosting platforms inject this one), APP_MODE.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("OMDB_API_KEY") {
            if !key.is_empty() {
                self.omdb_api_key = Some(key);
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            if !port.is_empty() {
                self.listen.port = port;
            }
        }
        if let Ok(mode) = std::env::var("APP_MODE") {
            if !mode.is_empty() {
                self.mode = mode;
            }
        }
    }

    pub fn is_release(&self) -> bool {
        self.mode == "release"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}
