use dirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::client::ClientConfig;
use crate::error::{KakaoError, Result};

const CONFIG_DIR_NAME: &str = "kakao-api";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable that overrides the configured REST API key
pub const API_KEY_ENV: &str = "KAKAO_REST_API_KEY";

/// Keys accepted by `get` and `set`
pub const KEYS: [&str; 4] = [
    "auth.rest_api_key",
    "http.timeout",
    "http.max_concurrent",
    "http.user_agent",
];

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Concurrent requests during `--all`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Config {
    /// Get the configuration directory
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| KakaoError::Config("Could not determine config directory".to_string()))?;

        Ok(config_dir.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file full path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location; a missing file is an empty config
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| KakaoError::Config(format!("Failed to read config file: {}", e)))?;

        serde_yaml::from_str(&contents)
            .map_err(|e| KakaoError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| {
                    KakaoError::Config(format!("Failed to create config directory: {}", e))
                })?;

                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(dir, fs::Permissions::from_mode(0o700)).map_err(|e| {
                        KakaoError::Config(format!("Failed to set directory permissions: {}", e))
                    })?;
                }
            }
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| KakaoError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, yaml)
            .map_err(|e| KakaoError::Config(format!("Failed to write config file: {}", e)))?;

        // The file holds the API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .map_err(|e| KakaoError::Config(format!("Failed to set file permissions: {}", e)))?;
        }

        Ok(())
    }

    /// Set a configuration value by key path. Does not save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "auth.rest_api_key" => {
                self.auth.rest_api_key = Some(value.to_string());
            }
            "http.timeout" => {
                self.http.timeout = Some(parse_number(key, value)?);
            }
            "http.max_concurrent" => {
                let n: usize = parse_number(key, value)?;
                if n == 0 {
                    return Err(KakaoError::Config(format!("{} must be at least 1", key)));
                }
                self.http.max_concurrent = Some(n);
            }
            "http.user_agent" => {
                self.http.user_agent = Some(value.to_string());
            }
            _ => {
                return Err(KakaoError::Config(format!(
                    "Unknown configuration key: {} (expected one of {})",
                    key,
                    KEYS.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Get a configuration value by key path
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "auth.rest_api_key" => self.auth.rest_api_key.clone(),
            "http.timeout" => self.http.timeout.map(|t| t.to_string()),
            "http.max_concurrent" => self.http.max_concurrent.map(|n| n.to_string()),
            "http.user_agent" => self.http.user_agent.clone(),
            _ => None,
        }
    }

    /// Build client settings; `api_key` wins over the stored key when given
    pub fn to_client_config(&self, api_key: Option<&str>) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            api_key: api_key
                .map(str::to_string)
                .or_else(|| self.auth.rest_api_key.clone())
                .unwrap_or_default(),
            timeout: self.http.timeout.unwrap_or(defaults.timeout),
            user_agent: self.http.user_agent.clone().unwrap_or(defaults.user_agent),
            max_concurrent: self.http.max_concurrent.unwrap_or(defaults.max_concurrent),
            ..defaults
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| KakaoError::Config(format!("{} expects a number, got '{}'", key, value)))
}

/// Mask all but the last four characters of a secret
pub fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}
