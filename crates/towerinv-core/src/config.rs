//! Settings loading
//!
//! Settings are read from `TOWER_*` environment variables, optionally layered
//! over a TOML file carrying the same keys in lower case without the prefix.
//! Environment values win over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use towerinv_client::{
    AuthMode, ClientConfig, Credentials, DEFAULT_API_PATH, DEFAULT_PAGE_SIZE,
};

use crate::error::ConfigError;

/// Environment variable pointing at a settings file
pub const CONFIG_PATH_VAR: &str = "TOWER_CONFIG";

/// Settings file contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub inventory_id: Option<InventoryId>,
    pub auth: Option<AuthMode>,
    pub api_path: Option<String>,
    pub page_size: Option<u32>,
    pub hosts_enabled_only: Option<bool>,
    pub all_hosts_group: Option<bool>,
    pub ssl_verify: Option<bool>,
}

/// Inventory id written either as a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InventoryId {
    Number(u64),
    Text(String),
}

impl InventoryId {
    fn into_string(self) -> String {
        match self {
            Self::Number(id) => id.to_string(),
            Self::Text(id) => id,
        }
    }
}

impl FileSettings {
    /// Load settings from a TOML file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `TOWER_CONFIG` or the default paths, or use empty settings
    ///
    /// # Errors
    /// Returns error if a file is found but cannot be read or parsed
    pub fn load_default(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(path) = non_empty(env(CONFIG_PATH_VAR)) {
            return Self::load(&PathBuf::from(path));
        }

        let mut paths = vec![PathBuf::from("tower-inventory.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("tower-inventory/config.toml"));
        }

        for path in paths {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading settings file");
                return Self::load(&path);
            }
        }

        Ok(Self::default())
    }
}

/// Validated settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the server
    pub url: String,
    pub credentials: Credentials,
    /// Target inventory; `None` only when listing inventories
    pub inventory_id: Option<String>,
    pub auth_mode: AuthMode,
    pub api_path: String,
    pub page_size: u32,
    /// Only list enabled hosts
    pub enabled_only: bool,
    /// Emit the synthetic group listing every host
    pub all_hosts_group: bool,
    pub ssl_verify: bool,
}

impl Settings {
    /// Load settings from the process environment and settings file
    ///
    /// # Errors
    /// Returns error naming the missing or invalid variable
    pub fn load(require_inventory: bool) -> Result<Self, ConfigError> {
        let env = |name: &str| std::env::var(name).ok();
        let file = FileSettings::load_default(env)?;
        Self::from_sources(file, env, require_inventory)
    }

    /// Merge file settings with environment lookups and validate the result
    ///
    /// # Errors
    /// Returns error naming the missing or invalid variable
    pub fn from_sources(
        file: FileSettings,
        env: impl Fn(&str) -> Option<String>,
        require_inventory: bool,
    ) -> Result<Self, ConfigError> {
        let lookup = |name: &str| non_empty(env(name));

        let url = lookup("TOWER_URL")
            .or(non_empty(file.url))
            .ok_or(ConfigError::MissingUrl)?;

        let username = lookup("TOWER_USERNAME").or(non_empty(file.username));
        let password = lookup("TOWER_PASSWORD").or(non_empty(file.password));
        let (Some(username), Some(password)) = (username, password) else {
            return Err(ConfigError::MissingCredentials);
        };

        let inventory_id = lookup("TOWER_INVENTORY_ID")
            .or(non_empty(file.inventory_id.map(InventoryId::into_string)))
            .map(|id| id.trim().to_string());
        match &inventory_id {
            Some(id) if !id.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(ConfigError::Invalid {
                    variable: "TOWER_INVENTORY_ID",
                    value: id.clone(),
                    reason: "expected a numeric inventory id".to_string(),
                });
            }
            None if require_inventory => return Err(ConfigError::MissingInventoryId),
            _ => {}
        }

        let auth_mode = match lookup("TOWER_AUTH") {
            Some(value) => value.parse::<AuthMode>().map_err(|reason| ConfigError::Invalid {
                variable: "TOWER_AUTH",
                value,
                reason,
            })?,
            None => file.auth.unwrap_or_default(),
        };

        let page_size = match lookup("TOWER_PAGE_SIZE") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        variable: "TOWER_PAGE_SIZE",
                        value,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        variable: "TOWER_PAGE_SIZE",
                        value,
                        reason: e.to_string(),
                    });
                }
            },
            None => file.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        };

        let enabled_only = flag(&lookup, "TOWER_HOSTS_ENABLED_ONLY")?
            .or(file.hosts_enabled_only)
            .unwrap_or(false);
        let all_hosts_group = flag(&lookup, "TOWER_ALL_HOSTS_GROUP")?
            .or(file.all_hosts_group)
            .unwrap_or(auth_mode == AuthMode::Token);
        let ssl_verify = flag(&lookup, "TOWER_SSL_VERIFY")?
            .or(file.ssl_verify)
            .unwrap_or(false);

        Ok(Self {
            url,
            credentials: Credentials::new(username, password),
            inventory_id,
            auth_mode,
            api_path: lookup("TOWER_API_PATH")
                .or(non_empty(file.api_path))
                .unwrap_or_else(|| DEFAULT_API_PATH.to_string()),
            page_size,
            enabled_only,
            all_hosts_group,
            ssl_verify,
        })
    }

    /// Target inventory id
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingInventoryId`] when none is configured
    pub fn inventory_id(&self) -> Result<&str, ConfigError> {
        self.inventory_id
            .as_deref()
            .ok_or(ConfigError::MissingInventoryId)
    }

    /// Connection settings for the HTTP client
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.url.clone(),
            api_path: self.api_path.clone(),
            auth_mode: self.auth_mode,
            credentials: self.credentials.clone(),
            page_size: self.page_size,
            enabled_only: self.enabled_only,
            ssl_verify: self.ssl_verify,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn flag(
    lookup: impl Fn(&str) -> Option<String>,
    variable: &'static str,
) -> Result<Option<bool>, ConfigError> {
    let Some(value) = lookup(variable) else {
        return Ok(None);
    };
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::Invalid {
            variable,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}
