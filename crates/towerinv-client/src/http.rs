//! HTTP client for the fleet-management API

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use url::{Origin, Url};

use towerinv_api::{Group, Host, InventorySummary, Page, Variables};

use crate::auth::{Auth, AuthMode, Credentials};
use crate::error::{ClientError, Result};
use crate::traits::InventorySource;

/// Default API root path
pub const DEFAULT_API_PATH: &str = "/api/v1";

/// Default number of items requested per list page
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Connection settings for [`TowerClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server, e.g. `https://tower.example.com`
    pub base_url: String,
    /// API root path appended to the base URL
    pub api_path: String,
    pub auth_mode: AuthMode,
    pub credentials: Credentials,
    /// Items requested per list page
    pub page_size: u32,
    /// Only list enabled hosts
    pub enabled_only: bool,
    /// Verify TLS certificates
    pub ssl_verify: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            api_path: DEFAULT_API_PATH.to_string(),
            auth_mode: AuthMode::default(),
            credentials,
            page_size: DEFAULT_PAGE_SIZE,
            enabled_only: false,
            ssl_verify: false,
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// HTTP implementation of [`InventorySource`]
#[derive(Debug, Clone)]
pub struct TowerClient {
    client: Client,
    base_url: String,
    /// Origin credentials may be sent to
    origin: Origin,
    api_path: String,
    auth: Auth,
    page_size: u32,
    enabled_only: bool,
}

impl TowerClient {
    /// Create a client and authenticate it
    ///
    /// In token mode this performs the login call once; every later request
    /// reuses the token.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built, the base URL is
    /// invalid, or the login fails.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tower-inventory/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(!config.ssl_verify)
            .build()?;
        Self::connect_with_client(config, client).await
    }

    /// Create a client around a custom `reqwest::Client` and authenticate it
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the login fails.
    pub async fn connect_with_client(config: ClientConfig, client: Client) -> Result<Self> {
        let origin = Url::parse(&config.base_url)?.origin();

        let mut this = Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            origin,
            api_path: normalize_api_path(&config.api_path),
            auth: Auth::Basic(config.credentials.clone()),
            page_size: config.page_size.max(1),
            enabled_only: config.enabled_only,
        };

        if config.auth_mode == AuthMode::Token {
            let token = this.login(&config.credentials).await?;
            this.auth = Auth::Token(token);
        }

        Ok(this)
    }

    /// Resolve a locator against the base URL
    ///
    /// Absolute URLs are used as-is when they share the base URL's origin;
    /// paths are appended to the base URL.
    fn url(&self, locator: &str) -> Result<Url> {
        match Url::parse(locator) {
            Ok(url) if url.origin() == self.origin => Ok(url),
            Ok(url) => Err(ClientError::InvalidResponse(format!(
                "link {url} leaves {}",
                self.origin.ascii_serialization()
            ))),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let separator = if locator.starts_with('/') { "" } else { "/" };
                Ok(Url::parse(&format!("{}{separator}{locator}", self.base_url))?)
            }
            Err(e) => Err(ClientError::Url(e)),
        }
    }

    /// Build a URL below the API root
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.url(&format!("{}/{}", self.api_path, path.trim_start_matches('/')))
    }

    #[instrument(skip(self, credentials), fields(user = %credentials.username))]
    async fn login(&self, credentials: &Credentials) -> Result<String> {
        let url = self.endpoint("authtoken/")?;
        debug!(%url, "requesting auth token");

        let response = self
            .client
            .post(url)
            .json(&LoginRequest {
                username: &credentials.username,
                password: &credentials.password,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Auth(format!("login returned {status}: {message}")));
        }

        let body: LoginResponse = response.json().await?;
        body.token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::Auth("login response carried no token".to_string()))
    }

    /// Perform an authenticated GET and check the status
    async fn send(&self, url: Url) -> Result<Response> {
        debug!(%url, "GET");
        let response = self.auth.apply(self.client.get(url)).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response)
    }

    /// Perform a GET request and deserialize the response
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let bytes = self.send(url).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Collect every page of a list endpoint
    async fn get_all<T: DeserializeOwned>(&self, mut url: Url) -> Result<Vec<T>> {
        url.query_pairs_mut()
            .append_pair("page_size", &self.page_size.to_string());

        let mut items = Vec::new();
        let mut visited = HashSet::new();
        loop {
            if !visited.insert(url.clone()) {
                return Err(ClientError::InvalidResponse(format!(
                    "pagination revisits {url}"
                )));
            }

            let page: Page<T> = self.get(url.clone()).await?;
            items.extend(page.results);

            let Some(next) = page.next.filter(|next| !next.is_empty()) else {
                break;
            };
            url = self.url(&next)?;
        }

        Ok(items)
    }

    /// Fetch a variable payload, treating an empty body as `{}`
    async fn get_variables(&self, url: Url) -> Result<Variables> {
        let bytes = self.send(url).await?.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Variables::new());
        }

        match serde_json::from_slice(&bytes)? {
            Value::Object(vars) => Ok(vars),
            Value::Null => Ok(Variables::new()),
            other => Err(ClientError::InvalidResponse(format!(
                "expected a variable mapping, got {other}"
            ))),
        }
    }
}

#[async_trait]
impl InventorySource for TowerClient {
    #[instrument(skip(self))]
    async fn list_inventories(&self) -> Result<Vec<InventorySummary>> {
        self.get_all(self.endpoint("inventories/")?).await
    }

    #[instrument(skip(self))]
    async fn list_groups(&self, inventory_id: &str) -> Result<Vec<Group>> {
        self.get_all(self.endpoint(&format!("inventories/{inventory_id}/groups/"))?)
            .await
    }

    #[instrument(skip(self, group), fields(group = %group.name))]
    async fn list_hosts(&self, group: &Group) -> Result<Vec<Host>> {
        let locator = group.related.all_hosts.as_deref().ok_or_else(|| {
            ClientError::MissingLocator {
                resource: "group",
                name: group.name.clone(),
                locator: "all_hosts",
            }
        })?;

        let mut url = self.url(locator)?;
        if self.enabled_only {
            url.query_pairs_mut().append_pair("enabled", "true");
        }
        self.get_all(url).await
    }

    #[instrument(skip(self))]
    async fn variables(&self, locator: &str) -> Result<Variables> {
        self.get_variables(self.url(locator)?).await
    }

    #[instrument(skip(self))]
    async fn inventory_variables(&self, inventory_id: &str) -> Result<Variables> {
        self.get_variables(self.endpoint(&format!("inventories/{inventory_id}/variable_data/"))?)
            .await
    }
}

fn normalize_api_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, api_path: &str) -> TowerClient {
        TowerClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            origin: Url::parse(base_url).unwrap().origin(),
            api_path: normalize_api_path(api_path),
            auth: Auth::Basic(Credentials::new("admin", "secret")),
            page_size: DEFAULT_PAGE_SIZE,
            enabled_only: false,
        }
    }

    #[test]
    fn test_normalize_api_path() {
        assert_eq!(normalize_api_path("/api/v1/"), "/api/v1");
        assert_eq!(normalize_api_path("api/v2"), "/api/v2");
        assert_eq!(normalize_api_path("/"), "");
    }

    #[test]
    fn test_endpoint_building() {
        let client = client("https://tower.example.com/", "/api/v1/");
        let url = client.endpoint("inventories/").unwrap();
        assert_eq!(url.as_str(), "https://tower.example.com/api/v1/inventories/");
    }

    #[test]
    fn test_related_locator_appended_to_base() {
        let client = client("https://tower.example.com", DEFAULT_API_PATH);
        let url = client.url("/api/v1/groups/4/all_hosts/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://tower.example.com/api/v1/groups/4/all_hosts/"
        );
    }

    #[test]
    fn test_base_url_path_prefix_kept() {
        let client = client("https://example.com/tower", DEFAULT_API_PATH);
        let url = client.url("/api/v1/hosts/1/variable_data/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/tower/api/v1/hosts/1/variable_data/"
        );
    }

    #[test]
    fn test_absolute_locator_used_as_is() {
        let client = client("https://tower.example.com", DEFAULT_API_PATH);
        let url = client
            .url("https://tower.example.com/api/v1/groups/?page=2")
            .unwrap();
        assert_eq!(url.as_str(), "https://tower.example.com/api/v1/groups/?page=2");
    }

    #[test]
    fn test_foreign_origin_rejected() {
        let client = client("https://tower.example.com", DEFAULT_API_PATH);

        for locator in [
            "https://other.example.com/api/v1/groups/?page=2",
            "http://tower.example.com/api/v1/groups/",
            "https://tower.example.com:8443/api/v1/groups/",
        ] {
            let err = client.url(locator).unwrap_err();
            assert!(matches!(err, ClientError::InvalidResponse(_)), "{locator}");
        }
    }
}
