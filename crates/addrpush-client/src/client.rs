//! Device API client implementation.

use crate::api::*;
use crate::{xml, PanosError, Result};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Path of the XML API on every device
const API_PATH: &str = "/api/";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Placeholder shown instead of secrets in displayed requests
const REDACTED: &str = "*****";

/// Client for one firewall or Panorama
#[derive(Clone)]
pub struct PanosClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl PanosClient {
    /// Create a builder for the device at `host` (IP or FQDN)
    #[must_use]
    pub fn builder(host: impl Into<String>) -> PanosClientBuilder {
        PanosClientBuilder::new(host)
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns true if an API key is set
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.api_key.is_some()
    }

    /// Copy of this client that sends `key` with every request
    #[must_use]
    pub fn with_api_key(&self, key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: self.inner.http.clone(),
                base_url: self.inner.base_url.clone(),
                api_key: Some(key.into()),
            }),
        }
    }

    /// Exchange credentials for an API key and return an authenticated client
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Self> {
        let key = self.keygen().generate(username, password).await?;
        Ok(self.with_api_key(key))
    }

    /// Access the key generation endpoint
    #[must_use]
    pub fn keygen(&self) -> KeygenApi<'_> {
        KeygenApi::new(self)
    }

    /// Access raw configuration get/set
    #[must_use]
    pub fn config(&self) -> ConfigApi<'_> {
        ConfigApi::new(self)
    }

    /// Access operational commands
    #[must_use]
    pub fn op(&self) -> OpApi<'_> {
        OpApi::new(self)
    }

    /// Access address objects, groups and device layout
    #[must_use]
    pub fn objects(&self) -> ObjectsApi<'_> {
        ObjectsApi::new(self)
    }

    /// Perform an unauthenticated GET request and return the response body
    pub(crate) async fn get_public(&self, params: &[(&str, &str)]) -> Result<String> {
        self.send(params.to_vec()).await
    }

    /// Perform an authenticated GET request and return the response body
    pub(crate) async fn get(&self, params: &[(&str, &str)]) -> Result<String> {
        let key = self.inner.api_key.as_deref().ok_or(PanosError::MissingKey)?;
        let mut query = params.to_vec();
        query.push(("key", key));
        self.send(query).await
    }

    async fn send(&self, query: Vec<(&str, &str)>) -> Result<String> {
        let url = self.api_url();
        debug!(
            request_type = param(&query, "type"),
            action = param(&query, "action"),
            xpath = param(&query, "xpath"),
            "GET request"
        );

        let response = self.inner.http.get(&url).query(&query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match xml::ensure_success(&body) {
            Ok(()) => Ok(body),
            Err(PanosError::Xml(_) | PanosError::UnexpectedResponse(_)) if !status.is_success() => {
                warn!(status = status.as_u16(), "non-XML error response");
                Err(PanosError::Api {
                    code: Some(status.as_u16()),
                    message: status.canonical_reason().unwrap_or("HTTP error").to_string(),
                })
            }
            Err(e) => {
                warn!(error = %e, "request failed");
                Err(e)
            }
        }
    }

    fn api_url(&self) -> String {
        format!("{}{API_PATH}", self.inner.base_url.trim_end_matches('/'))
    }

    /// The full request URL for `params` with the API key redacted.
    ///
    /// Used to show the user exactly which call failed.
    #[must_use]
    pub fn describe(&self, params: &[(&str, &str)]) -> String {
        let mut query = params.to_vec();
        if self.is_authenticated() {
            query.push(("key", REDACTED));
        }
        match Url::parse_with_params(&self.api_url(), &query) {
            Ok(url) => url.to_string(),
            Err(_) => self.api_url(),
        }
    }

    /// Length of a `config set` request for `xpath` with an empty element.
    ///
    /// This is the per-request overhead when packing elements into batches.
    #[must_use]
    pub fn envelope_len(&self, xpath: &str) -> usize {
        let key = self.inner.api_key.as_deref().unwrap_or_default();
        let query = [
            ("type", "config"),
            ("action", "set"),
            ("xpath", xpath),
            ("element", ""),
            ("key", key),
        ];
        Url::parse_with_params(&self.api_url(), &query)
            .map_or_else(|_| self.api_url().len(), |url| url.as_str().len())
    }
}

fn param<'a>(query: &[(&str, &'a str)], name: &str) -> &'a str {
    query
        .iter()
        .find(|(k, _)| *k == name)
        .map_or("", |(_, v)| *v)
}

/// Builder for configuring a [`PanosClient`]
pub struct PanosClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    user_agent: String,
    accept_invalid_certs: bool,
}

impl PanosClientBuilder {
    /// Create a new builder for the device at `host`
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            base_url: format!("https://{}", host.into()),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("addrpush/{}", env!("CARGO_PKG_VERSION")),
            accept_invalid_certs: false,
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use an existing API key instead of calling keygen
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Accept self-signed or otherwise unverifiable certificates
    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PanosClient> {
        if self.accept_invalid_certs {
            warn!(base_url = %self.base_url, "TLS certificate verification disabled");
        }

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| PanosError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(PanosClient {
            inner: Arc::new(ClientInner {
                http,
                base_url: self.base_url,
                api_key: self.api_key,
            }),
        })
    }
}
