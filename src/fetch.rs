//! Loading article records from the listing API
//!
//! A single blocking GET per activation. Failures are not retried; [`load`]
//! folds them into a fixed message on the [`ViewState`].

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header;
use tracing::{debug, error, info};
use url::Url;

use crate::error::{Error, Result};
use crate::record::Article;

/// Listing endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3002/resources/get-resources";

/// Message shown in place of the table when the fetch fails
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load articles.";

/// Settings for the listing API client
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Full URL of the listing endpoint
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Thin wrapper around a blocking `reqwest` client bound to one endpoint
#[derive(Debug, Clone)]
pub struct ResourceClient {
    endpoint: Url,
    http: Client,
}

impl ResourceClient {
    pub fn new(config: &LoaderConfig) -> Result<Self> {
        let endpoint = parse_url(&config.endpoint)?;
        let http = build_http_client(config.timeout)?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the complete record list
    ///
    /// Non-2xx statuses and bodies that are not a JSON array of records are
    /// errors.
    pub fn fetch_articles(&self) -> Result<Vec<Article>> {
        debug!(url = %self.endpoint, "fetching articles");

        let response = self
            .http
            .get(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .send()?
            .error_for_status()?;

        let body = response.text()?;
        let articles: Vec<Article> = serde_json::from_str(&body)?;

        info!(count = articles.len(), "loaded articles");
        Ok(articles)
    }
}

/// Build the shared blocking HTTP client
pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Parse and validate an http(s) URL
pub(crate) fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Loader state: the three flags the table view is driven by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub articles: Vec<Article>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            articles: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl ViewState {
    /// Finished state holding a successfully fetched list
    pub fn loaded(articles: Vec<Article>) -> Self {
        Self {
            articles,
            loading: false,
            error: None,
        }
    }

    /// Finished state after a failed fetch
    pub fn failed() -> Self {
        Self {
            articles: Vec::new(),
            loading: false,
            error: Some(LOAD_ERROR_MESSAGE.to_string()),
        }
    }
}

/// Run the one fetch and settle the view state
pub fn load(client: &ResourceClient) -> ViewState {
    match client.fetch_articles() {
        Ok(articles) => ViewState::loaded(articles),
        Err(e) => {
            error!(error = %e, url = %client.endpoint(), "error fetching articles");
            ViewState::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_loading() {
        let state = ViewState::default();
        assert!(state.loading);
        assert!(state.error.is_none());
        assert!(state.articles.is_empty());
    }

    #[test]
    fn test_failed_state_carries_fixed_message() {
        let state = ViewState::failed();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Failed to load articles."));
    }

    #[test]
    fn test_parse_url_rejects_non_http() {
        assert!(parse_url(DEFAULT_ENDPOINT).is_ok());
        assert!(matches!(
            parse_url("ftp://localhost/resources"),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(parse_url("not a url"), Err(Error::InvalidUrl { .. })));
    }

    #[test]
    fn test_client_rejects_bad_endpoint() {
        let config = LoaderConfig {
            endpoint: "localhost:3002".to_string(),
            ..Default::default()
        };
        // "localhost:3002" parses with scheme "localhost"
        assert!(ResourceClient::new(&config).is_err());
    }
}
