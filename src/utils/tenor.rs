//! Utilities for interacting with the Tenor GIF search API (v2).
//! Requires the `TENOR_API_KEY` environment variable.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serenity::async_trait;
use thiserror::Error;
use tracing::debug;

/// Maximum number of results requested per search.
pub const SEARCH_LIMIT: u8 = 10;

/// Errors that can occur during Tenor API interactions.
#[derive(Error, Debug)]
pub enum TenorError {
    /// Error during HTTP request communication, including non-2xx statuses.
    #[error("API communication failure: {0}")]
    Api(#[from] reqwest::Error),

    /// Error parsing the JSON response from the API.
    #[error("Unable to parse response: {0}")]
    Json(#[from] serde_json::Error),
}

/// The overall structure of a Tenor search response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TenorSearchResponse {
    #[serde(default)]
    pub results: Vec<TenorResult>,
}

/// A single search result.
#[derive(Debug, Serialize, Deserialize)]
pub struct TenorResult {
    #[serde(default)]
    pub media_formats: TenorMediaFormats,
}

/// The renditions Tenor offers for a result. Only the plain GIF is used.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TenorMediaFormats {
    pub gif: Option<TenorMedia>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TenorMedia {
    pub url: String,
}

/// Searches Tenor and returns the GIF media URLs of every result.
///
/// An empty list means the search succeeded but found nothing.
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    client_key: &str,
    query: &str,
) -> Result<Vec<String>, TenorError> {
    let url = format!("{}/v2/search", base_url);
    let limit = SEARCH_LIMIT.to_string();

    let response = client
        .get(&url)
        .query(&[
            ("q", query),
            ("key", api_key),
            ("client_key", client_key),
            ("limit", limit.as_str()),
        ])
        .header("Accept", "application/json")
        .send()
        .await?
        .error_for_status()?;

    let body = response.text().await?;
    let parsed: TenorSearchResponse = serde_json::from_str(&body)?;

    let urls: Vec<String> = parsed
        .results
        .into_iter()
        .filter_map(|result| result.media_formats.gif.map(|gif| gif.url))
        .collect();
    debug!("Tenor returned {} GIFs for \"{}\"", urls.len(), query);

    Ok(urls)
}

/// GIF search as seen by the command handlers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GifSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<String>, TenorError>;
}

/// `GifSearch` backed by the Tenor HTTP API.
pub struct TenorClient {
    client: Client,
    base_url: String,
    api_key: String,
    client_key: String,
}

impl TenorClient {
    pub fn new(client: Client, base_url: String, api_key: String, client_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            client_key,
        }
    }
}

#[async_trait]
impl GifSearch for TenorClient {
    async fn search(&self, query: &str) -> Result<Vec<String>, TenorError> {
        search(
            &self.client,
            &self.base_url,
            &self.api_key,
            &self.client_key,
            query,
        )
        .await
    }
}
