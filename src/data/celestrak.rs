//! CelesTrak GP element set client
//!
//! This module fetches the current two-line element set for a single object
//! from CelesTrak's GP query endpoint and splits the plain-text response into
//! an [`ElementSet`].

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use super::ElementSet;

/// Base URL for the CelesTrak GP query API
const CELESTRAK_GP_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

/// NORAD catalog number of the International Space Station
pub const ISS_CATALOG_NUMBER: u32 = 25544;

/// Errors that can occur when fetching an element set
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The request did not complete within the client timeout
    #[error("Request timed out")]
    Timeout,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned HTTP {0}")]
    Status(u16),

    /// Response body did not contain a full element set
    #[error("Malformed element set: expected 3 lines, got {lines}")]
    Malformed { lines: usize },
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else {
            NetworkError::Request(err)
        }
    }
}

/// Something that can produce the current element set of the tracked object
///
/// The dashboard only ever talks to CelesTrak; the trait exists so the cache
/// can be driven by an in-process source.
#[allow(async_fn_in_trait)]
pub trait ElementSource {
    /// Fetch the latest element set
    async fn fetch(&self) -> Result<ElementSet, NetworkError>;
}

/// Client for fetching element sets from CelesTrak
#[derive(Debug, Clone)]
pub struct CelestrakClient {
    client: Client,
    base_url: String,
    catalog_number: u32,
}

impl CelestrakClient {
    /// Create a client for one catalog number with the given request timeout
    pub fn new(catalog_number: u32, timeout: Duration) -> Result<Self, NetworkError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: CELESTRAK_GP_URL.to_string(),
            catalog_number,
        })
    }

    /// Point the client at a different GP endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full query URL for the tracked object
    pub fn url(&self) -> String {
        format!("{}?CATNR={}&FORMAT=TLE", self.base_url, self.catalog_number)
    }
}

impl ElementSource for CelestrakClient {
    async fn fetch(&self) -> Result<ElementSet, NetworkError> {
        let url = self.url();
        debug!(%url, "fetching element set");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let elements = parse_element_set(&text)?;

        info!(object = %elements.name, catalog_number = self.catalog_number, "fetched element set");
        Ok(elements)
    }
}

/// Split a plain-text GP response into an element set
///
/// The first three lines are taken as name, line 1 and line 2. Bodies with
/// fewer lines are rejected rather than partially filled.
pub fn parse_element_set(body: &str) -> Result<ElementSet, NetworkError> {
    let lines: Vec<&str> = body
        .trim()
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();

    match lines.as_slice() {
        [name, line1, line2, ..] => Ok(ElementSet {
            name: name.trim().to_string(),
            line1: line1.to_string(),
            line2: line2.to_string(),
        }),
        _ => Err(NetworkError::Malformed { lines: lines.len() }),
    }
}
