// src/core/net.rs
// Page fetching. The engine only sees the `Fetch` trait; `HttpFetcher` is
// the reqwest-backed implementation the CLI uses.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::consts::{BASE_URL, HTTP_TIMEOUT_SECS, PAGE_SUFFIX, USER_AGENT};
use super::sanitize::page_title;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("bad page url: {0}")]
    Url(#[from] url::ParseError),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport(e) => e.status().map(|s| s.as_u16()),
            FetchError::Url(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Source of raw creature pages.
///
/// `endpoint` is the suffix after the creature's page title, e.g. `""` for
/// the main page or `"/Generation_IV_learnset"` for a historical learnset.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, creature: &str, endpoint: &str) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base(BASE_URL)
    }

    pub fn with_base(base: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base: Url::parse(base)? })
    }

    /// `Lopunny` + `/Generation_IV_learnset` →
    /// `<base>Lopunny_(Pok%C3%A9mon)/Generation_IV_learnset`
    pub fn page_url(&self, creature: &str, endpoint: &str) -> Result<Url, FetchError> {
        let path = endpoint.split('#').next().unwrap_or("");
        // "./" keeps titles like "Type:_Null" from parsing as a scheme
        let rel = join!("./", &page_title(creature), PAGE_SUFFIX, path);
        Ok(self.base.join(&rel)?)
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, creature: &str, endpoint: &str) -> Result<String, FetchError> {
        let url = self.page_url(creature, endpoint)?;
        let resp = self.client.get(url.clone()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), url: url.to_string() });
        }
        Ok(resp.text().await?)
    }
}
