use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::feed::parse_feed;
use super::types::SearchResult;

const API_BASE: &str = "https://news.google.com/rss";
const MAX_RESPONSE_BYTES: usize = 10_000_000;

#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("news service returned status {0}")]
    Status(u16),

    #[error("response too large (>{} bytes)", MAX_RESPONSE_BYTES)]
    TooLarge,

    #[error("malformed feed: {0}")]
    Parse(#[from] quick_xml::de::DeError),

    #[error("invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A news search backend that answers a boolean query restricted to a relative window.
/// Implemented by `GoogleNewsClient` for production; fakes are used in tests.
pub trait NewsSearch {
    async fn search(&self, terms: &str, window: &str) -> Result<SearchResult, NewsError>;
}

/// Google News edition: interface language and country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    language: String,
    country: String,
}

impl Locale {
    pub fn new(language: &str, country: &str) -> Self {
        Self {
            language: language.trim().to_lowercase(),
            country: country.trim().to_uppercase(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn ceid(&self) -> String {
        format!("{}:{}", self.country, self.language)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en", "US")
    }
}

#[derive(Debug, Clone)]
pub struct GoogleNewsClient {
    http: Client,
    locale: Locale,
    base_url: String,
}

impl GoogleNewsClient {
    pub fn new(http: Client, locale: Locale) -> Self {
        Self {
            http,
            locale,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, locale: Locale, base_url: &str) -> Self {
        Self {
            http,
            locale,
            base_url: base_url.to_string(),
        }
    }

    fn search_url(&self, terms: &str, window: &str) -> Result<Url, NewsError> {
        let q = if window.is_empty() {
            terms.to_string()
        } else {
            format!("{terms} when:{window}")
        };

        let mut url = Url::parse(&format!("{}/search", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("q", &q)
            .append_pair("ceid", &self.locale.ceid())
            .append_pair("hl", self.locale.language())
            .append_pair("gl", self.locale.country());
        Ok(url)
    }

    async fn download(&self, url: Url) -> Result<Vec<u8>, NewsError> {
        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "news search failed");
            return Err(NewsError::Status(status.as_u16()));
        }

        if let Some(len) = response.content_length()
            && usize::try_from(len).map_or(true, |l| l > MAX_RESPONSE_BYTES)
        {
            return Err(NewsError::TooLarge);
        }

        let mut body = Vec::new();
        let mut stream = response;
        while let Some(chunk) = stream.chunk().await? {
            body.extend_from_slice(&chunk);
            if body.len() > MAX_RESPONSE_BYTES {
                return Err(NewsError::TooLarge);
            }
        }
        Ok(body)
    }
}

impl NewsSearch for GoogleNewsClient {
    async fn search(&self, terms: &str, window: &str) -> Result<SearchResult, NewsError> {
        let url = self.search_url(terms, window)?;
        debug!(url = %url, "news search");

        let body = self.download(url).await?;
        let result = parse_feed(&body)?;

        debug!(entries = result.entries.len(), "news search complete");
        Ok(result)
    }
}
