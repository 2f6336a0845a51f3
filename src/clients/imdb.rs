use regex::Regex;
use serde_json::Value;

use super::{ClientError, REQUEST_TIMEOUT};

const IMDB_BASE_URL: &str = "https://www.imdb.com";

// IMDB serves a stripped-down page to clients without a browser UA.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Scraper client for IMDB title pages. There is no official IMDB API;
/// the structured metadata is lifted from the JSON-LD block every title
/// page embeds for search engines.
pub struct ImdbClient {
    http: reqwest::Client,
    base_url: String,
    json_ld: Regex,
}

impl ImdbClient {
    pub fn new() -> Self {
        Self::with_base_url(IMDB_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            json_ld: json_ld_regex(),
        }
    }

    /// Fetch a title page and return its JSON-LD metadata block verbatim.
    pub async fn get_movie(&self, id: &str) -> Result<Value, ClientError> {
        let url = format!("{}/title/{}/", self.base_url, urlencoding::encode(id));

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("no IMDB title {}", id)));
        }
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        let html = response.text().await?;
        extract_json_ld(&self.json_ld, &html)
            .ok_or_else(|| ClientError::NotFound(format!("no metadata on IMDB page for {}", id)))
    }
}

impl Default for ImdbClient {
    fn default() -> Self {
        Self::new()
    }
}

fn json_ld_regex() -> Regex {
    Regex::new(r#"(?s)<script type="application/ld\+json">(.*?)</script>"#).unwrap()
}

fn extract_json_ld(re: &Regex, html: &str) -> Option<Value> {
    let captures = re.captures(html)?;
    serde_json::from_str(captures.get(1)?.as_str()).ok()
}
