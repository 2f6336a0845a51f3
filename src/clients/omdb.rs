use serde_json::Value;

use super::{ClientError, REQUEST_TIMEOUT};

const OMDB_BASE_URL: &str = "https://www.omdbapi.com";

/// Client for the OMDB JSON API. Requires an API key; the gateway only
/// constructs one when a key is configured.
pub struct OmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, OMDB_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Look up a single record by IMDB id (`i=` parameter).
    pub async fn get_movie(&self, id: &str) -> Result<Value, ClientError> {
        self.request(&[("i", id), ("plot", "full")]).await
    }

    /// Title search (`s=` parameter). Returns the `Search` result list.
    pub async fn search(&self, query: &str) -> Result<Value, ClientError> {
        let body = self.request(&[("s", query)]).await?;
        match body.get("Search") {
            Some(results) => Ok(results.clone()),
            None => Err(ClientError::Decode("missing Search field".to_string())),
        }
    }

    async fn request(&self, params: &[(&str, &str)]) -> Result<Value, ClientError> {
        let mut url = format!(
            "{}/?apikey={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        );
        for (key, value) in params {
            url.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
        }

        let response = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        let body: Value = response.json().await?;
        check_response(body)
    }
}

/// OMDB reports failures in-band with HTTP 200: `{"Response":"False",
/// "Error":"Movie not found!"}`.
fn check_response(body: Value) -> Result<Value, ClientError> {
    if body.get("Response").and_then(Value::as_str) == Some("False") {
        let message = body
            .get("Error")
            .and_then(Value::as_str)
            .unwrap_or("unknown OMDB error")
            .to_string();
        return Err(ClientError::NotFound(message));
    }
    Ok(body)
}
