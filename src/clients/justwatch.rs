use serde_json::{json, Value};

use super::{ClientError, REQUEST_TIMEOUT};

const JUSTWATCH_GRAPHQL_URL: &str = "https://apis.justwatch.com/graphql";

const TITLE_QUERY: &str = r#"
query GetTitleNode($nodeId: ID!, $country: Country!) {
  node(id: $nodeId) {
    id
    ... on MovieOrShow {
      content(country: $country, language: "en") {
        title
        originalReleaseYear
        shortDescription
      }
      offers(country: $country, platform: WEB) {
        monetizationType
        standardWebURL
        package { clearName }
      }
    }
  }
}
"#;

/// Client for the JustWatch GraphQL API (streaming availability).
pub struct JustwatchClient {
    http: reqwest::Client,
    graphql_url: String,
    country: String,
}

impl JustwatchClient {
    pub fn new() -> Self {
        Self::with_graphql_url(JUSTWATCH_GRAPHQL_URL)
    }

    pub fn with_graphql_url(graphql_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            graphql_url: graphql_url.to_string(),
            country: "US".to_string(),
        }
    }

    /// Look up a title node and return its content and offers verbatim.
    pub async fn get_title(&self, node_id: &str) -> Result<Value, ClientError> {
        let payload = json!({
            "query": TITLE_QUERY,
            "variables": { "nodeId": node_id, "country": self.country },
        });

        let response = self
            .http
            .post(&self.graphql_url)
            .json(&payload)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        let body: Value = response.json().await?;
        extract_node(body, node_id)
    }
}

impl Default for JustwatchClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Unwrap the GraphQL envelope. A null `node` means the id is unknown;
/// a populated `errors` array is a decode-level failure.
fn extract_node(body: Value, node_id: &str) -> Result<Value, ClientError> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let message = errors[0]
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown GraphQL error");
            return Err(ClientError::Decode(message.to_string()));
        }
    }

    match body.pointer("/data/node") {
        Some(node) if !node.is_null() => Ok(node.clone()),
        _ => Err(ClientError::NotFound(format!(
            "no JustWatch title {}",
            node_id
        ))),
    }
}
