use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::clients::{ImdbClient, JustwatchClient, OmdbClient};
use crate::config::Config;

/// Read-only handles shared by all request handlers. The clients are
/// constructed once at startup; `omdb` is absent when no API key is
/// configured and its endpoints answer 503.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub imdb: Arc<ImdbClient>,
    pub omdb: Option<Arc<OmdbClient>>,
    pub justwatch: Arc<JustwatchClient>,
}

impl AppState {
    pub fn new(
        config: Config,
        imdb: ImdbClient,
        omdb: Option<OmdbClient>,
        justwatch: JustwatchClient,
    ) -> Self {
        Self {
            config: Arc::new(config),
            imdb: Arc::new(imdb),
            omdb: omdb.map(Arc::new),
            justwatch: Arc::new(justwatch),
        }
    }

    pub fn from_config(config: Config) -> Self {
        let omdb = match config.omdb_api_key.as_deref() {
            Some(key) if !key.is_empty() => Some(OmdbClient::new(key)),
            _ => {
                warn!("OMDB_API_KEY not set. OMDB features will be disabled.");
                None
            }
        };
        Self::new(config, ImdbClient::new(), omdb, JustwatchClient::new())
    }
}

pub fn build_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/health", get(crate::api::health))
        .route("/movies/search", get(crate::api::search_movies))
        .route("/movies/:id", get(crate::api::get_movie_by_id))
        .route("/omdb/:id", get(crate::api::get_omdb_movie));

    Router::new()
        .route("/", get(crate::api::index))
        .nest("/api/v1", v1)
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(axum::middleware::from_fn(crate::middleware::cors_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn bare_state() -> AppState {
        AppState::new(
            Config::default(),
            ImdbClient::new(),
            None,
            JustwatchClient::new(),
        )
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health_is_static() {
        let (status, body) = get_json(build_router(bare_state()), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["service"], "filmigo-api");
        assert!(body["version"].is_string());
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_root_docs_list_four_endpoints() {
        let (status, body) = get_json(build_router(bare_state()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"].as_object().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_invalid_imdb_id_is_rejected_without_backend_call() {
        let (status, body) = get_json(build_router(bare_state()), "/api/v1/movies/xyz123").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["example"], "tt0111161");
        assert!(body["error"].as_str().unwrap().contains("tt"));
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let app = build_router(bare_state());
        let (status, body) = get_json(app.clone(), "/api/v1/movies/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("'q'"));

        let (status, _) = get_json(app, "/api/v1/movies/search?q=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_omdb_endpoints_return_503_when_unconfigured() {
        let app = build_router(bare_state());
        let (status, body) = get_json(app.clone(), "/api/v1/movies/search?q=inception").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("API key"));

        let (status, _) = get_json(app, "/api/v1/omdb/tt0111161").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (status, _) = get_json(build_router(bare_state()), "/api/v2/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_options_preflight_short_circuits() {
        let app = build_router(bare_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/v1/movies/tt0111161")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()["Access-Control-Allow-Origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_headers_on_normal_responses() {
        let app = build_router(bare_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        assert!(response
            .headers()
            .contains_key("Access-Control-Allow-Methods"));
    }

    #[tokio::test]
    async fn test_movie_lookup_passes_backend_payload_through() {
        let server = httpmock::MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::GET).path("/title/tt0111161/");
            then.status(200).body(
                r#"<script type="application/ld+json">{"name":"The Shawshank Redemption","@type":"Movie"}</script>"#,
            );
        });

        let state = AppState::new(
            Config::default(),
            ImdbClient::with_base_url(&server.base_url()),
            None,
            JustwatchClient::new(),
        );
        let (status, body) = get_json(build_router(state), "/api/v1/movies/tt0111161").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["name"], "The Shawshank Redemption");
        assert!(body.get("source").is_none());
    }

    #[tokio::test]
    async fn test_movie_lookup_failure_is_404_with_id() {
        let server = httpmock::MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::GET);
            then.status(404);
        });

        let state = AppState::new(
            Config::default(),
            ImdbClient::with_base_url(&server.base_url()),
            None,
            JustwatchClient::new(),
        );
        let (status, body) = get_json(build_router(state), "/api/v1/movies/tt9999999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["id"], "tt9999999");
        assert_eq!(body["error"], "Movie not found");
    }

    #[tokio::test]
    async fn test_search_success_envelope() {
        let server = httpmock::MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::GET).query_param("s", "inception");
            then.status(200).json_body(json!({
                "Response": "True",
                "Search": [{"Title": "Inception", "imdbID": "tt1375666"}]
            }));
        });

        let state = AppState::new(
            Config::default(),
            ImdbClient::new(),
            Some(OmdbClient::with_base_url("testkey", &server.base_url())),
            JustwatchClient::new(),
        );
        let (status, body) =
            get_json(build_router(state), "/api/v1/movies/search?q=inception").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["query"], "inception");
        assert_eq!(body["results"][0]["imdbID"], "tt1375666");
    }

    #[tokio::test]
    async fn test_search_backend_failure_is_500() {
        let server = httpmock::MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::GET);
            then.status(502);
        });

        let state = AppState::new(
            Config::default(),
            ImdbClient::new(),
            Some(OmdbClient::with_base_url("testkey", &server.base_url())),
            JustwatchClient::new(),
        );
        let (status, body) =
            get_json(build_router(state), "/api/v1/movies/search?q=inception").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["query"], "inception");
    }

    #[tokio::test]
    async fn test_omdb_movie_is_tagged_with_source() {
        let server = httpmock::MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::GET).query_param("i", "tt1375666");
            then.status(200)
                .json_body(json!({"Response": "True", "Title": "Inception"}));
        });

        let state = AppState::new(
            Config::default(),
            ImdbClient::new(),
            Some(OmdbClient::with_base_url("testkey", &server.base_url())),
            JustwatchClient::new(),
        );
        let (status, body) = get_json(build_router(state), "/api/v1/omdb/tt1375666").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "omdb");
        assert_eq!(body["data"]["Title"], "Inception");
    }

    #[tokio::test]
    async fn test_omdb_in_band_error_is_404() {
        let server = httpmock::MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::GET);
            then.status(200)
                .json_body(json!({"Response": "False", "Error": "Movie not found!"}));
        });

        let state = AppState::new(
            Config::default(),
            ImdbClient::new(),
            Some(OmdbClient::with_base_url("testkey", &server.base_url())),
            JustwatchClient::new(),
        );
        let (status, body) = get_json(build_router(state), "/api/v1/omdb/anything").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Movie not found in OMDB");
        assert_eq!(body["id"], "anything");
    }
}
