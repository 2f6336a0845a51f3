use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SERVICE_NAME: &str = "filmigo-api";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub message: String,
}

/// Success wrapper for single-record lookups. The payload is whatever the
/// backend returned; the gateway never looks inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub success: bool,
    pub query: String,
    pub results: Value,
}

/// Failure wrapper. Contextual fields are present only when they apply
/// to the failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl ErrorBody {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            id: None,
            query: None,
            example: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }

    pub fn with_example(mut self, example: &str) -> Self {
        self.example = Some(example.to_string());
        self
    }
}

/// Documentation object served at the root path.
#[derive(Debug, Clone, Serialize)]
pub struct ApiIndex {
    pub message: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: EndpointDocs,
    pub examples: ExampleDocs,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointDocs {
    pub health: &'static str,
    pub movie_by_id: &'static str,
    pub search: &'static str,
    pub omdb_movie: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExampleDocs {
    pub get_movie: &'static str,
    pub search_movies: &'static str,
    pub omdb_data: &'static str,
    pub health_check: &'static str,
}

impl ApiIndex {
    pub fn current() -> Self {
        Self {
            message: "Welcome to Filmigo API",
            version: SERVICE_VERSION,
            description: "A REST API for movie data",
            endpoints: EndpointDocs {
                health: "GET /api/v1/health",
                movie_by_id: "GET /api/v1/movies/{imdb_id}",
                search: "GET /api/v1/movies/search?q={query}",
                omdb_movie: "GET /api/v1/omdb/{imdb_id}",
            },
            examples: ExampleDocs {
                get_movie: "/api/v1/movies/tt0111161",
                search_movies: "/api/v1/movies/search?q=inception",
                omdb_data: "/api/v1/omdb/tt0111161",
                health_check: "/api/v1/health",
            },
        }
    }
}
