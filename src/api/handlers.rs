use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;
use tracing::warn;

use super::types::*;
use crate::server::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

pub async fn index() -> Json<ApiIndex> {
    Json(ApiIndex::current())
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK".to_string(),
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        message: "Filmigo API is running successfully!".to_string(),
    })
}

/// GET /api/v1/movies/{id} — IMDB lookup. The id shape is checked before
/// any backend call is made.
pub async fn get_movie_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MovieEnvelope> {
    if !id.starts_with("tt") {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(
                ErrorBody::new("Invalid IMDB ID format. Must start with 'tt'")
                    .with_example("tt0111161"),
            ),
        ));
    }

    match state.imdb.get_movie(&id).await {
        Ok(data) => Ok(Json(MovieEnvelope {
            success: true,
            source: None,
            data,
        })),
        Err(e) => {
            warn!(id = %id, error = %e, "IMDB lookup failed");
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorBody::new("Movie not found").with_id(&id)),
            ))
        }
    }
}

/// GET /api/v1/movies/search?q= — OMDB title search.
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<SearchEnvelope> {
    let query = match params.get("q").map(String::as_str) {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(
                    ErrorBody::new("Query parameter 'q' is required")
                        .with_example("/api/v1/movies/search?q=inception"),
                ),
            ));
        }
    };

    let omdb = state.omdb.as_ref().ok_or_else(unavailable)?;

    match omdb.search(query).await {
        Ok(results) => Ok(Json(SearchEnvelope {
            success: true,
            query: query.to_string(),
            results,
        })),
        Err(e) => {
            warn!(query = %query, error = %e, "OMDB search failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Search failed").with_query(query)),
            ))
        }
    }
}

/// GET /api/v1/omdb/{id} — record from the secondary source, tagged with
/// its origin. No id validation here; OMDB rejects bad ids itself.
pub async fn get_omdb_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MovieEnvelope> {
    let omdb = state.omdb.as_ref().ok_or_else(unavailable)?;

    match omdb.get_movie(&id).await {
        Ok(data) => Ok(Json(MovieEnvelope {
            success: true,
            source: Some("omdb".to_string()),
            data,
        })),
        Err(e) => {
            warn!(id = %id, error = %e, "OMDB lookup failed");
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorBody::new("Movie not found in OMDB").with_id(&id)),
            ))
        }
    }
}

fn unavailable() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorBody::new(
            "OMDB service unavailable. API key not configured.",
        )),
    )
}
