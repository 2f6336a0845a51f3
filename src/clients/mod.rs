pub mod imdb;
pub mod justwatch;
pub mod omdb;

pub use imdb::ImdbClient;
pub use justwatch::JustwatchClient;
pub use omdb::OmdbClient;

use std::time::Duration;

/// Applied to every outbound backend call. The upstream services publish
/// no latency guarantees, so a bound is needed to keep request handlers
/// from hanging on a stalled connection.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {0} from backend")]
    Status(u16),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}
