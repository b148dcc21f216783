pub mod client;
pub mod fetcher;
pub mod parser;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::Result;

pub use client::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use fetcher::RemoteFeedLoader;
pub use parser::{FeedItemsMapper, RemoteFeedItem};

/// A single image in the feed, as the rest of the application sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl FeedImage {
    pub fn new(id: Uuid, description: Option<String>, location: Option<String>, url: Url) -> Self {
        Self {
            id,
            description,
            location,
            url,
        }
    }
}

/// Anything that can produce the current feed.
///
/// Implemented by both the remote and the local loader so callers can swap
/// one for the other.
#[async_trait]
pub trait FeedLoader: Send + Sync {
    async fn load(&self) -> Result<Vec<FeedImage>>;
}
