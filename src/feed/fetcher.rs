use crate::error::{Error, Result};
use crate::feed::client::HttpClient;
use crate::feed::parser::FeedItemsMapper;
use crate::feed::{FeedImage, FeedLoader};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Loads the feed from a fixed endpoint.
///
/// Every call issues its own request; nothing is memoized here.
#[derive(Clone)]
pub struct RemoteFeedLoader {
    url: Url,
    client: Arc<dyn HttpClient>,
}

impl RemoteFeedLoader {
    pub fn new(url: Url, client: Arc<dyn HttpClient>) -> Self {
        Self { url, client }
    }

    pub async fn load(&self) -> Result<Vec<FeedImage>> {
        debug!("Loading feed from: {}", self.url);

        let response = self.client.get(&self.url).await.map_err(|e| {
            warn!("No response from {}: {}", self.url, e);
            Error::Connectivity
        })?;

        let images = FeedItemsMapper::map(&response.body, response.status)?;
        debug!("Loaded {} images from {}", images.len(), self.url);

        Ok(images)
    }
}

#[async_trait]
impl FeedLoader for RemoteFeedLoader {
    async fn load(&self) -> Result<Vec<FeedImage>> {
        RemoteFeedLoader::load(self).await
    }
}
