use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::feed::{FeedImage, FeedLoader};
use crate::storage::cache::CachePolicy;
use crate::storage::traits::{FeedStore, LocalFeedImage, RetrievedCache};

/// Source of "now" for timestamping and staleness checks.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Saves the feed into a [`FeedStore`] and loads it back while it is fresh.
///
/// Every in-flight store call lives inside the future returned by `save`,
/// `load` or `validate_cache`, and that future borrows the loader. The loader
/// therefore outlives any call made on its behalf, and dropping the future
/// abandons whatever phase had not started yet.
#[derive(Clone)]
pub struct LocalFeedLoader {
    store: Arc<dyn FeedStore>,
    current_date: Clock,
}

impl LocalFeedLoader {
    pub fn new(store: Arc<dyn FeedStore>) -> Self {
        Self::with_clock(store, Utc::now)
    }

    pub fn with_clock<F>(store: Arc<dyn FeedStore>, current_date: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            store,
            current_date: Arc::new(current_date),
        }
    }

    /// Replace the cache with `feed`, stamped with the current time.
    ///
    /// Deletion always completes first; a failed deletion is returned as-is
    /// and no insertion is attempted.
    pub async fn save(&self, feed: &[FeedImage]) -> Result<()> {
        if let Err(e) = self.store.delete_cached_feed().await {
            warn!("Cache deletion failed, skipping insertion: {}", e);
            return Err(e);
        }

        self.cache(feed).await
    }

    async fn cache(&self, feed: &[FeedImage]) -> Result<()> {
        let local: Vec<LocalFeedImage> = feed.iter().cloned().map(LocalFeedImage::from).collect();
        let timestamp = (self.current_date)();

        self.store.insert(&local, timestamp).await?;
        info!("Cached {} images at {}", local.len(), timestamp);
        Ok(())
    }

    /// Load the cached feed. An empty or expired cache yields an empty feed.
    pub async fn load(&self) -> Result<Vec<FeedImage>> {
        match self.store.retrieve().await? {
            RetrievedCache::Found(cached)
                if CachePolicy::validate(cached.timestamp, (self.current_date)()) =>
            {
                debug!("Cache hit with {} images", cached.feed.len());
                Ok(cached.feed.into_iter().map(FeedImage::from).collect())
            }
            RetrievedCache::Found(cached) => {
                debug!("Cache from {} has expired", cached.timestamp);
                Ok(Vec::new())
            }
            RetrievedCache::Empty => {
                debug!("Cache is empty");
                Ok(Vec::new())
            }
        }
    }

    /// Delete the cache when it cannot be read or has expired.
    pub async fn validate_cache(&self) -> Result<()> {
        match self.store.retrieve().await {
            Err(e) => {
                warn!("Cache retrieval failed, deleting cache: {}", e);
                self.store.delete_cached_feed().await
            }
            Ok(RetrievedCache::Found(cached))
                if !CachePolicy::validate(cached.timestamp, (self.current_date)()) =>
            {
                info!("Deleting expired cache from {}", cached.timestamp);
                self.store.delete_cached_feed().await
            }
            Ok(_) => Ok(()),
        }
    }
}

#[async_trait]
impl FeedLoader for LocalFeedLoader {
    async fn load(&self) -> Result<Vec<FeedImage>> {
        LocalFeedLoader::load(self).await
    }
}
