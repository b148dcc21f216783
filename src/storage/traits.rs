use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::Result;
use crate::feed::FeedImage;

/// Persisted form of a [`FeedImage`].
///
/// Kept separate from the domain type so the stored schema can change on
/// its own schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl From<FeedImage> for LocalFeedImage {
    fn from(image: FeedImage) -> Self {
        Self {
            id: image.id,
            description: image.description,
            location: image.location,
            url: image.url,
        }
    }
}

impl From<LocalFeedImage> for FeedImage {
    fn from(local: LocalFeedImage) -> Self {
        Self {
            id: local.id,
            description: local.description,
            location: local.location,
            url: local.url,
        }
    }
}

/// The whole cache: one feed and the instant it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedFeed {
    pub feed: Vec<LocalFeedImage>,
    pub timestamp: DateTime<Utc>,
}

/// Successful outcome of [`FeedStore::retrieve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievedCache {
    Empty,
    Found(CachedFeed),
}

/// Persistence backend for the cached feed.
///
/// Each call resolves exactly once. The store does not order concurrent
/// calls; callers that care must serialize them.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Remove the cached feed. Succeeds when nothing is cached.
    async fn delete_cached_feed(&self) -> Result<()>;

    /// Replace the cached feed. Expected to follow a successful delete.
    async fn insert(&self, feed: &[LocalFeedImage], timestamp: DateTime<Utc>) -> Result<()>;

    /// Read the cached feed without modifying it.
    async fn retrieve(&self) -> Result<RetrievedCache>;
}

/// Memory-only store for testing and development
#[derive(Default)]
pub struct InMemoryFeedStore {
    cache: RwLock<Option<CachedFeed>>,
}

impl InMemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_none()
    }
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    async fn delete_cached_feed(&self) -> Result<()> {
        *self.cache.write() = None;
        Ok(())
    }

    async fn insert(&self, feed: &[LocalFeedImage], timestamp: DateTime<Utc>) -> Result<()> {
        *self.cache.write() = Some(CachedFeed {
            feed: feed.to_vec(),
            timestamp,
        });
        Ok(())
    }

    async fn retrieve(&self) -> Result<RetrievedCache> {
        Ok(match self.cache.read().as_ref() {
            Some(cached) => RetrievedCache::Found(cached.clone()),
            None => RetrievedCache::Empty,
        })
    }
}
