use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{Error, Result};
use crate::storage::traits::{CachedFeed, FeedStore, LocalFeedImage, RetrievedCache};

const CACHE_VERSION: u32 = 1;

/// On-disk document for the cached feed
#[derive(Debug, Serialize, Deserialize)]
struct PersistentCacheData {
    cache_version: u32,
    feed: Vec<LocalFeedImage>,
    timestamp: DateTime<Utc>,
}

/// Feed store backed by a single JSON file.
///
/// Inserts go to a sibling `.tmp` file that is renamed over the target, so a
/// reader sees either the previous cache or the new one.
pub struct FileFeedStore {
    cache_file: PathBuf,
}

impl FileFeedStore {
    pub fn new(cache_file: impl Into<PathBuf>) -> Self {
        Self {
            cache_file: cache_file.into(),
        }
    }

    /// Get cache file path for debugging
    pub fn cache_path(&self) -> &Path {
        &self.cache_file
    }

    fn temp_file(&self) -> PathBuf {
        self.cache_file.with_extension("tmp")
    }
}

#[async_trait]
impl FeedStore for FileFeedStore {
    async fn delete_cached_feed(&self) -> Result<()> {
        match fs::remove_file(&self.cache_file).await {
            Ok(()) => {
                tracing::debug!("Deleted cache file {}", self.cache_file.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(format!(
                "Failed to delete cache file '{}': {}",
                self.cache_file.display(),
                e
            ))),
        }
    }

    async fn insert(&self, feed: &[LocalFeedImage], timestamp: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.cache_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::Storage(format!(
                        "Failed to create cache directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let data = PersistentCacheData {
            cache_version: CACHE_VERSION,
            feed: feed.to_vec(),
            timestamp,
        };
        let json_content = serde_json::to_vec_pretty(&data)?;

        let temp_file = self.temp_file();
        fs::write(&temp_file, json_content).await.map_err(|e| {
            Error::Storage(format!(
                "Failed to write cache to '{}': {}",
                temp_file.display(),
                e
            ))
        })?;

        if let Err(e) = fs::rename(&temp_file, &self.cache_file).await {
            let _ = fs::remove_file(&temp_file).await;
            return Err(Error::Storage(format!(
                "Failed to rename cache file '{}' to '{}': {}",
                temp_file.display(),
                self.cache_file.display(),
                e
            )));
        }

        tracing::info!(
            "Saved cache: {} images to {}",
            data.feed.len(),
            self.cache_file.display()
        );

        Ok(())
    }

    async fn retrieve(&self) -> Result<RetrievedCache> {
        let file_content = match fs::read(&self.cache_file).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Cache file does not exist: {}", self.cache_file.display());
                return Ok(RetrievedCache::Empty);
            }
            Err(e) => {
                return Err(Error::Storage(format!(
                    "Failed to read cache file '{}': {}",
                    self.cache_file.display(),
                    e
                )))
            }
        };

        let data: PersistentCacheData = serde_json::from_slice(&file_content)?;
        if data.cache_version != CACHE_VERSION {
            return Err(Error::Storage(format!(
                "Unsupported cache version {} in '{}'",
                data.cache_version,
                self.cache_file.display()
            )));
        }

        Ok(RetrievedCache::Found(CachedFeed {
            feed: data.feed,
            timestamp: data.timestamp,
        }))
    }
}
