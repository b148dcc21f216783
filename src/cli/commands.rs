use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::feed::{FeedImage, ReqwestHttpClient, RemoteFeedLoader};
use crate::storage::{FileFeedStore, LocalFeedLoader};

/// Load the configuration file, falling back to defaults when it is absent.
///
/// Environment overrides apply in both cases.
pub fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let config_file = match config_path {
        Some(path) => path,
        None => Config::default_config_file()?,
    };

    if config_file.exists() {
        Config::load_with_env(&config_file)
    } else {
        Config::from_env()
    }
}

/// Write a default configuration file
pub fn init(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_file = match config_path {
        Some(path) => path,
        None => Config::default_config_file()?,
    };

    if config_file.exists() && !force {
        warn!("Configuration file already exists: {}", config_file.display());
        println!("Configuration already exists at {}", config_file.display());
        return Ok(());
    }

    Config::default().save(&config_file)?;
    info!("Created default configuration: {}", config_file.display());
    println!("Wrote configuration to {}", config_file.display());
    Ok(())
}

/// Load from the remote endpoint and cache the result.
///
/// When the remote load fails the cached feed is shown instead, and the
/// remote error is still returned if the cache has nothing to offer.
pub async fn fetch(config: &Config, url_override: Option<String>) -> Result<()> {
    let images = fetch_with_fallback(config, url_override).await?;
    print_feed(&images);
    Ok(())
}

pub async fn fetch_with_fallback(
    config: &Config,
    url_override: Option<String>,
) -> Result<Vec<FeedImage>> {
    let url = match url_override {
        Some(url) => url::Url::parse(&url).map_err(|_| Error::InvalidUrl(url))?,
        None => config.feed_url()?,
    };

    let client = ReqwestHttpClient::new(config.timeout(), config.http.user_agent.clone())?;
    let remote = RemoteFeedLoader::new(url, Arc::new(client));
    let local = local_loader(config);

    match remote.load().await {
        Ok(images) => {
            if let Err(e) = local.save(&images).await {
                warn!("Failed to cache feed: {}", e);
            }
            Ok(images)
        }
        Err(remote_error) => {
            warn!("Remote load failed ({}), using cached feed", remote_error);
            let cached = local.load().await.unwrap_or_else(|e| {
                warn!("Cached feed unavailable: {}", e);
                Vec::new()
            });
            if cached.is_empty() {
                Err(remote_error)
            } else {
                Ok(cached)
            }
        }
    }
}

/// Show the cached feed
pub async fn cached(config: &Config) -> Result<()> {
    let images = local_loader(config).load().await?;
    print_feed(&images);
    Ok(())
}

/// Drop the cache if it is expired or unreadable
pub async fn validate(config: &Config) -> Result<()> {
    local_loader(config).validate_cache().await?;
    println!("Cache validated");
    Ok(())
}

/// Delete the cached feed
pub async fn clear(config: &Config) -> Result<()> {
    use crate::storage::FeedStore;

    FileFeedStore::new(&config.cache.path).delete_cached_feed().await?;
    info!("Cleared cache at {}", config.cache.path.display());
    println!("Cache cleared");
    Ok(())
}

fn local_loader(config: &Config) -> LocalFeedLoader {
    LocalFeedLoader::new(Arc::new(FileFeedStore::new(&config.cache.path)))
}

fn print_feed(images: &[FeedImage]) {
    if images.is_empty() {
        println!("No images available");
        return;
    }

    for image in images {
        println!("{}  {}", image.id, image.url);
        if let Some(description) = &image.description {
            println!("    {}", description);
        }
        if let Some(location) = &image.location {
            println!("    @ {}", location);
        }
    }
}

pub fn init_logging(debug: bool, verbose: bool, level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(debug)
        .with_line_number(debug)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized");
    Ok(())
}
