use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSettings {
    #[serde(default = "default_feed_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::parse(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but environment overrides apply before validation.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::parse(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("{}: {}", path.as_ref().display(), e)))?;

        Ok(toml::from_str(&content)?)
    }

    /// Defaults plus environment overrides, for when no config file exists.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.feed.url)
            .map_err(|_| Error::InvalidUrl(self.feed.url.clone()))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::InvalidUrl(format!("Unsupported scheme: {}", scheme)));
            }
        }

        if self.http.timeout == 0 {
            return Err(Error::Config("Timeout must be greater than 0".to_string()));
        }

        if self.cache.path.as_os_str().is_empty() {
            return Err(Error::Config("Cache path cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn feed_url(&self) -> Result<url::Url> {
        url::Url::parse(&self.feed.url).map_err(|_| Error::InvalidUrl(self.feed.url.clone()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("FEED_LOADER_URL") {
            self.feed.url = url;
        }

        if let Ok(path) = std::env::var("FEED_LOADER_CACHE_PATH") {
            self.cache.path = PathBuf::from(path);
        }

        if let Ok(level) = std::env::var("FEED_LOADER_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("feed-loader"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    pub fn default_config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_feed_url() -> String { "https://example.com/feed".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_user_agent() -> String {
    format!("feed-loader/{}", env!("CARGO_PKG_VERSION"))
}
fn default_cache_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("feed-loader")
        .join("feed.json")
}
fn default_log_level() -> String { "warn".to_string() }
