pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use feed::{FeedImage, FeedLoader, HttpClient, HttpResponse, RemoteFeedLoader};
pub use storage::{CachePolicy, FeedStore, LocalFeedImage, LocalFeedLoader, RetrievedCache};
