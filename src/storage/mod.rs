pub mod cache;
pub mod persistent_cache;
pub mod repository;
pub mod traits;

pub use cache::CachePolicy;
pub use persistent_cache::FileFeedStore;
pub use repository::{Clock, LocalFeedLoader};
pub use traits::{CachedFeed, FeedStore, InMemoryFeedStore, LocalFeedImage, RetrievedCache};
