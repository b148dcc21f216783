use crate::error::{Error, Result};
use crate::feed::FeedImage;
use serde::Deserialize;
use tracing::warn;
use url::Url;
use uuid::Uuid;

const OK_200: u16 = 200;

/// Feed entry as it appears in the endpoint's JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteFeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Url,
}

impl From<RemoteFeedItem> for FeedImage {
    fn from(item: RemoteFeedItem) -> Self {
        FeedImage {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.image,
        }
    }
}

#[derive(Deserialize)]
struct Root {
    items: Vec<RemoteFeedItem>,
}

pub struct FeedItemsMapper;

impl FeedItemsMapper {
    /// Decodes a response into images, keeping payload order.
    ///
    /// Decoding is all-or-nothing: one malformed item rejects the payload.
    pub fn map(body: &[u8], status: u16) -> Result<Vec<FeedImage>> {
        if status != OK_200 {
            warn!("Feed endpoint answered with HTTP {}", status);
            return Err(Error::InvalidData);
        }

        let root: Root = serde_json::from_slice(body).map_err(|e| {
            warn!("Failed to decode feed payload: {}", e);
            Error::InvalidData
        })?;

        Ok(root.items.into_iter().map(FeedImage::from).collect())
    }
}
