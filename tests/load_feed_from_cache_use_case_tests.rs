use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use feed_loader::storage::{CachedFeed, RetrievedCache};
use feed_loader::{FeedLoader, LocalFeedLoader};

use feed_store_spy::{FeedStoreSpy, ReceivedMessage};
use test_data::*;

/// Tests for loading (and validating) the feed from the local cache
/// Staleness is checked against a fixed clock so the 7 day boundary is exact

fn make_sut(now: DateTime<Utc>) -> (LocalFeedLoader, Arc<FeedStoreSpy>) {
    let store = Arc::new(FeedStoreSpy::default());
    let sut = LocalFeedLoader::with_clock(store.clone(), move || now);
    (sut, store)
}

fn found(feed: Vec<feed_loader::LocalFeedImage>, timestamp: DateTime<Utc>) -> RetrievedCache {
    RetrievedCache::Found(CachedFeed { feed, timestamp })
}

#[test]
fn test_new_does_not_message_store() {
    let (_sut, store) = make_sut(fixed_now());
    assert!(store.received_messages().is_empty());
}

#[tokio::test]
async fn test_load_requests_cache_retrieval() {
    let (sut, store) = make_sut(fixed_now());

    let _ = sut.load().await;

    assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
}

#[tokio::test]
async fn test_load_fails_on_retrieval_error() {
    let (sut, store) = make_sut(fixed_now());
    store.complete_retrieval(Err(any_error("retrieval failed")));

    let error = sut.load().await.unwrap_err();

    assert!(is_storage_error(&error, "retrieval failed"), "got {:?}", error);
}

#[tokio::test]
async fn test_load_delivers_no_images_on_empty_cache() {
    let (sut, store) = make_sut(fixed_now());
    store.complete_retrieval(Ok(RetrievedCache::Empty));

    let images = sut.load().await.unwrap();

    assert!(images.is_empty());
    assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
}

#[tokio::test]
async fn test_load_delivers_cached_images_on_less_than_seven_days_old_cache() {
    let now = fixed_now();
    let timestamp = now - max_cache_age() + Duration::seconds(1);
    let (models, local) = unique_images();
    let (sut, store) = make_sut(now);
    store.complete_retrieval(Ok(found(local, timestamp)));

    assert_eq!(sut.load().await.unwrap(), models);
}

#[tokio::test]
async fn test_load_delivers_no_images_on_seven_days_old_cache() {
    let now = fixed_now();
    let (_, local) = unique_images();
    let (sut, store) = make_sut(now);
    store.complete_retrieval(Ok(found(local, now - max_cache_age())));

    assert!(sut.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_load_delivers_no_images_on_more_than_seven_days_old_cache() {
    let now = fixed_now();
    let (_, local) = unique_images();
    let (sut, store) = make_sut(now);
    store.complete_retrieval(Ok(found(local, now - max_cache_age() - Duration::seconds(1))));

    assert!(sut.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_load_has_no_side_effects_on_expired_cache() {
    let now = fixed_now();
    let (_, local) = unique_images();
    let (sut, store) = make_sut(now);
    store.complete_retrieval(Ok(found(local, now - max_cache_age() - Duration::days(1))));

    sut.load().await.unwrap();

    assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
}

#[tokio::test]
async fn test_load_has_no_side_effects_on_retrieval_error() {
    let (sut, store) = make_sut(fixed_now());
    store.complete_retrieval(Err(any_error("retrieval failed")));

    let _ = sut.load().await;

    assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
}

#[tokio::test]
async fn test_load_through_feed_loader_trait() {
    let now = fixed_now();
    let (models, local) = unique_images();
    let (sut, store) = make_sut(now);
    store.complete_retrieval(Ok(found(local, now)));

    let loader: Arc<dyn FeedLoader> = Arc::new(sut);

    assert_eq!(loader.load().await.unwrap(), models);
}

#[tokio::test]
async fn test_validate_cache_deletes_cache_on_retrieval_error() {
    let (sut, store) = make_sut(fixed_now());
    store.complete_retrieval(Err(any_error("retrieval failed")));

    sut.validate_cache().await.unwrap();

    assert_eq!(
        store.received_messages(),
        vec![ReceivedMessage::Retrieve, ReceivedMessage::DeleteCachedFeed]
    );
}

#[tokio::test]
async fn test_validate_cache_does_not_delete_empty_cache() {
    let (sut, store) = make_sut(fixed_now());
    store.complete_retrieval(Ok(RetrievedCache::Empty));

    sut.validate_cache().await.unwrap();

    assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
}

#[tokio::test]
async fn test_validate_cache_does_not_delete_fresh_cache() {
    let now = fixed_now();
    let (_, local) = unique_images();
    let (sut, store) = make_sut(now);
    store.complete_retrieval(Ok(found(local, now - max_cache_age() + Duration::seconds(1))));

    sut.validate_cache().await.unwrap();

    assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
}

#[tokio::test]
async fn test_validate_cache_deletes_seven_days_old_cache() {
    let now = fixed_now();
    let (_, local) = unique_images();
    let (sut, store) = make_sut(now);
    store.complete_retrieval(Ok(found(local, now - max_cache_age())));

    sut.validate_cache().await.unwrap();

    assert_eq!(
        store.received_messages(),
        vec![ReceivedMessage::Retrieve, ReceivedMessage::DeleteCachedFeed]
    );
}

#[tokio::test]
async fn test_validate_cache_reports_deletion_error() {
    let now = fixed_now();
    let (_, local) = unique_images();
    let (sut, store) = make_sut(now);
    store.complete_retrieval(Ok(found(local, now - max_cache_age())));
    store.complete_deletion(Err(any_error("deletion failed")));

    let error = sut.validate_cache().await.unwrap_err();

    assert!(is_storage_error(&error, "deletion failed"), "got {:?}", error);
}
