use chrono::Utc;

use crate::db::collection::{self, Placement};
use crate::db::models::News;
use crate::db::store::{latency, Store};
use crate::domain::NewsCategory;
use crate::errors::FleetResult;

#[derive(Debug, Clone)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    pub category: NewsCategory,
    pub region_id: Option<String>,
}

pub async fn get_all(store: &Store) -> FleetResult<Vec<News>> {
    store.pause(latency::READ).await;
    collection::load(store).await
}

pub async fn get_by_id(store: &Store, id: &str) -> FleetResult<Option<News>> {
    store.pause(latency::LOOKUP).await;
    collection::find(store, id).await
}

/// Publishes an unread item at the top of the feed.
pub async fn create(store: &Store, item: NewNews) -> FleetResult<News> {
    store.pause(latency::WRITE).await;
    collection::insert(store, Placement::Prepend, |id| News {
        id,
        title: item.title,
        content: item.content,
        category: item.category,
        region_id: item.region_id,
        published_at: Utc::now(),
        is_read: false,
    })
    .await
}

pub async fn mark_as_read(store: &Store, id: &str) -> FleetResult<Option<News>> {
    store.pause(latency::WRITE).await;
    collection::modify(store, id, |item: &mut News| {
        item.is_read = true;
        Ok(())
    })
    .await
}

pub async fn delete(store: &Store, id: &str) -> FleetResult<bool> {
    store.pause(latency::DELETE).await;
    collection::remove::<News>(store, id).await
}
