use chrono::Utc;
use tracing::info;

use crate::db::collection::{self, Placement};
use crate::db::models::{Contact, Service};
use crate::db::store::{latency, Store};
use crate::domain::{ServiceCategory, ServiceStatus};
use crate::errors::FleetResult;
use crate::geo::Position;

#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub category: ServiceCategory,
    pub description: String,
    pub location: Position,
    pub contact: Contact,
    pub rating: Option<f64>,
    pub status: ServiceStatus,
}

pub async fn get_all(store: &Store) -> FleetResult<Vec<Service>> {
    store.pause(latency::READ).await;
    collection::load(store).await
}

pub async fn get_by_id(store: &Store, id: &str) -> FleetResult<Option<Service>> {
    store.pause(latency::LOOKUP).await;
    collection::find(store, id).await
}

pub async fn create(store: &Store, service: NewService) -> FleetResult<Service> {
    store.pause(latency::WRITE).await;
    collection::insert(store, Placement::Append, |id| Service {
        id,
        name: service.name,
        category: service.category,
        description: service.description,
        location: service.location,
        contact: service.contact,
        rating: service.rating,
        status: service.status,
        created_at: Utc::now(),
    })
    .await
}

pub async fn update(store: &Store, id: &str, service: NewService) -> FleetResult<Option<Service>> {
    store.pause(latency::WRITE).await;
    collection::modify(store, id, |current: &mut Service| {
        current.name = service.name;
        current.category = service.category;
        current.description = service.description;
        current.location = service.location;
        current.contact = service.contact;
        current.rating = service.rating;
        current.status = service.status;
        Ok(())
    })
    .await
}

/// Approval workflow shortcut over [`update`].
pub async fn update_status(
    store: &Store,
    id: &str,
    status: ServiceStatus,
) -> FleetResult<Option<Service>> {
    store.pause(latency::WRITE).await;
    let updated = collection::modify(store, id, |service: &mut Service| {
        service.status = status;
        Ok(())
    })
    .await?;
    if updated.is_some() {
        info!(id, %status, "service status changed");
    }
    Ok(updated)
}

pub async fn delete(store: &Store, id: &str) -> FleetResult<bool> {
    store.pause(latency::DELETE).await;
    collection::remove::<Service>(store, id).await
}
