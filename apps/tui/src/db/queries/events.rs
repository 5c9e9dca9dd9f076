use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::db::collection::{self, Placement};
use crate::db::models::{Event, EventLocation};
use crate::db::store::{latency, Store};
use crate::domain::EventCategory;
use crate::errors::{FleetError, FleetResult};

/// Fields for a new event. The registration count always starts at zero.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: EventLocation,
    pub category: EventCategory,
    pub max_participants: Option<u32>,
}

pub async fn get_all(store: &Store) -> FleetResult<Vec<Event>> {
    store.pause(latency::READ).await;
    collection::load(store).await
}

pub async fn get_by_id(store: &Store, id: &str) -> FleetResult<Option<Event>> {
    store.pause(latency::LOOKUP).await;
    collection::find(store, id).await
}

pub async fn create(store: &Store, event: NewEvent) -> FleetResult<Event> {
    store.pause(latency::WRITE).await;
    collection::insert(store, Placement::Append, |id| Event {
        id,
        title: event.title,
        description: event.description,
        start_date: event.start_date,
        end_date: event.end_date,
        location: event.location,
        category: event.category,
        max_participants: event.max_participants,
        registered_count: 0,
        created_at: Utc::now(),
    })
    .await
}

/// Replaces the editable fields; id, registrations and creation time are kept.
pub async fn update(store: &Store, id: &str, event: NewEvent) -> FleetResult<Option<Event>> {
    store.pause(latency::WRITE).await;
    collection::modify(store, id, |current: &mut Event| {
        current.title = event.title;
        current.description = event.description;
        current.start_date = event.start_date;
        current.end_date = event.end_date;
        current.location = event.location;
        current.category = event.category;
        current.max_participants = event.max_participants;
        Ok(())
    })
    .await
}

pub async fn delete(store: &Store, id: &str) -> FleetResult<bool> {
    store.pause(latency::DELETE).await;
    collection::remove::<Event>(store, id).await
}

/// Takes one seat. Fails with [`FleetError::EventFull`] when the event is at
/// capacity, leaving the count untouched. `Ok(None)` means no such event.
pub async fn register(store: &Store, id: &str) -> FleetResult<Option<Event>> {
    store.pause(latency::WRITE).await;
    let result = collection::modify(store, id, |event: &mut Event| {
        if event.is_full() {
            return Err(FleetError::EventFull(event.id.clone()));
        }
        event.registered_count += 1;
        Ok(())
    })
    .await;

    match &result {
        Ok(Some(event)) => info!(id, registered = event.registered_count, "registered for event"),
        Err(FleetError::EventFull(_)) => warn!(id, "registration refused, event full"),
        _ => {}
    }
    result
}
