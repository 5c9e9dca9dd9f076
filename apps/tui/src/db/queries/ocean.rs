use tracing::debug;

use crate::db::collection::{self, Placement};
use crate::db::models::OceanReading;
use crate::db::store::{latency, Store};
use crate::errors::FleetResult;

pub async fn get_all(store: &Store) -> FleetResult<Vec<OceanReading>> {
    store.pause(latency::READ).await;
    collection::load(store).await
}

/// Newest reading. Readings are stored newest first.
pub async fn get_latest(store: &Store) -> FleetResult<Option<OceanReading>> {
    store.pause(latency::LOOKUP).await;
    let readings: Vec<OceanReading> = collection::load(store).await?;
    Ok(readings.into_iter().next())
}

pub async fn get_by_vessel(store: &Store, vessel_id: &str) -> FleetResult<Vec<OceanReading>> {
    store.pause(latency::READ).await;
    let readings: Vec<OceanReading> = collection::load(store).await?;
    Ok(readings
        .into_iter()
        .filter(|reading| reading.vessel_id.as_deref() == Some(vessel_id))
        .collect())
}

/// Records a reading; `reading.id` is replaced with a generated one.
pub async fn create(store: &Store, reading: OceanReading) -> FleetResult<OceanReading> {
    store.pause(latency::WRITE).await;
    let created = collection::insert(store, Placement::Prepend, |id| OceanReading {
        id,
        ..reading
    })
    .await?;
    debug!(id = %created.id, "ocean reading recorded");
    Ok(created)
}

pub async fn delete(store: &Store, id: &str) -> FleetResult<bool> {
    store.pause(latency::DELETE).await;
    collection::remove::<OceanReading>(store, id).await
}
