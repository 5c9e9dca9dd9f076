use chrono::Utc;
use tracing::info;

use crate::config::CurrentUser;
use crate::db::collection::{self, Placement};
use crate::db::models::{Vessel, VesselDraft};
use crate::db::store::{latency, Store};
use crate::domain::VesselStatus;
use crate::errors::{FleetError, FleetResult};

pub async fn get_all(store: &Store) -> FleetResult<Vec<Vessel>> {
    store.pause(latency::READ).await;
    collection::load(store).await
}

pub async fn get_by_id(store: &Store, id: &str) -> FleetResult<Option<Vessel>> {
    store.pause(latency::LOOKUP).await;
    collection::find(store, id).await
}

pub async fn get_by_owner(store: &Store, owner_id: &str) -> FleetResult<Vec<Vessel>> {
    store.pause(latency::READ).await;
    let vessels: Vec<Vessel> = collection::load(store).await?;
    Ok(vessels
        .into_iter()
        .filter(|vessel| vessel.owner_id == owner_id)
        .collect())
}

/// Vessels `user` may see: everything for admins, their own for clients.
pub async fn get_visible(store: &Store, user: &CurrentUser) -> FleetResult<Vec<Vessel>> {
    if user.is_admin() {
        get_all(store).await
    } else {
        get_by_owner(store, &user.id).await
    }
}

/// Checks the ranges a vessel form enforces.
pub fn validate_draft(draft: &VesselDraft) -> FleetResult<()> {
    if draft.name.trim().is_empty() {
        return Err(FleetError::validation("name", "is required"));
    }
    if draft.speed.is_nan() || draft.speed < 0.0 {
        return Err(FleetError::validation("speed", "must be zero or more"));
    }
    if !(0.0..=360.0).contains(&draft.heading) {
        return Err(FleetError::validation("heading", "must be between 0 and 360"));
    }
    if !(-90.0..=90.0).contains(&draft.position.lat) {
        return Err(FleetError::validation("latitude", "must be between -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&draft.position.lng) {
        return Err(FleetError::validation(
            "longitude",
            "must be between -180 and 180",
        ));
    }
    Ok(())
}

/// Registers a vessel owned by `owner`. Client submissions always start `pending`.
pub async fn create(store: &Store, draft: VesselDraft, owner: &CurrentUser) -> FleetResult<Vessel> {
    validate_draft(&draft)?;
    store.pause(latency::WRITE).await;

    let status = if owner.is_admin() {
        draft.status.unwrap_or_default()
    } else {
        VesselStatus::Pending
    };

    let vessel = collection::insert(store, Placement::Append, |id| Vessel {
        id,
        name: draft.name.trim().to_string(),
        vessel_type: draft.vessel_type,
        status,
        owner_id: owner.id.clone(),
        owner_name: owner.name.clone(),
        speed: draft.speed,
        heading: draft.heading,
        position: draft.position,
        last_update: Utc::now(),
        imo: draft.imo,
        mmsi: draft.mmsi,
        call_sign: None,
        flag: draft.flag,
        length: None,
        beam: None,
        draft: None,
    })
    .await?;

    info!(id = %vessel.id, name = %vessel.name, status = %vessel.status, "vessel created");
    Ok(vessel)
}

/// Applies form edits. Owner and registry details outside the form are kept;
/// status only changes when the editor is an admin.
pub async fn update(
    store: &Store,
    id: &str,
    draft: VesselDraft,
    editor: &CurrentUser,
) -> FleetResult<Option<Vessel>> {
    validate_draft(&draft)?;
    store.pause(latency::WRITE).await;

    collection::modify(store, id, |vessel: &mut Vessel| {
        vessel.name = draft.name.trim().to_string();
        vessel.vessel_type = draft.vessel_type;
        if editor.is_admin() {
            if let Some(status) = draft.status {
                vessel.status = status;
            }
        }
        vessel.speed = draft.speed;
        vessel.heading = draft.heading;
        vessel.position = draft.position;
        vessel.imo = draft.imo;
        vessel.mmsi = draft.mmsi;
        vessel.flag = draft.flag;
        vessel.last_update = Utc::now();
        Ok(())
    })
    .await
}

pub async fn update_status(
    store: &Store,
    id: &str,
    status: VesselStatus,
) -> FleetResult<Option<Vessel>> {
    store.pause(latency::WRITE).await;
    let updated = collection::modify(store, id, |vessel: &mut Vessel| {
        vessel.status = status;
        vessel.last_update = Utc::now();
        Ok(())
    })
    .await?;

    if updated.is_some() {
        info!(id, %status, "vessel status changed");
    }
    Ok(updated)
}

pub async fn delete(store: &Store, id: &str) -> FleetResult<bool> {
    store.pause(latency::DELETE).await;
    collection::remove::<Vessel>(store, id).await
}
