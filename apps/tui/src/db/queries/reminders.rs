use chrono::{DateTime, Utc};

use crate::db::collection::{self, Placement};
use crate::db::models::VesselReminder;
use crate::db::store::{latency, Store};
use crate::domain::{ReminderCategory, ReminderPriority, ReminderStatus};
use crate::errors::FleetResult;

#[derive(Debug, Clone)]
pub struct NewReminder {
    pub vessel_id: String,
    pub title: String,
    pub description: String,
    pub category: ReminderCategory,
    pub status: ReminderStatus,
    pub priority: ReminderPriority,
    pub due_date: DateTime<Utc>,
    pub related_document_id: Option<String>,
}

pub async fn get_all(store: &Store) -> FleetResult<Vec<VesselReminder>> {
    store.pause(latency::REMINDER_READ).await;
    collection::load(store).await
}

pub async fn get_by_vessel(store: &Store, vessel_id: &str) -> FleetResult<Vec<VesselReminder>> {
    store.pause(latency::REMINDER_READ).await;
    let reminders: Vec<VesselReminder> = collection::load(store).await?;
    Ok(reminders
        .into_iter()
        .filter(|reminder| reminder.vessel_id == vessel_id)
        .collect())
}

pub async fn create(store: &Store, reminder: NewReminder) -> FleetResult<VesselReminder> {
    store.pause(latency::REMINDER_WRITE).await;
    let now = Utc::now();
    collection::insert(store, Placement::Append, |id| VesselReminder {
        id,
        vessel_id: reminder.vessel_id,
        title: reminder.title,
        description: reminder.description,
        category: reminder.category,
        status: reminder.status,
        priority: reminder.priority,
        due_date: reminder.due_date,
        created_at: now,
        updated_at: now,
        related_document_id: reminder.related_document_id,
    })
    .await
}

pub async fn update(
    store: &Store,
    id: &str,
    reminder: NewReminder,
) -> FleetResult<Option<VesselReminder>> {
    store.pause(latency::REMINDER_WRITE).await;
    collection::modify(store, id, |current: &mut VesselReminder| {
        current.vessel_id = reminder.vessel_id;
        current.title = reminder.title;
        current.description = reminder.description;
        current.category = reminder.category;
        current.status = reminder.status;
        current.priority = reminder.priority;
        current.due_date = reminder.due_date;
        current.related_document_id = reminder.related_document_id;
        current.updated_at = Utc::now();
        Ok(())
    })
    .await
}

pub async fn set_status(
    store: &Store,
    id: &str,
    status: ReminderStatus,
) -> FleetResult<Option<VesselReminder>> {
    store.pause(latency::REMINDER_WRITE).await;
    collection::modify(store, id, |current: &mut VesselReminder| {
        current.status = status;
        current.updated_at = Utc::now();
        Ok(())
    })
    .await
}

pub async fn delete(store: &Store, id: &str) -> FleetResult<bool> {
    store.pause(latency::REMINDER_READ).await;
    collection::remove::<VesselReminder>(store, id).await
}
