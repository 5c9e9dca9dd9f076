use chrono::Utc;
use tracing::info;

use crate::db::collection::{self, Placement};
use crate::db::models::{Alert, AlertConditions, AlertRule};
use crate::db::store::{latency, Store};
use crate::domain::AlertLevel;
use crate::errors::FleetResult;

#[derive(Debug, Clone)]
pub struct NewAlertRule {
    pub name: String,
    pub conditions: AlertConditions,
    pub alert_level: AlertLevel,
    pub message: String,
    pub notify_owner: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewAlert {
    pub rule_id: String,
    pub vessel_id: Option<String>,
    pub level: AlertLevel,
    pub message: String,
}

pub async fn get_rules(store: &Store) -> FleetResult<Vec<AlertRule>> {
    store.pause(latency::READ).await;
    collection::load(store).await
}

pub async fn create_rule(store: &Store, rule: NewAlertRule) -> FleetResult<AlertRule> {
    store.pause(latency::WRITE).await;
    collection::insert(store, Placement::Append, |id| AlertRule {
        id,
        name: rule.name,
        conditions: rule.conditions,
        alert_level: rule.alert_level,
        message: rule.message,
        notify_owner: rule.notify_owner,
        is_active: rule.is_active,
        created_at: Utc::now(),
    })
    .await
}

pub async fn update_rule(
    store: &Store,
    id: &str,
    rule: NewAlertRule,
) -> FleetResult<Option<AlertRule>> {
    store.pause(latency::WRITE).await;
    collection::modify(store, id, |current: &mut AlertRule| {
        current.name = rule.name;
        current.conditions = rule.conditions;
        current.alert_level = rule.alert_level;
        current.message = rule.message;
        current.notify_owner = rule.notify_owner;
        current.is_active = rule.is_active;
        Ok(())
    })
    .await
}

pub async fn delete_rule(store: &Store, id: &str) -> FleetResult<bool> {
    store.pause(latency::DELETE).await;
    collection::remove::<AlertRule>(store, id).await
}

pub async fn get_all(store: &Store) -> FleetResult<Vec<Alert>> {
    store.pause(latency::READ).await;
    collection::load(store).await
}

pub async fn get_unread(store: &Store) -> FleetResult<Vec<Alert>> {
    store.pause(latency::READ).await;
    let alerts: Vec<Alert> = collection::load(store).await?;
    Ok(alerts.into_iter().filter(|alert| !alert.is_read).collect())
}

pub async fn mark_as_read(store: &Store, id: &str) -> FleetResult<Option<Alert>> {
    store.pause(latency::WRITE).await;
    collection::modify(store, id, |alert: &mut Alert| {
        alert.is_read = true;
        Ok(())
    })
    .await
}

/// Records an unread alert at the top of the list.
pub async fn create(store: &Store, alert: NewAlert) -> FleetResult<Alert> {
    store.pause(latency::WRITE).await;
    let created = collection::insert(store, Placement::Prepend, |id| Alert {
        id,
        rule_id: alert.rule_id,
        vessel_id: alert.vessel_id,
        level: alert.level,
        message: alert.message,
        timestamp: Utc::now(),
        is_read: false,
    })
    .await?;
    info!(id = %created.id, rule = %created.rule_id, level = %created.level, "alert raised");
    Ok(created)
}
