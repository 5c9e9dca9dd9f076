//! Generic record collections stored as JSON arrays under one key each.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::models::{
    Alert, AlertRule, Event, News, OceanReading, Policy, Region, Service, User, Vessel,
    VesselReminder,
};
use super::seed;
use super::store::Store;
use crate::errors::FleetResult;

/// A record kept in a collection of the fleet store.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Storage key of the collection.
    const KEY: &'static str;
    /// Prefix of generated ids.
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;

    /// Contents of the collection before anything was ever stored.
    fn seed() -> Vec<Self>;
}

/// Where [`insert`] puts a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Append,
    Prepend,
}

pub async fn load<R: Record>(store: &Store) -> FleetResult<Vec<R>> {
    store.get(R::KEY, R::seed).await
}

pub async fn find<R: Record>(store: &Store, id: &str) -> FleetResult<Option<R>> {
    Ok(load::<R>(store)
        .await?
        .into_iter()
        .find(|record| record.id() == id))
}

/// Builds a record around a fresh id and stores it.
pub async fn insert<R, F>(store: &Store, placement: Placement, build: F) -> FleetResult<R>
where
    R: Record,
    F: FnOnce(String) -> R,
{
    let _guard = store.write_lock().await;
    let mut records = load::<R>(store).await?;
    let record = build(next_id(&records));

    match placement {
        Placement::Append => records.push(record.clone()),
        Placement::Prepend => records.insert(0, record.clone()),
    }
    store.set(R::KEY, &records).await?;

    debug!(key = R::KEY, id = record.id(), "inserted record");
    Ok(record)
}

/// Applies `change` to the record with `id` and stores the result.
///
/// Returns `Ok(None)` when no record matches. When `change` fails nothing is written.
pub async fn modify<R, F>(store: &Store, id: &str, change: F) -> FleetResult<Option<R>>
where
    R: Record,
    F: FnOnce(&mut R) -> FleetResult<()>,
{
    let _guard = store.write_lock().await;
    let mut records = load::<R>(store).await?;
    let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
        return Ok(None);
    };

    change(record)?;
    let updated = record.clone();
    store.set(R::KEY, &records).await?;

    debug!(key = R::KEY, id, "modified record");
    Ok(Some(updated))
}

/// Removes the record with `id`. Returns whether anything was removed.
pub async fn remove<R: Record>(store: &Store, id: &str) -> FleetResult<bool> {
    let _guard = store.write_lock().await;
    let mut records = load::<R>(store).await?;
    let before = records.len();
    records.retain(|record| record.id() != id);

    if records.len() == before {
        return Ok(false);
    }
    store.set(R::KEY, &records).await?;

    debug!(key = R::KEY, id, "removed record");
    Ok(true)
}

/// `<prefix><unix millis>`, bumped past any id already taken.
pub fn next_id<R: Record>(existing: &[R]) -> String {
    let mut stamp = Utc::now().timestamp_millis();
    loop {
        let candidate = format!("{}{stamp}", R::ID_PREFIX);
        if !existing.iter().any(|record| record.id() == candidate) {
            return candidate;
        }
        stamp += 1;
    }
}

macro_rules! impl_record {
    ($ty:ty, $key:literal, $prefix:literal, $seed:path) => {
        impl Record for $ty {
            const KEY: &'static str = $key;
            const ID_PREFIX: &'static str = $prefix;

            fn id(&self) -> &str {
                &self.id
            }

            fn seed() -> Vec<Self> {
                $seed()
            }
        }
    };
}

impl_record!(Vessel, "maritime_vessels", "v", seed::vessels);
impl_record!(OceanReading, "maritime_ocean_readings", "or", seed::ocean_readings);
impl_record!(Region, "maritime_regions", "r", seed::regions);
impl_record!(Policy, "maritime_policies", "p", seed::policies);
impl_record!(News, "maritime_news", "n", seed::news);
impl_record!(Service, "maritime_services", "s", seed::services);
impl_record!(Event, "maritime_events", "e", seed::events);
impl_record!(VesselReminder, "maritime_vessel_reminders", "r", seed::reminders);
impl_record!(User, "maritime_users", "u", seed::users);
impl_record!(AlertRule, "maritime_alert_rules", "ar", seed::alert_rules);
impl_record!(Alert, "maritime_alerts", "a", Vec::new);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::create_memory_pool;
    use crate::errors::FleetError;

    async fn setup_test_store() -> Result<Store, sqlx::Error> {
        Ok(Store::new(create_memory_pool().await?, false))
    }

    #[tokio::test]
    async fn load_returns_seed_on_first_read() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;

        let vessels = load::<Vessel>(&store).await?;

        assert_eq!(vessels.len(), 3);
        assert_eq!(vessels[0].id, "v1");
        Ok(())
    }

    #[tokio::test]
    async fn insert_appends_or_prepends() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let template = load::<News>(&store).await?[0].clone();

        let front = insert(&store, Placement::Prepend, |id| News {
            id,
            title: "Front".into(),
            ..template.clone()
        })
        .await?;
        let back = insert(&store, Placement::Append, |id| News {
            id,
            title: "Back".into(),
            ..template.clone()
        })
        .await?;

        let news = load::<News>(&store).await?;
        assert_eq!(news.first().map(|n| n.id.as_str()), Some(front.id.as_str()));
        assert_eq!(news.last().map(|n| n.id.as_str()), Some(back.id.as_str()));
        assert!(front.id.starts_with('n'));
        assert_ne!(front.id, back.id);
        Ok(())
    }

    #[tokio::test]
    async fn failed_change_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;

        let result = modify::<Vessel, _>(&store, "v1", |vessel| {
            vessel.name = "Changed".into();
            Err(FleetError::validation("name", "rejected"))
        })
        .await;

        assert!(result.is_err());
        let vessel = find::<Vessel>(&store, "v1").await?;
        assert_ne!(vessel.map(|v| v.name), Some("Changed".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn modify_and_remove_report_missing_ids() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;

        let modified = modify::<Vessel, _>(&store, "nope", |_| Ok(())).await?;
        assert!(modified.is_none());
        assert!(!remove::<Vessel>(&store, "nope").await?);
        assert!(remove::<Vessel>(&store, "v3").await?);
        assert_eq!(load::<Vessel>(&store).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_modifications_are_not_lost() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;

        let first = modify::<Vessel, _>(&store, "v1", |vessel| {
            vessel.speed = 1.0;
            Ok(())
        });
        let second = modify::<Vessel, _>(&store, "v2", |vessel| {
            vessel.speed = 2.0;
            Ok(())
        });
        tokio::try_join!(first, second)?;

        let vessels = load::<Vessel>(&store).await?;
        assert_eq!(vessels[0].speed, 1.0);
        assert_eq!(vessels[1].speed, 2.0);
        Ok(())
    }

    #[test]
    fn next_id_skips_taken_ids() {
        let mut taken: Vec<Alert> = Vec::new();
        let first = next_id(&taken);
        taken.push(Alert {
            id: first.clone(),
            rule_id: "ar1".into(),
            vessel_id: None,
            level: crate::domain::AlertLevel::Info,
            message: String::new(),
            timestamp: Utc::now(),
            is_read: false,
        });

        let second = next_id(&taken);
        assert_ne!(first, second);
        assert!(second.starts_with('a'));
    }
}
