use chrono::{DateTime, Utc};

use crate::db::collection::{self, Placement};
use crate::db::models::{Policy, Region};
use crate::db::store::{latency, Store};
use crate::domain::{PolicyCategory, RegionType};
use crate::errors::FleetResult;
use crate::geo::Position;

/// Shown in place of a region name that no longer resolves.
pub const MISSING_REGION: &str = "—";

#[derive(Debug, Clone)]
pub struct NewRegion {
    pub name: String,
    pub region_type: RegionType,
    pub polygon: Vec<Position>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPolicy {
    pub region_id: String,
    pub title: String,
    pub content: String,
    pub category: PolicyCategory,
    pub effective_date: DateTime<Utc>,
}

pub async fn get_all(store: &Store) -> FleetResult<Vec<Region>> {
    store.pause(latency::READ).await;
    collection::load(store).await
}

pub async fn get_by_id(store: &Store, id: &str) -> FleetResult<Option<Region>> {
    store.pause(latency::LOOKUP).await;
    collection::find(store, id).await
}

pub async fn create(store: &Store, region: NewRegion) -> FleetResult<Region> {
    store.pause(latency::WRITE).await;
    collection::insert(store, Placement::Append, |id| Region {
        id,
        name: region.name,
        region_type: region.region_type,
        polygon: region.polygon,
        description: region.description,
        created_at: Utc::now(),
    })
    .await
}

pub async fn update(store: &Store, id: &str, region: NewRegion) -> FleetResult<Option<Region>> {
    store.pause(latency::WRITE).await;
    collection::modify(store, id, |current: &mut Region| {
        current.name = region.name;
        current.region_type = region.region_type;
        current.polygon = region.polygon;
        current.description = region.description;
        Ok(())
    })
    .await
}

pub async fn delete(store: &Store, id: &str) -> FleetResult<bool> {
    store.pause(latency::DELETE).await;
    collection::remove::<Region>(store, id).await
}

pub async fn get_policies(store: &Store) -> FleetResult<Vec<Policy>> {
    store.pause(latency::READ).await;
    collection::load(store).await
}

pub async fn get_policies_by_region(store: &Store, region_id: &str) -> FleetResult<Vec<Policy>> {
    store.pause(latency::READ).await;
    let policies: Vec<Policy> = collection::load(store).await?;
    Ok(policies
        .into_iter()
        .filter(|policy| policy.region_id == region_id)
        .collect())
}

pub async fn create_policy(store: &Store, policy: NewPolicy) -> FleetResult<Policy> {
    store.pause(latency::WRITE).await;
    collection::insert(store, Placement::Append, |id| Policy {
        id,
        region_id: policy.region_id,
        title: policy.title,
        content: policy.content,
        category: policy.category,
        effective_date: policy.effective_date,
        created_at: Utc::now(),
    })
    .await
}

pub async fn update_policy(
    store: &Store,
    id: &str,
    policy: NewPolicy,
) -> FleetResult<Option<Policy>> {
    store.pause(latency::WRITE).await;
    collection::modify(store, id, |current: &mut Policy| {
        current.region_id = policy.region_id;
        current.title = policy.title;
        current.content = policy.content;
        current.category = policy.category;
        current.effective_date = policy.effective_date;
        Ok(())
    })
    .await
}

pub async fn delete_policy(store: &Store, id: &str) -> FleetResult<bool> {
    store.pause(latency::DELETE).await;
    collection::remove::<Policy>(store, id).await
}

/// Name of the region a policy belongs to, or [`MISSING_REGION`].
pub fn region_name<'a>(regions: &'a [Region], region_id: &str) -> &'a str {
    regions
        .iter()
        .find(|region| region.id == region_id)
        .map_or(MISSING_REGION, |region| region.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::test_support::setup_test_store;

    #[tokio::test]
    async fn test_policies_filter_by_region() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;

        let port_rules = get_policies_by_region(&store, "r1").await?;

        assert_eq!(port_rules.len(), 1);
        assert_eq!(port_rules[0].id, "p1");
        assert!(get_policies_by_region(&store, "r9").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_region_name_falls_back_after_delete() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let policies = get_policies(&store).await?;

        assert_eq!(region_name(&get_all(&store).await?, &policies[0].region_id), "Bandar Abbas");
        assert!(delete(&store, "r1").await?);
        assert_eq!(
            region_name(&get_all(&store).await?, &policies[0].region_id),
            MISSING_REGION
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_update_policy() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let draft = NewPolicy {
            region_id: "r2".into(),
            title: "Speed limit".into(),
            content: "Ten knots inside the zone.".into(),
            category: PolicyCategory::Safety,
            effective_date: Utc::now(),
        };

        let created = create_policy(&store, draft.clone()).await?;
        assert!(created.id.starts_with('p'));

        let updated = update_policy(
            &store,
            &created.id,
            NewPolicy {
                title: "Eight knots".into(),
                ..draft
            },
        )
        .await?
        .ok_or("policy missing")?;
        assert_eq!(updated.title, "Eight knots");
        assert_eq!(get_policies_by_region(&store, "r2").await?.len(), 2);
        assert!(delete_policy(&store, &created.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_update_region() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let draft = NewRegion {
            name: "Anchorage".into(),
            region_type: RegionType::Port,
            polygon: vec![Position::new(27.0, 56.0), Position::new(27.1, 56.1)],
            description: None,
        };

        let created = create(&store, draft.clone()).await?;
        let updated = update(
            &store,
            &created.id,
            NewRegion {
                region_type: RegionType::Restricted,
                ..draft
            },
        )
        .await?
        .ok_or("region missing")?;

        assert_eq!(updated.region_type, RegionType::Restricted);
        assert_eq!(updated.created_at, created.created_at);
        assert!(get_by_id(&store, &created.id).await?.is_some());
        Ok(())
    }
}
