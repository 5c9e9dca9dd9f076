//! Everything a screen shows, loaded in one pass.

use tracing::debug;

use crate::config::CurrentUser;
use crate::db::models::{
    Alert, AlertRule, Event, News, OceanReading, Policy, Region, Service, User, Vessel,
    VesselReminder,
};
use crate::db::queries::{alerts, events, news, ocean, regions, reminders, services, users, vessels};
use crate::db::Store;
use crate::errors::FleetResult;
use crate::snapshot::SnapshotInput;

#[derive(Debug, Clone, Default)]
pub struct FleetData {
    /// Only the vessels the current user may see.
    pub vessels: Vec<Vessel>,
    pub readings: Vec<OceanReading>,
    pub events: Vec<Event>,
    pub regions: Vec<Region>,
    pub policies: Vec<Policy>,
    pub services: Vec<Service>,
    pub news: Vec<News>,
    pub users: Vec<User>,
    pub reminders: Vec<VesselReminder>,
    pub alert_rules: Vec<AlertRule>,
    pub alerts: Vec<Alert>,
}

impl FleetData {
    /// Reads every collection concurrently. The slowest call sets the wait.
    pub async fn load(store: &Store, user: &CurrentUser) -> FleetResult<Self> {
        let (
            vessels,
            readings,
            events,
            regions,
            policies,
            services,
            news,
            users,
            reminders,
            alert_rules,
            alerts,
        ) = tokio::try_join!(
            vessels::get_visible(store, user),
            ocean::get_all(store),
            events::get_all(store),
            regions::get_all(store),
            regions::get_policies(store),
            services::get_all(store),
            news::get_all(store),
            users::get_all(store),
            reminders::get_all(store),
            alerts::get_rules(store),
            alerts::get_all(store),
        )?;

        debug!(
            vessels = vessels.len(),
            readings = readings.len(),
            events = events.len(),
            "fleet data loaded"
        );

        Ok(Self {
            vessels,
            readings,
            events,
            regions,
            policies,
            services,
            news,
            users,
            reminders,
            alert_rules,
            alerts,
        })
    }

    pub fn snapshot_input(&self) -> SnapshotInput<'_> {
        SnapshotInput {
            vessels: &self.vessels,
            readings: &self.readings,
            events: &self.events,
            regions: &self.regions,
            policies: &self.policies,
            services: &self.services,
            users: &self.users,
            news: &self.news,
            alerts: &self.alerts,
            reminders: &self.reminders,
        }
    }

    pub fn vessel(&self, id: &str) -> Option<&Vessel> {
        self.vessels.iter().find(|vessel| vessel.id == id)
    }

    /// Readings are stored newest first.
    pub fn latest_reading(&self) -> Option<&OceanReading> {
        self.readings.first()
    }

    pub fn reminders_for<'a>(&'a self, vessel_id: &'a str) -> impl Iterator<Item = &'a VesselReminder> {
        self.reminders
            .iter()
            .filter(move |reminder| reminder.vessel_id == vessel_id)
    }

    pub fn policies_for<'a>(&'a self, region_id: &'a str) -> impl Iterator<Item = &'a Policy> {
        self.policies
            .iter()
            .filter(move |policy| policy.region_id == region_id)
    }

    /// Policies whose region has been deleted.
    pub fn orphan_policies(&self) -> impl Iterator<Item = &Policy> {
        self.policies.iter().filter(|policy| {
            !self
                .regions
                .iter()
                .any(|region| region.id == policy.region_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::test_support::setup_test_store;
    use crate::domain::UserRole;

    #[tokio::test]
    async fn load_reads_seeded_collections() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let data = FleetData::load(&store, &CurrentUser::default()).await?;

        assert_eq!(data.vessels.len(), 3);
        assert_eq!(data.readings.len(), 20);
        assert_eq!(data.users.len(), 3);
        assert_eq!(data.alert_rules.len(), 2);
        assert!(data.alerts.is_empty());
        assert!(data.latest_reading().is_some());
        Ok(())
    }

    #[tokio::test]
    async fn repeated_loads_agree() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let first = FleetData::load(&store, &CurrentUser::default()).await?;
        let second = FleetData::load(&store, &CurrentUser::default()).await?;
        assert_eq!(first.readings, second.readings);
        assert_eq!(first.vessels, second.vessels);
        Ok(())
    }

    #[tokio::test]
    async fn clients_only_load_their_own_vessels() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let stranger = CurrentUser {
            id: "u3".into(),
            name: "Guest".into(),
            role: UserRole::Client,
        };
        let data = FleetData::load(&store, &stranger).await?;
        assert!(data.vessels.is_empty());
        assert_eq!(data.readings.len(), 20);
        Ok(())
    }

    #[tokio::test]
    async fn policies_outlive_their_region() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let before = FleetData::load(&store, &CurrentUser::default()).await?;
        assert_eq!(before.orphan_policies().count(), 0);

        let region_id = before.policies[0].region_id.clone();
        assert!(regions::delete(&store, &region_id).await?);
        let after = FleetData::load(&store, &CurrentUser::default()).await?;

        let orphans: Vec<_> = after.orphan_policies().collect();
        assert!(!orphans.is_empty());
        assert!(orphans.iter().all(|policy| policy.region_id == region_id));
        Ok(())
    }

    #[tokio::test]
    async fn reminders_filter_by_vessel() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let data = FleetData::load(&store, &CurrentUser::default()).await?;
        assert!(data
            .reminders_for("v1")
            .all(|reminder| reminder.vessel_id == "v1"));
        Ok(())
    }
}
