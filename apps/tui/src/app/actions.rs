use std::path::Path;

use fleetwatch::alerts;
use fleetwatch::config::CurrentUser;
use fleetwatch::db::models::{
    Alert, AlertRule, Event, News, OceanReading, Service, User, Vessel, VesselReminder,
};
use fleetwatch::db::queries::alerts::NewAlert;
use fleetwatch::db::queries::{
    alerts as alert_queries, events, news, reminders, services, users, vessels,
};
use fleetwatch::db::Store;
use fleetwatch::domain::{ServiceStatus, UserStatus, VesselStatus};
use fleetwatch::export::FleetExport;
use fleetwatch::fleet::FleetData;
use fleetwatch::radar::RadarScope;
use fleetwatch::snapshot;
use fleetwatch::{FleetError, FleetResult};
use tracing::info;

use crate::app::state::VesselFormState;

/// Store calls the screens make on behalf of the current user.
#[derive(Debug, Clone)]
pub struct AppActions {
    store: Option<Store>,
    user: CurrentUser,
}

fn found<T>(kind: &'static str, id: &str, value: Option<T>) -> FleetResult<T> {
    value.ok_or_else(|| FleetError::NotFound {
        kind,
        id: id.to_string(),
    })
}

fn removed(kind: &'static str, id: &str, deleted: bool) -> FleetResult<()> {
    found(kind, id, deleted.then_some(()))
}

impl AppActions {
    pub const fn new(user: CurrentUser) -> Self {
        Self { store: None, user }
    }

    pub fn attach(&mut self, store: Store) {
        self.store = Some(store);
    }

    pub fn store(&self) -> FleetResult<&Store> {
        self.store.as_ref().ok_or(FleetError::NotInitialized)
    }

    /// Creates or updates the vessel behind `form`.
    pub async fn save_vessel(&self, form: &VesselFormState) -> FleetResult<Vessel> {
        let store = self.store()?;
        let draft = form.to_draft()?;
        match &form.vessel_id {
            Some(id) => found(
                "Vessel",
                id,
                vessels::update(store, id, draft, &self.user).await?,
            ),
            None => vessels::create(store, draft, &self.user).await,
        }
    }

    pub async fn set_vessel_status(&self, id: &str, status: VesselStatus) -> FleetResult<Vessel> {
        found(
            "Vessel",
            id,
            vessels::update_status(self.store()?, id, status).await?,
        )
    }

    pub async fn delete_vessel(&self, id: &str) -> FleetResult<()> {
        removed("Vessel", id, vessels::delete(self.store()?, id).await?)
    }

    pub async fn advance_reminder(&self, reminder: &VesselReminder) -> FleetResult<VesselReminder> {
        found(
            "Reminder",
            &reminder.id,
            reminders::set_status(self.store()?, &reminder.id, reminder.status.cycle()).await?,
        )
    }

    pub async fn register_for_event(&self, id: &str) -> FleetResult<Event> {
        found("Event", id, events::register(self.store()?, id).await?)
    }

    pub async fn delete_event(&self, id: &str) -> FleetResult<()> {
        removed("Event", id, events::delete(self.store()?, id).await?)
    }

    pub async fn set_service_status(&self, id: &str, status: ServiceStatus) -> FleetResult<Service> {
        found(
            "Service",
            id,
            services::update_status(self.store()?, id, status).await?,
        )
    }

    pub async fn mark_news_read(&self, id: &str) -> FleetResult<News> {
        found("News", id, news::mark_as_read(self.store()?, id).await?)
    }

    /// Suspends an active user or reactivates a suspended one.
    pub async fn toggle_user_status(&self, user: &User) -> FleetResult<User> {
        let next = match user.status {
            UserStatus::Active => UserStatus::Suspended,
            UserStatus::Suspended => UserStatus::Active,
        };
        found(
            "User",
            &user.id,
            users::update_status(self.store()?, &user.id, next).await?,
        )
    }

    pub async fn mark_alert_read(&self, id: &str) -> FleetResult<Alert> {
        found("Alert", id, alert_queries::mark_as_read(self.store()?, id).await?)
    }

    /// Records one alert per rule that fires on `reading`.
    pub async fn evaluate_reading(
        &self,
        rules: &[AlertRule],
        reading: &OceanReading,
    ) -> FleetResult<Vec<Alert>> {
        let store = self.store()?;
        let mut raised = Vec::new();
        for rule in alerts::evaluate(rules, reading) {
            let alert = alert_queries::create(
                store,
                NewAlert {
                    rule_id: rule.id.clone(),
                    vessel_id: reading
                        .vessel_id
                        .clone()
                        .or_else(|| rule.conditions.vessel_id.clone()),
                    level: rule.alert_level,
                    message: rule.message.clone(),
                },
            )
            .await?;
            raised.push(alert);
        }
        info!(reading = %reading.id, raised = raised.len(), "reading evaluated");
        Ok(raised)
    }

    /// Writes the loaded fleet as a [`FleetExport`] document.
    pub fn export(&self, data: &FleetData, scope: &RadarScope, path: &Path) -> FleetResult<FleetExport> {
        let snapshot = snapshot::compute(&data.snapshot_input(), chrono::Utc::now());
        let export = FleetExport::new(
            scope,
            snapshot,
            data.vessels.clone(),
            data.latest_reading().cloned(),
        );
        export.write_to(path)?;
        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetwatch::db::create_memory_pool;
    use fleetwatch::domain::UserRole;
    use fleetwatch::geo::Position;

    async fn actions_for(user: CurrentUser) -> Result<AppActions, Box<dyn std::error::Error>> {
        let mut actions = AppActions::new(user);
        actions.attach(Store::new(create_memory_pool().await?, false));
        Ok(actions)
    }

    fn client() -> CurrentUser {
        CurrentUser {
            id: "u2".into(),
            name: "Reza Karimi".into(),
            role: UserRole::Client,
        }
    }

    #[tokio::test]
    async fn missing_store_is_reported() {
        let actions = AppActions::new(CurrentUser::default());
        assert!(matches!(
            actions.delete_vessel("v1").await,
            Err(FleetError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn client_form_submissions_start_pending() -> Result<(), Box<dyn std::error::Error>> {
        let actions = actions_for(client()).await?;
        let mut form = VesselFormState::blank(Position::new(27.1, 56.2), false);
        form.name = "Hormuz Pilot".into();
        form.status_index = VesselStatus::Active.index();

        let vessel = actions.save_vessel(&form).await?;
        assert_eq!(vessel.status, VesselStatus::Pending);
        assert_eq!(vessel.owner_id, "u2");
        Ok(())
    }

    #[tokio::test]
    async fn editing_keeps_the_owner() -> Result<(), Box<dyn std::error::Error>> {
        let actions = actions_for(CurrentUser::default()).await?;
        let store = actions.store()?;
        let original = vessels::get_by_id(store, "v1").await?.ok_or("seed vessel missing")?;

        let mut form = VesselFormState::from_vessel(&original, true);
        form.speed = "3.5".into();
        let saved = actions.save_vessel(&form).await?;

        assert_eq!(saved.owner_id, original.owner_id);
        assert_eq!(saved.owner_name, original.owner_name);
        assert!((saved.speed - 3.5).abs() < f64::EPSILON);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_twice_reports_not_found() -> Result<(), Box<dyn std::error::Error>> {
        let actions = actions_for(CurrentUser::default()).await?;
        actions.delete_vessel("v3").await?;
        assert!(matches!(
            actions.delete_vessel("v3").await,
            Err(FleetError::NotFound { kind: "Vessel", .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn toggling_a_user_flips_status() -> Result<(), Box<dyn std::error::Error>> {
        let actions = actions_for(CurrentUser::default()).await?;
        let store = actions.store()?;
        let user = users::get_all(store)
            .await?
            .into_iter()
            .find(|user| user.id == "u2")
            .ok_or("seed user missing")?;

        let toggled = actions.toggle_user_status(&user).await?;
        assert_ne!(toggled.status, user.status);
        let restored = actions.toggle_user_status(&toggled).await?;
        assert_eq!(restored.status, user.status);
        Ok(())
    }

    #[tokio::test]
    async fn evaluation_records_one_alert_per_firing_rule() -> Result<(), Box<dyn std::error::Error>>
    {
        let actions = actions_for(CurrentUser::default()).await?;
        let store = actions.store()?;
        let rules = alert_queries::get_rules(store).await?;
        let mut reading = fleetwatch::db::queries::ocean::get_latest(store)
            .await?
            .ok_or("no seeded reading")?;
        reading.wave.height = 3.0;
        reading.wind.speed = 25.0;

        let raised = actions.evaluate_reading(&rules, &reading).await?;
        assert_eq!(raised.len(), 2);
        assert_eq!(alert_queries::get_unread(store).await?.len(), 2);

        reading.wave.height = 0.5;
        reading.wind.speed = 5.0;
        assert!(actions.evaluate_reading(&rules, &reading).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn export_writes_the_loaded_fleet() -> Result<(), Box<dyn std::error::Error>> {
        let actions = actions_for(CurrentUser::default()).await?;
        let data = FleetData::load(actions.store()?, &CurrentUser::default()).await?;
        let scope = RadarScope::new(fleetwatch::config::DEFAULT_CENTER, 50.0);
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("fleet.json");

        let export = actions.export(&data, &scope, &path)?;
        assert_eq!(export.vessels.len(), 3);
        assert!(path.exists());
        Ok(())
    }
}
