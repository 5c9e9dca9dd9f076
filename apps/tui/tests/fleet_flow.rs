use chrono::Utc;
use fleetwatch::config::{database_url_for, CurrentUser, DEFAULT_CENTER};
use fleetwatch::db::models::VesselDraft;
use fleetwatch::db::queries::vessels;
use fleetwatch::db::{create_database_pool, Store};
use fleetwatch::domain::{UserRole, VesselStatus, VesselType};
use fleetwatch::export::FleetExport;
use fleetwatch::fleet::FleetData;
use fleetwatch::geo::Position;
use fleetwatch::radar::RadarScope;
use fleetwatch::snapshot;

fn client(id: &str) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        name: "Reza Karimi".to_string(),
        role: UserRole::Client,
    }
}

fn draft(name: &str) -> VesselDraft {
    VesselDraft {
        name: name.to_string(),
        vessel_type: VesselType::Fishing,
        status: Some(VesselStatus::Active),
        speed: 6.0,
        heading: 270.0,
        position: Position::new(27.2, 56.3),
        imo: None,
        mmsi: Some("422999000".to_string()),
        flag: Some("IR".to_string()),
    }
}

#[tokio::test]
async fn registration_approval_and_export() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let url = database_url_for(&dir.path().join("fleet.db"))?;
    let store = Store::new(create_database_pool(&url).await?, false);
    let admin = CurrentUser::default();

    let submitted = vessels::create(&store, draft("Hormuz Pilot"), &client("u2")).await?;
    assert_eq!(submitted.status, VesselStatus::Pending);

    let data = FleetData::load(&store, &admin).await?;
    let stats = snapshot::compute(&data.snapshot_input(), Utc::now());
    assert_eq!(stats.vessels.total, 4);
    assert_eq!(stats.vessels.status(VesselStatus::Pending), 2);

    vessels::update_status(&store, &submitted.id, VesselStatus::Approved)
        .await?
        .ok_or("submitted vessel vanished")?;

    let data = FleetData::load(&store, &admin).await?;
    let stats = snapshot::compute(&data.snapshot_input(), Utc::now());
    assert_eq!(stats.vessels.status(VesselStatus::Pending), 1);
    assert_eq!(stats.vessels.status(VesselStatus::Approved), 1);

    let scope = RadarScope::new(DEFAULT_CENTER, 30.0);
    let export = FleetExport::new(
        &scope,
        stats,
        data.vessels.clone(),
        data.latest_reading().cloned(),
    );
    let path = dir.path().join("fleet.json");
    export.write_to(&path)?;

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let targets = json["targets"].as_array().ok_or("targets missing")?;
    assert!(targets.iter().any(|target| target["name"] == "Hormuz Pilot"));
    assert!(targets.iter().all(|target| target["name"] != "Persian Gulf Tanker"));
    assert_eq!(json["snapshot"]["vessels"]["by_status"]["approved"], 1);
    assert!(json["latest_reading"].is_object());
    Ok(())
}

#[tokio::test]
async fn stored_fleet_survives_reopening() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let url = database_url_for(&dir.path().join("fleet.db"))?;

    {
        let store = Store::new(create_database_pool(&url).await?, false);
        vessels::create(&store, draft("Qeshm Runner"), &CurrentUser::default()).await?;
        store.pool().close().await;
    }

    let store = Store::new(create_database_pool(&url).await?, false);
    let all = vessels::get_all(&store).await?;
    assert_eq!(all.len(), 4);
    let reopened = all
        .iter()
        .find(|vessel| vessel.name == "Qeshm Runner")
        .ok_or("vessel was not persisted")?;
    assert_eq!(reopened.status, VesselStatus::Active);
    Ok(())
}

#[tokio::test]
async fn clients_only_see_their_own_vessels() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let url = database_url_for(&dir.path().join("fleet.db"))?;
    let store = Store::new(create_database_pool(&url).await?, false);

    vessels::create(&store, draft("Guest Skiff"), &client("u3")).await?;

    let owner = FleetData::load(&store, &client("u2")).await?;
    let guest = FleetData::load(&store, &client("u3")).await?;
    assert_eq!(owner.vessels.len(), 3);
    assert_eq!(guest.vessels.len(), 1);
    assert_eq!(guest.vessels[0].name, "Guest Skiff");
    Ok(())
}
