use std::path::Path;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use fleetwatch::config::AppConfig;
use fleetwatch::db::{create_database_pool, setup_database, Store};
use fleetwatch::domain::{VesselStatus, VesselType};
use fleetwatch::export::FleetExport;
use fleetwatch::fleet::FleetData;
use fleetwatch::radar::RadarScope;
use fleetwatch::snapshot::{self, FleetSnapshot};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::app::{handle_click, handle_input, App};
use crate::terminal::FleetTerminal;
use crate::ui;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

async fn open_store(config: &AppConfig) -> Result<Store> {
    let pool = create_database_pool(&config.database_url).await?;
    setup_database(&pool).await?;
    Ok(Store::new(pool, config.latency))
}

/// Prints the fleet snapshot without a terminal UI.
pub async fn run_headless(config: &AppConfig, json: bool) -> Result<()> {
    let store = open_store(config).await?;
    let data = FleetData::load(&store, &config.current_user).await?;
    let snapshot = snapshot::compute(&data.snapshot_input(), chrono::Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", format_snapshot(&snapshot));
    }
    Ok(())
}

/// Writes a [`FleetExport`] for the configured radar center and range.
pub async fn run_export(config: &AppConfig, path: &Path) -> Result<()> {
    let store = open_store(config).await?;
    let data = FleetData::load(&store, &config.current_user).await?;
    let snapshot = snapshot::compute(&data.snapshot_input(), chrono::Utc::now());
    let scope = RadarScope::new(config.radar_center, config.radar_range_nm);
    let latest = data.latest_reading().cloned();

    let export = FleetExport::new(&scope, snapshot, data.vessels, latest);
    export.write_to(path)?;
    println!(
        "Wrote {} vessels ({} on radar) to {}",
        export.vessels.len(),
        export.targets.len(),
        path.display()
    );
    Ok(())
}

fn format_snapshot(snapshot: &FleetSnapshot) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    let _ = writeln!(out, "\nFleet Snapshot");
    let _ = writeln!(out, "==============");
    let _ = writeln!(out, "Vessels: {}", snapshot.vessels.total);
    for status in VesselStatus::ALL {
        let _ = writeln!(
            out,
            "- {}: {}",
            status.label(),
            snapshot.vessels.status(*status)
        );
    }

    let _ = writeln!(out, "\nVessels by Type:");
    for kind in VesselType::ALL {
        let count = snapshot.vessels.of_type(*kind);
        if count > 0 {
            let _ = writeln!(out, "- {}: {count}", kind.label());
        }
    }

    let ocean = &snapshot.ocean;
    let _ = writeln!(out, "\nOcean ({} readings):", ocean.readings);
    let _ = writeln!(out, "- Wave height: {:.1} m", ocean.wave_height);
    let _ = writeln!(out, "- Wind speed: {:.1} kn", ocean.wind_speed);
    let _ = writeln!(out, "- Sea temperature: {:.1} °C", ocean.sea_temperature);
    let _ = writeln!(out, "- Air temperature: {:.1} °C", ocean.air_temperature);

    let events = &snapshot.events;
    let _ = writeln!(
        out,
        "\nEvents: {} ({} upcoming, {} full, {} registrations)",
        events.total, events.upcoming, events.full, events.registered
    );
    let _ = writeln!(
        out,
        "Regions: {} | Policies: {} | Services: {}",
        snapshot.regions, snapshot.policies, snapshot.services.total
    );
    let _ = writeln!(
        out,
        "Users: {} ({} active, {} suspended, {} admins)",
        snapshot.users.total, snapshot.users.active, snapshot.users.suspended, snapshot.users.admins
    );
    let _ = writeln!(
        out,
        "Unread news: {} | Unread alerts: {} | Open reminders: {}",
        snapshot.unread_news, snapshot.unread_alerts, snapshot.open_reminders
    );
    out
}

/// Draws, applies finished loads and writes, and handles input until the app quits.
pub async fn run(terminal: &mut FleetTerminal, app: &mut App) -> Result<()> {
    while app.running {
        app.drain_loads();
        app.drain_actions();
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !matches!(event::poll(EVENT_POLL_TIMEOUT), Ok(true)) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    app.running = false;
                } else {
                    handle_input(app, key.code);
                }
            }
            Ok(Event::Mouse(mouse)) => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                    let size = terminal.size()?;
                    let frame = Rect::new(0, 0, size.width, size.height);
                    handle_click(app, mouse.column, mouse.row, frame);
                }
            }
            Ok(Event::Resize(width, height)) => {
                debug!(width, height, "terminal resized");
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "failed to read terminal event"),
        }
    }

    info!("event loop finished");
    Ok(())
}
