use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::loader::ActionOutcome;
use crate::app::state::{App, AppScreen, VesselAction, VesselFormState};
use crossterm::event::KeyCode;
use fleetwatch::domain::VesselStatus;

pub fn handle_vessel_actions_input(app: &mut App, key: KeyCode) {
    let actions = app.vessel_actions();
    match key {
        KeyCode::Up => {
            app.action_index = wrap_decrement(app.action_index, actions.len());
        }
        KeyCode::Down => {
            app.action_index = wrap_increment(app.action_index, actions.len());
        }
        KeyCode::Enter => {
            if let Some(action) = actions.get(app.action_index).copied() {
                run_action(app, action);
            }
        }
        KeyCode::Esc => app.navigate(AppScreen::Vessels),
        _ => {}
    }
}

fn run_action(app: &mut App, action: VesselAction) {
    let Some(vessel) = app.selected_vessel().cloned() else {
        app.navigate(AppScreen::Vessels);
        return;
    };

    match action {
        VesselAction::Details => {
            app.detail_vessel_id = Some(vessel.id);
            app.navigate(AppScreen::VesselDetails);
        }
        VesselAction::Edit => {
            let form = VesselFormState::from_vessel(&vessel, app.is_admin());
            app.navigate(AppScreen::VesselForm);
            app.vessel_form = Some(form);
        }
        VesselAction::Approve | VesselAction::Reject => {
            let status = if action == VesselAction::Approve {
                VesselStatus::Approved
            } else {
                VesselStatus::Rejected
            };
            let actions = app.actions.clone();
            app.navigate(AppScreen::Vessels);
            app.start_action(async move {
                let outcome = match actions.set_vessel_status(&vessel.id, status).await {
                    Ok(updated) => ActionOutcome::success(
                        "Status updated",
                        format!("{} is now {}", updated.name, updated.status.label()),
                    ),
                    Err(e) => ActionOutcome::failure("Status update failed", &e),
                };
                outcome.reloading()
            });
        }
        VesselAction::Delete => {
            let actions = app.actions.clone();
            app.navigate(AppScreen::Vessels);
            app.start_action(async move {
                let outcome = match actions.delete_vessel(&vessel.id).await {
                    Ok(()) => ActionOutcome::success("Vessel deleted", vessel.name),
                    Err(e) => ActionOutcome::failure("Delete failed", &e),
                };
                outcome.reloading()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{LoadState, ToastKind};
    use fleetwatch::config::AppConfig;
    use fleetwatch::db::queries::vessels;
    use fleetwatch::db::{create_memory_pool, seed, Store};
    use fleetwatch::fleet::FleetData;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn approving_returns_before_the_store_write_lands() -> Result<(), Box<dyn std::error::Error>>
    {
        let mut app = App::new(AppConfig::default());
        app.attach_store(Store::new(create_memory_pool().await?, true));
        app.data = LoadState::Loaded(FleetData {
            vessels: seed::vessels(),
            ..FleetData::default()
        });
        app.screen = AppScreen::VesselActions;
        app.selected_index = 2;
        app.action_index = 1;
        assert_eq!(app.vessel_actions().get(1), Some(&VesselAction::Approve));

        let started = Instant::now();
        handle_vessel_actions_input(&mut app, KeyCode::Enter);
        assert!(started.elapsed() < Duration::from_millis(200));
        assert_eq!(app.screen, AppScreen::Vessels);
        assert_eq!(app.pending_actions, 1);

        for _ in 0..400 {
            app.drain_actions();
            if app.pending_actions == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(app.pending_actions, 0);
        assert_eq!(app.toast.as_ref().map(|toast| toast.kind), Some(ToastKind::Success));

        let stored = vessels::get_by_id(app.actions.store()?, "v3")
            .await?
            .ok_or("seed vessel missing")?;
        assert_eq!(stored.status, VesselStatus::Approved);
        Ok(())
    }
}
