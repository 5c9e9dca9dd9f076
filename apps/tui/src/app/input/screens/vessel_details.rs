use crate::app::input::helpers::navigate_list;
use crate::app::loader::ActionOutcome;
use crate::app::state::{App, AppScreen, VesselFormState};
use crossterm::event::KeyCode;

pub fn handle_vessel_details_input(app: &mut App, key: KeyCode) {
    let Some(vessel_id) = app.detail_vessel_id.clone() else {
        app.navigate(AppScreen::Vessels);
        return;
    };
    let reminders: Vec<_> = app
        .fleet()
        .map(|data| data.reminders_for(&vessel_id).cloned().collect())
        .unwrap_or_default();

    if navigate_list(&mut app.reminder_index, reminders.len(), key) {
        return;
    }

    match key {
        KeyCode::Esc => app.navigate(AppScreen::Vessels),
        KeyCode::Enter | KeyCode::Char('s') => {
            let Some(reminder) = reminders.get(app.reminder_index).cloned() else {
                return;
            };
            let actions = app.actions.clone();
            app.start_action(async move {
                match actions.advance_reminder(&reminder).await {
                    Ok(updated) => ActionOutcome::success(
                        "Reminder updated",
                        format!("{} → {}", updated.title, updated.status.label()),
                    )
                    .reloading(),
                    Err(e) => ActionOutcome::failure("Reminder update failed", &e),
                }
            });
        }
        KeyCode::Char('e') => {
            if let Some(vessel) = app.detail_vessel() {
                let form = VesselFormState::from_vessel(vessel, app.is_admin());
                app.navigate(AppScreen::VesselForm);
                app.vessel_form = Some(form);
            }
        }
        _ => {}
    }
}
