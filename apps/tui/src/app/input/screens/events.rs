use crate::app::input::helpers::navigate_list;
use crate::app::input::screens::require_admin;
use crate::app::loader::ActionOutcome;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;
use fleetwatch::FleetError;

pub fn handle_events_input(app: &mut App, key: KeyCode) {
    let len = app.list_len();
    if navigate_list(&mut app.selected_index, len, key) {
        return;
    }

    let Some(event) = app
        .fleet()
        .and_then(|data| data.events.get(app.selected_index))
        .cloned()
    else {
        if key == KeyCode::Esc {
            app.navigate(AppScreen::Dashboard);
        }
        return;
    };

    let actions = app.actions.clone();
    match key {
        KeyCode::Esc => app.navigate(AppScreen::Dashboard),
        KeyCode::Enter => app.start_action(async move {
            match actions.register_for_event(&event.id).await {
                Ok(updated) => ActionOutcome::success("Registered", updated.title).reloading(),
                Err(FleetError::EventFull(_)) => ActionOutcome::failure(
                    "Registration closed",
                    &format!("{} is full", event.title),
                ),
                Err(e) => ActionOutcome::failure("Registration failed", &e),
            }
        }),
        KeyCode::Char('d') => {
            if !require_admin(app) {
                return;
            }
            app.start_action(async move {
                match actions.delete_event(&event.id).await {
                    Ok(()) => ActionOutcome::success("Event deleted", event.title).reloading(),
                    Err(e) => ActionOutcome::failure("Delete failed", &e),
                }
            });
        }
        _ => {}
    }
}
