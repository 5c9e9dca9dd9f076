use crate::app::input::helpers::navigate_list;
use crate::app::input::screens::require_admin;
use crate::app::loader::ActionOutcome;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;
use fleetwatch::domain::ServiceStatus;

pub fn handle_services_input(app: &mut App, key: KeyCode) {
    let len = app.list_len();
    if navigate_list(&mut app.selected_index, len, key) {
        return;
    }

    let status = match key {
        KeyCode::Esc => {
            app.navigate(AppScreen::Dashboard);
            return;
        }
        KeyCode::Char('a') => ServiceStatus::Approved,
        KeyCode::Char('x') => ServiceStatus::Rejected,
        _ => return,
    };

    let Some(id) = app
        .fleet()
        .and_then(|data| data.services.get(app.selected_index))
        .map(|service| service.id.clone())
    else {
        return;
    };
    if !require_admin(app) {
        return;
    }

    let actions = app.actions.clone();
    app.start_action(async move {
        match actions.set_service_status(&id, status).await {
            Ok(service) => ActionOutcome::success(
                "Service updated",
                format!("{} is now {}", service.name, service.status.label()),
            )
            .reloading(),
            Err(e) => ActionOutcome::failure("Service update failed", &e),
        }
    });
}
