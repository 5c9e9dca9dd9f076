use crate::app::input::helpers::navigate_list;
use crate::app::input::screens::require_admin;
use crate::app::loader::ActionOutcome;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_users_input(app: &mut App, key: KeyCode) {
    let len = app.list_len();
    if navigate_list(&mut app.selected_index, len, key) {
        return;
    }

    match key {
        KeyCode::Esc => app.navigate(AppScreen::Dashboard),
        KeyCode::Char('s') => {
            let Some(user) = app
                .fleet()
                .and_then(|data| data.users.get(app.selected_index))
                .cloned()
            else {
                return;
            };
            if !require_admin(app) {
                return;
            }
            if user.id == app.config.current_user.id {
                app.notify_error("Not allowed", &"You cannot suspend your own account");
                return;
            }
            let actions = app.actions.clone();
            app.start_action(async move {
                match actions.toggle_user_status(&user).await {
                    Ok(updated) => ActionOutcome::success(
                        "User updated",
                        format!("{} is now {}", updated.name, updated.status.label()),
                    )
                    .reloading(),
                    Err(e) => ActionOutcome::failure("User update failed", &e),
                }
            });
        }
        _ => {}
    }
}
