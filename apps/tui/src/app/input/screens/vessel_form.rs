use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::loader::ActionOutcome;
use crate::app::state::{App, AppScreen, VesselFormState};
use crossterm::event::KeyCode;

pub fn handle_vessel_form_input(app: &mut App, key: KeyCode) {
    let Some(form) = app.vessel_form.as_mut() else {
        app.navigate(AppScreen::Vessels);
        return;
    };

    if form.editing {
        handle_field_input(form, key);
        return;
    }

    let len = form.fields().len();
    match key {
        KeyCode::Esc => app.navigate(AppScreen::Vessels),
        KeyCode::Up => form.field_index = wrap_decrement(form.field_index, len),
        KeyCode::Down | KeyCode::Tab => form.field_index = wrap_increment(form.field_index, len),
        KeyCode::Left => form.cycle_choice(false),
        KeyCode::Right => form.cycle_choice(true),
        KeyCode::Enter => {
            if !form.field().is_choice() {
                form.editing = true;
            }
        }
        KeyCode::Char('s') => save(app),
        _ => {}
    }
}

fn handle_field_input(form: &mut VesselFormState, key: KeyCode) {
    match key {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => form.editing = false,
        KeyCode::Backspace => {
            if let Some(text) = form.text_mut() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = form.text_mut() {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn save(app: &mut App) {
    // Ignored while an earlier save is still in flight.
    if app.pending_actions > 0 {
        return;
    }
    let Some(form) = app.vessel_form.clone() else {
        return;
    };
    let creating = form.vessel_id.is_none();
    let awaits_approval = creating && !app.is_admin();

    let actions = app.actions.clone();
    app.start_action(async move {
        match actions.save_vessel(&form).await {
            Ok(vessel) => {
                let title = if creating { "Vessel registered" } else { "Vessel updated" };
                let message = if awaits_approval {
                    format!("{} is awaiting approval", vessel.name)
                } else {
                    vessel.name
                };
                ActionOutcome::success(title, message)
                    .then_navigate(AppScreen::Vessels)
                    .reloading()
            }
            // The form stays open so the input can be corrected.
            Err(e) => ActionOutcome::failure("Could not save vessel", &e),
        }
    });
}
