use crate::app::input::helpers::navigate_list;
use crate::app::loader::ActionOutcome;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_ocean_input(app: &mut App, key: KeyCode) {
    let len = app.list_len();
    if navigate_list(&mut app.selected_index, len, key) {
        return;
    }

    match key {
        KeyCode::Esc => app.navigate(AppScreen::Dashboard),
        KeyCode::Char('e') => evaluate_latest(app),
        _ => {}
    }
}

fn evaluate_latest(app: &mut App) {
    let Some((rules, reading)) = app.fleet().and_then(|data| {
        data.latest_reading()
            .map(|reading| (data.alert_rules.clone(), reading.clone()))
    }) else {
        app.notify_error("Nothing to evaluate", &"No ocean readings recorded");
        return;
    };

    let actions = app.actions.clone();
    app.start_action(async move {
        match actions.evaluate_reading(&rules, &reading).await {
            Ok(raised) if raised.is_empty() => {
                ActionOutcome::success("Conditions normal", "No alert rule fired")
            }
            Ok(raised) => ActionOutcome::success(
                "Alerts raised",
                format!("{} rule(s) fired on the latest reading", raised.len()),
            )
            .reloading(),
            Err(e) => ActionOutcome::failure("Evaluation failed", &e),
        }
    });
}
