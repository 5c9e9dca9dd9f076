use crate::app::input::helpers::navigate_list;
use crate::app::loader::ActionOutcome;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_news_input(app: &mut App, key: KeyCode) {
    let len = app.list_len();
    if navigate_list(&mut app.selected_index, len, key) {
        return;
    }

    match key {
        KeyCode::Esc => app.navigate(AppScreen::Dashboard),
        KeyCode::Enter => {
            let Some(item) = app
                .fleet()
                .and_then(|data| data.news.get(app.selected_index))
                .filter(|item| !item.is_read)
                .map(|item| item.id.clone())
            else {
                return;
            };
            let actions = app.actions.clone();
            app.start_action(async move {
                match actions.mark_news_read(&item).await {
                    Ok(_) => ActionOutcome::silent().reloading(),
                    Err(e) => ActionOutcome::failure("Could not mark as read", &e),
                }
            });
        }
        _ => {}
    }
}
