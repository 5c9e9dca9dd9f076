use crate::app::state::App;
use crossterm::event::KeyCode;

fn opens_help(app: &App, key: KeyCode) -> bool {
    match key {
        KeyCode::F(1) => true,
        KeyCode::Char('?') => !app.is_typing(),
        _ => false,
    }
}

/// Keys for the help overlay. While it is open every key is consumed and
/// only the toggles or Esc close it.
pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if !app.show_help {
        if opens_help(app, key) {
            app.show_help = true;
            return true;
        }
        return false;
    }

    if matches!(key, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?' | 'q')) {
        app.show_help = false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetwatch::config::AppConfig;

    #[test]
    fn overlay_swallows_keys_until_closed() {
        let mut app = App::new(AppConfig::default());
        assert!(handle_help_toggle(&mut app, KeyCode::F(1)));
        assert!(app.show_help);

        assert!(handle_help_toggle(&mut app, KeyCode::Char('3')));
        assert!(app.show_help);

        assert!(handle_help_toggle(&mut app, KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn other_keys_pass_through_when_closed() {
        let mut app = App::new(AppConfig::default());
        assert!(!handle_help_toggle(&mut app, KeyCode::Down));
        assert!(!app.show_help);
    }
}
