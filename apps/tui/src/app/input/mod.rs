pub mod helpers;
pub mod screens;

use crate::app::state::App;
use crossterm::event::KeyCode;
use ratatui::layout::Rect;

/// Never waits on the store. Writes run through [`App::start_action`].
pub fn handle_input(app: &mut App, key: KeyCode) {
    screens::dispatch_input(app, key);
}

/// Left clicks only matter on the radar.
pub fn handle_click(app: &mut App, column: u16, row: u16, frame: Rect) {
    screens::radar::handle_radar_click(app, column, row, frame);
}
