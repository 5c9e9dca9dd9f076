use crate::app::state::{App, AppScreen};
use crate::ui::screens::radar::scope_area;
use crossterm::event::KeyCode;
use fleetwatch::radar::{DIAL_STEP, HIT_RADIUS_PX, SURFACE_PX};
use ratatui::layout::Rect;
use tracing::debug;

pub fn handle_radar_input(app: &mut App, key: KeyCode) {
    let vessels = app
        .fleet()
        .map(|data| data.vessels.clone())
        .unwrap_or_default();
    let Some(radar) = app.radar.as_mut() else {
        return;
    };

    if radar.searching {
        match key {
            KeyCode::Enter | KeyCode::Esc => radar.searching = false,
            KeyCode::Backspace => {
                radar.search.pop();
            }
            KeyCode::Char(c) => radar.search.push(c),
            _ => {}
        }
        radar.sync_selection(&vessels);
        return;
    }

    let shown = radar.shown(&vessels);
    match key {
        KeyCode::Esc => {
            if radar.scope.selected().is_some() {
                radar.scope.select(None);
            } else {
                app.navigate(AppScreen::Dashboard);
            }
        }
        KeyCode::Up => radar.prev_control(),
        KeyCode::Down => radar.next_control(),
        KeyCode::Left => radar.scope.controls.adjust(radar.control(), -DIAL_STEP),
        KeyCode::Right => radar.scope.controls.adjust(radar.control(), DIAL_STEP),
        KeyCode::Enter => {
            let control = radar.control();
            if control.is_switch() {
                radar.scope.controls.toggle(control);
            }
        }
        KeyCode::Tab => radar.scope.cycle_selection(&shown, true),
        KeyCode::BackTab => radar.scope.cycle_selection(&shown, false),
        KeyCode::Char('+' | '=') => radar.scope.zoom(false),
        KeyCode::Char('-') => radar.scope.zoom(true),
        KeyCode::Char(' ') => radar.scope.sweep.toggle_pause(),
        KeyCode::Char('t') => {
            radar.cycle_type_filter();
            radar.sync_selection(&vessels);
        }
        KeyCode::Char('/') => radar.searching = true,
        KeyCode::Char('c') => {
            radar.search.clear();
            radar.type_filter = None;
        }
        KeyCode::Char('m') => app.navigate(AppScreen::Map),
        KeyCode::Char('i') => {
            if let Some(id) = radar.scope.selected().map(ToString::to_string) {
                app.detail_vessel_id = Some(id);
                app.navigate(AppScreen::VesselDetails);
            }
        }
        _ => {}
    }
}

/// Maps a terminal cell inside the scope onto the virtual radar surface.
pub fn cell_to_surface(area: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    let inside = column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height;
    if !inside {
        return None;
    }
    let x = (f64::from(column - area.x) + 0.5) / f64::from(area.width) * SURFACE_PX;
    let y = (f64::from(row - area.y) + 0.5) / f64::from(area.height) * SURFACE_PX;
    Some((x, y))
}

pub fn handle_radar_click(app: &mut App, column: u16, row: u16, frame: Rect) {
    if app.screen != AppScreen::Radar {
        return;
    }
    let vessels = app
        .fleet()
        .map(|data| data.vessels.clone())
        .unwrap_or_default();
    let Some(radar) = app.radar.as_mut() else {
        return;
    };
    let area = scope_area(frame);
    let Some(point) = cell_to_surface(area, column, row) else {
        return;
    };

    let shown = radar.shown(&vessels);
    let hit = radar
        .scope
        .hit_test_within(SURFACE_PX, SURFACE_PX, &shown, point, cell_reach(area))
        .map(|vessel| vessel.name.clone());
    debug!(x = point.0, y = point.1, hit = ?hit, "radar click");
}

/// Surface distance from a cell's center to its corner, plus a pixel of slack.
/// Every point of the surface is closer than this to some clickable cell center.
pub fn cell_reach(area: Rect) -> f64 {
    if area.width == 0 || area.height == 0 {
        return HIT_RADIUS_PX;
    }
    let cell_w = SURFACE_PX / f64::from(area.width);
    let cell_h = SURFACE_PX / f64::from(area.height);
    cell_w.hypot(cell_h) / 2.0 + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetwatch::config::AppConfig;
    use fleetwatch::radar::{ControlKind, RadarControls};

    #[test]
    fn cells_map_onto_the_surface() {
        let area = Rect::new(10, 5, 60, 30);
        assert_eq!(cell_to_surface(area, 9, 10), None);
        assert_eq!(cell_to_surface(area, 70, 10), None);

        let (x, y) = cell_to_surface(area, 10, 5).unwrap_or_default();
        assert!((x - 5.0).abs() < 1e-9);
        assert!((y - 10.0).abs() < 1e-9);

        let (x, y) = cell_to_surface(area, 69, 34).unwrap_or_default();
        assert!(x < SURFACE_PX && x > 590.0);
        assert!(y < SURFACE_PX && y > 580.0);
    }

    #[test]
    fn arrow_keys_step_the_selected_dial() {
        let mut app = App::new(AppConfig::default());
        app.navigate(AppScreen::Radar);
        let before = RadarControls::default().gain;

        handle_radar_input(&mut app, KeyCode::Right);
        handle_radar_input(&mut app, KeyCode::Right);
        handle_radar_input(&mut app, KeyCode::Left);

        let radar = app
            .radar
            .as_ref()
            .map(|radar| (radar.control(), i16::from(radar.scope.controls.gain)));
        assert_eq!(radar, Some((ControlKind::Gain, i16::from(before) + DIAL_STEP)));
    }

    #[test]
    fn cell_centers_cover_the_whole_surface() {
        let area = Rect::new(0, 0, 60, 30);
        let reach = cell_reach(area);
        assert!(reach > HIT_RADIUS_PX);

        // Worst case: a blip on the shared corner of four cells.
        let corner = (SURFACE_PX / 60.0, SURFACE_PX / 30.0);
        let (cx, cy) = cell_to_surface(area, 0, 0).unwrap_or_default();
        assert!((corner.0 - cx).hypot(corner.1 - cy) < reach);
        assert_eq!(cell_reach(Rect::new(0, 0, 0, 0)), HIT_RADIUS_PX);
    }
}
