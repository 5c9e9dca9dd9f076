use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;
use fleetwatch::map::MapLayer;

pub fn handle_map_input(app: &mut App, key: KeyCode) {
    let vessels = app
        .fleet()
        .map(|data| data.vessels.clone())
        .unwrap_or_default();
    let center = app.config.radar_center;
    let Some(map) = app.map.as_mut() else {
        return;
    };

    match key {
        KeyCode::Esc | KeyCode::Char('m') => app.navigate(AppScreen::Radar),
        KeyCode::Up => map.pan(1, 0),
        KeyCode::Down => map.pan(-1, 0),
        KeyCode::Left => map.pan(0, -1),
        KeyCode::Right => map.pan(0, 1),
        KeyCode::Char('+' | '=') => map.zoom(false),
        KeyCode::Char('-') => map.zoom(true),
        KeyCode::Char('v') => map.layers.toggle(MapLayer::Vessels),
        KeyCode::Char('r') => map.layers.toggle(MapLayer::Regions),
        KeyCode::Char('p') => map.layers.toggle(MapLayer::Ports),
        KeyCode::Char('c') => map.recenter(center),
        // Tab walks every vessel on the layer and centers the map on it.
        KeyCode::Tab | KeyCode::BackTab => {
            let shown: Vec<_> = if map.layers.vessels {
                vessels.iter().collect()
            } else {
                Vec::new()
            };
            map.cycle_selection(&shown, key == KeyCode::Tab);
            let target = map
                .selected()
                .and_then(|id| shown.iter().find(|vessel| vessel.id == id))
                .map(|vessel| vessel.position);
            if let Some(position) = target {
                map.recenter(position);
            }
        }
        KeyCode::Enter => {
            if let Some(id) = map.selected().map(ToString::to_string) {
                app.detail_vessel_id = Some(id);
                app.navigate(AppScreen::VesselDetails);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::LoadState;
    use fleetwatch::config::AppConfig;
    use fleetwatch::db::seed;
    use fleetwatch::fleet::FleetData;

    fn map_app() -> App {
        let mut app = App::new(AppConfig::default());
        app.navigate(AppScreen::Map);
        app
    }

    #[test]
    fn keys_pan_zoom_and_toggle_layers() {
        let mut app = map_app();
        let start = app.config.radar_center;

        handle_map_input(&mut app, KeyCode::Up);
        handle_map_input(&mut app, KeyCode::Char('-'));
        handle_map_input(&mut app, KeyCode::Char('p'));

        let map = app.map.as_ref().map(|map| (map.center(), map.half_span_deg(), map.layers.ports));
        let Some((center, span, ports)) = map else {
            panic!("map should be mounted");
        };
        assert!(center.lat > start.lat);
        assert!((span - 1.0).abs() < f64::EPSILON);
        assert!(!ports);

        handle_map_input(&mut app, KeyCode::Char('c'));
        assert_eq!(app.map.as_ref().map(|map| map.center()), Some(start));
    }

    #[test]
    fn escape_returns_to_the_radar() {
        let mut app = map_app();
        handle_map_input(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, AppScreen::Radar);
        assert!(app.map.is_none());
        assert!(app.radar.is_some());
    }

    #[test]
    fn tab_without_data_selects_nothing() {
        let mut app = map_app();
        handle_map_input(&mut app, KeyCode::Tab);
        handle_map_input(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, AppScreen::Map);
        assert_eq!(app.map.as_ref().and_then(|map| map.selected()), None);
    }

    #[test]
    fn tab_centers_on_each_vessel_and_enter_opens_it() {
        let mut app = map_app();
        let vessels = seed::vessels();
        app.data = LoadState::Loaded(FleetData {
            vessels: vessels.clone(),
            ..FleetData::default()
        });

        handle_map_input(&mut app, KeyCode::Tab);
        handle_map_input(&mut app, KeyCode::Tab);
        let map = app.map.as_ref().map(|map| (map.selected().map(ToString::to_string), map.center()));
        assert_eq!(map, Some((Some(vessels[1].id.clone()), vessels[1].position)));

        handle_map_input(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, AppScreen::VesselDetails);
        assert_eq!(app.detail_vessel_id.as_deref(), Some(vessels[1].id.as_str()));
    }
}
