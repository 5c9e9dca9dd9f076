//! Flat lat/lng chart of the fleet and region outlines.
//!
//! Longitude runs along x and latitude along y. The visible window is sized
//! so a degree of latitude and the matching distance in longitude take up
//! about the same room on screen.

use crate::db::models::{Region, Vessel};
use crate::domain::RegionType;
use crate::geo::Position;

/// Latitude shown above and below the center, from closest to widest.
pub const ZOOM_STEPS_DEG: [f64; 7] = [0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

/// Zoom step a new map opens at.
const DEFAULT_ZOOM_INDEX: usize = 3;

/// Fraction of the visible half span one pan step moves.
const PAN_FRACTION: f64 = 0.25;

/// Keeps the longitude span finite near the poles.
const MIN_COS_LAT: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapLayer {
    Vessels,
    Regions,
    Ports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapLayers {
    pub vessels: bool,
    pub regions: bool,
    /// Port regions, only drawn while `regions` is on.
    pub ports: bool,
}

impl Default for MapLayers {
    fn default() -> Self {
        Self {
            vessels: true,
            regions: true,
            ports: true,
        }
    }
}

impl MapLayers {
    pub fn toggle(&mut self, layer: MapLayer) {
        match layer {
            MapLayer::Vessels => self.vessels = !self.vessels,
            MapLayer::Regions => self.regions = !self.regions,
            MapLayer::Ports => self.ports = !self.ports,
        }
    }

    pub const fn shows(&self, layer: MapLayer) -> bool {
        match layer {
            MapLayer::Vessels => self.vessels,
            MapLayer::Regions => self.regions,
            MapLayer::Ports => self.regions && self.ports,
        }
    }
}

/// Visible window in degrees, `[min, max]` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub lng: [f64; 2],
    pub lat: [f64; 2],
}

impl MapBounds {
    pub fn contains(&self, position: Position) -> bool {
        (self.lng[0]..=self.lng[1]).contains(&position.lng)
            && (self.lat[0]..=self.lat[1]).contains(&position.lat)
    }
}

#[derive(Debug, Clone)]
pub struct MapView {
    pub layers: MapLayers,
    center: Position,
    zoom_index: usize,
    selected: Option<String>,
}

impl MapView {
    pub fn new(center: Position) -> Self {
        Self {
            layers: MapLayers::default(),
            center,
            zoom_index: DEFAULT_ZOOM_INDEX,
            selected: None,
        }
    }

    pub const fn center(&self) -> Position {
        self.center
    }

    pub fn recenter(&mut self, center: Position) {
        self.center = center;
    }

    pub fn half_span_deg(&self) -> f64 {
        ZOOM_STEPS_DEG
            .get(self.zoom_index)
            .copied()
            .unwrap_or(ZOOM_STEPS_DEG[DEFAULT_ZOOM_INDEX])
    }

    /// One zoom step out (wider) or in, stopping at either end.
    pub fn zoom(&mut self, outward: bool) {
        self.zoom_index = if outward {
            (self.zoom_index + 1).min(ZOOM_STEPS_DEG.len() - 1)
        } else {
            self.zoom_index.saturating_sub(1)
        };
    }

    /// Moves the center by whole pan steps, north and east positive.
    pub fn pan(&mut self, north: i8, east: i8) {
        let step = self.half_span_deg() * PAN_FRACTION;
        let lat = step.mul_add(f64::from(north), self.center.lat).clamp(-89.0, 89.0);
        let lng = step.mul_add(f64::from(east), self.center.lng);
        let lng = (lng + 180.0).rem_euclid(360.0) - 180.0;
        self.center = Position::new(lat, lng);
    }

    /// Window for a canvas `columns` cells wide and `rows` cells tall.
    /// Terminal cells are about twice as tall as they are wide.
    pub fn bounds(&self, columns: u16, rows: u16) -> MapBounds {
        let lat_half = self.half_span_deg();
        let aspect = if rows == 0 {
            1.0
        } else {
            f64::from(columns) / (2.0 * f64::from(rows))
        };
        let cos_lat = self.center.lat.to_radians().cos().max(MIN_COS_LAT);
        let lng_half = lat_half * aspect / cos_lat;
        MapBounds {
            lng: [self.center.lng - lng_half, self.center.lng + lng_half],
            lat: [self.center.lat - lat_half, self.center.lat + lat_half],
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, vessel_id: Option<String>) {
        self.selected = vessel_id;
    }

    /// Vessels inside `bounds`, or none while the vessel layer is off.
    pub fn visible_vessels<'v>(&self, vessels: &'v [Vessel], bounds: &MapBounds) -> Vec<&'v Vessel> {
        if !self.layers.vessels {
            return Vec::new();
        }
        vessels
            .iter()
            .filter(|vessel| bounds.contains(vessel.position))
            .collect()
    }

    /// Regions the layer switches allow, whether or not they are on screen.
    pub fn visible_regions<'r>(&self, regions: &'r [Region]) -> Vec<&'r Region> {
        regions
            .iter()
            .filter(|region| {
                if region.region_type == RegionType::Port {
                    self.layers.shows(MapLayer::Ports)
                } else {
                    self.layers.shows(MapLayer::Regions)
                }
            })
            .collect()
    }

    /// Steps the selection through `vessels` in order, wrapping at the ends.
    pub fn cycle_selection(&mut self, vessels: &[&Vessel], forward: bool) {
        if vessels.is_empty() {
            self.selected = None;
            return;
        }
        let current = self
            .selected
            .as_deref()
            .and_then(|id| vessels.iter().position(|vessel| vessel.id == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => vessels.len() - 1,
            (Some(index), true) => (index + 1) % vessels.len(),
            (Some(index), false) => (index + vessels.len() - 1) % vessels.len(),
        };
        self.selected = vessels.get(next).map(|vessel| vessel.id.clone());
    }
}

/// Outline of a region as `(lng, lat)` canvas points, closed back onto its
/// first vertex. Fewer than two vertices make no outline.
pub fn region_ring(region: &Region) -> Vec<(f64, f64)> {
    if region.polygon.len() < 2 {
        return Vec::new();
    }
    let mut ring: Vec<(f64, f64)> = region
        .polygon
        .iter()
        .map(|position| (position.lng, position.lat))
        .collect();
    if ring.first() != ring.last() {
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
    }
    ring
}
