use std::f64::consts::PI;

use serde::Serialize;

use super::controls::RadarControls;
use super::surface::{palette, GradientStop, RadarSurface};
use super::sweep::Sweep;
use crate::db::models::Vessel;
use crate::geo::{self, Position};

/// Side of the square raster the scope is laid out on.
pub const SURFACE_PX: f64 = 600.0;
/// Clicks strictly closer than this to a blip select it.
pub const HIT_RADIUS_PX: f64 = 10.0;
/// Gap between the outer ring and the surface edge.
const RIM_MARGIN_PX: f64 = 20.0;
const BLIP_RADIUS_PX: f64 = 4.0;
const SELECTED_BLIP_RADIUS_PX: f64 = 6.0;
const TRAIL_PX: f64 = 20.0;
const CENTER_MARKER_PX: f64 = 3.0;
const RING_COUNT: u8 = 4;
/// Half the sweep wedge's opening angle.
const SWEEP_HALF_WIDTH_RAD: f64 = PI / 12.0;

/// Selectable scope ranges in nautical miles.
pub const RANGE_STEPS_NM: [f64; 7] = [5.0, 10.0, 25.0, 50.0, 100.0, 200.0, 400.0];

/// A vessel's place on the scope for the current frame. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarTarget {
    pub vessel_id: String,
    pub distance_nm: f64,
    pub bearing_deg: f64,
    pub screen_x: f64,
    pub screen_y: f64,
}

/// Maps positions to surface pixels for one surface size, center and range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub center: Position,
    pub range_nm: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Projection {
    /// `None` when the surface is too small to hold a scope.
    pub fn new(width: f64, height: f64, center: Position, range_nm: f64) -> Option<Self> {
        let radius = width.min(height) / 2.0 - RIM_MARGIN_PX;
        if radius.is_nan() || radius <= 0.0 || range_nm.is_nan() || range_nm <= 0.0 {
            return None;
        }
        Some(Self {
            center,
            range_nm,
            center_x: width / 2.0,
            center_y: height / 2.0,
            radius,
        })
    }

    /// Places a vessel, or `None` when it lies beyond the range.
    pub fn project(&self, vessel: &Vessel) -> Option<RadarTarget> {
        let distance_nm = geo::distance_nm(self.center, vessel.position);
        if distance_nm.is_nan() || distance_nm > self.range_nm {
            return None;
        }
        let bearing_deg = geo::bearing_deg(self.center, vessel.position);
        let offset = distance_nm / self.range_nm * self.radius;
        let bearing_rad = bearing_deg.to_radians();

        Some(RadarTarget {
            vessel_id: vessel.id.clone(),
            distance_nm,
            bearing_deg,
            screen_x: offset.mul_add(bearing_rad.sin(), self.center_x),
            screen_y: (-offset).mul_add(bearing_rad.cos(), self.center_y),
        })
    }
}

/// Radar display state: dials, sweep, selection, center and range.
#[derive(Debug, Clone)]
pub struct RadarScope {
    pub controls: RadarControls,
    pub sweep: Sweep,
    center: Position,
    range_nm: f64,
    selected: Option<String>,
}

impl RadarScope {
    pub fn new(center: Position, range_nm: f64) -> Self {
        Self {
            controls: RadarControls::default(),
            sweep: Sweep::new(),
            center,
            range_nm,
            selected: None,
        }
    }

    pub const fn center(&self) -> Position {
        self.center
    }

    pub const fn range_nm(&self) -> f64 {
        self.range_nm
    }

    pub fn set_range_nm(&mut self, range_nm: f64) {
        if range_nm > 0.0 {
            self.range_nm = range_nm;
        }
    }

    /// Next wider (`outward`) or narrower range step.
    pub fn zoom(&mut self, outward: bool) {
        let next = if outward {
            RANGE_STEPS_NM.iter().find(|step| **step > self.range_nm)
        } else {
            RANGE_STEPS_NM.iter().rev().find(|step| **step < self.range_nm)
        };
        if let Some(step) = next {
            self.range_nm = *step;
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, vessel_id: Option<String>) {
        self.selected = vessel_id;
    }

    pub fn projection(&self, width: f64, height: f64) -> Option<Projection> {
        Projection::new(width, height, self.center, self.range_nm)
    }

    /// In-range targets on a `width` × `height` surface, in vessel order.
    pub fn targets<'v>(
        &self,
        width: f64,
        height: f64,
        vessels: &'v [Vessel],
    ) -> Vec<(&'v Vessel, RadarTarget)> {
        let Some(projection) = self.projection(width, height) else {
            return Vec::new();
        };
        vessels
            .iter()
            .filter_map(|vessel| projection.project(vessel).map(|target| (vessel, target)))
            .collect()
    }

    /// Selects the first vessel whose blip lies strictly within
    /// [`HIT_RADIUS_PX`] of `(x, y)`, or clears the selection.
    pub fn hit_test<'v>(
        &mut self,
        width: f64,
        height: f64,
        vessels: &'v [Vessel],
        x: f64,
        y: f64,
    ) -> Option<&'v Vessel> {
        self.hit_test_within(width, height, vessels, (x, y), HIT_RADIUS_PX)
    }

    /// Like [`Self::hit_test`] with a caller supplied radius, for pointers
    /// coarser than a surface pixel. Radii below [`HIT_RADIUS_PX`] are raised to it.
    pub fn hit_test_within<'v>(
        &mut self,
        width: f64,
        height: f64,
        vessels: &'v [Vessel],
        (x, y): (f64, f64),
        radius: f64,
    ) -> Option<&'v Vessel> {
        let radius = radius.max(HIT_RADIUS_PX);
        let hit = self
            .targets(width, height, vessels)
            .into_iter()
            .find(|(_, target)| (x - target.screen_x).hypot(y - target.screen_y) < radius)
            .map(|(vessel, _)| vessel);

        self.selected = hit.map(|vessel| vessel.id.clone());
        hit
    }

    /// Moves the selection to the next (or previous) in-range target.
    pub fn cycle_selection(&mut self, vessels: &[Vessel], forward: bool) {
        let ids: Vec<String> = self
            .targets(SURFACE_PX, SURFACE_PX, vessels)
            .into_iter()
            .map(|(vessel, _)| vessel.id.clone())
            .collect();
        if ids.is_empty() {
            self.selected = None;
            return;
        }

        let current = self
            .selected
            .as_ref()
            .and_then(|selected| ids.iter().position(|id| id == selected));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => ids.len() - 1,
            (Some(index), true) => (index + 1) % ids.len(),
            (Some(index), false) => (index + ids.len() - 1) % ids.len(),
        };
        self.selected = ids.get(next).cloned();
    }

    /// Draws one frame. Returns `false` and draws nothing when the surface is too small.
    pub fn render<S: RadarSurface + ?Sized>(&self, surface: &mut S, vessels: &[Vessel]) -> bool {
        let (width, height) = surface.size();
        let Some(projection) = self.projection(width, height) else {
            return false;
        };
        let center = (projection.center_x, projection.center_y);
        let radius = projection.radius;

        surface.fill(palette::BACKGROUND);
        self.draw_rings(surface, &projection);
        draw_axes(surface, center, radius);

        let sweep_rad = self.sweep.angle_deg().to_radians();
        surface.wedge(
            center,
            radius,
            sweep_rad - SWEEP_HALF_WIDTH_RAD,
            sweep_rad + SWEEP_HALF_WIDTH_RAD,
            &[
                GradientStop {
                    offset: 0.0,
                    color: palette::SWEEP,
                },
                GradientStop {
                    offset: 0.5,
                    color: palette::SWEEP.with_alpha(0.1),
                },
                GradientStop {
                    offset: 1.0,
                    color: palette::SWEEP.with_alpha(0.0),
                },
            ],
        );

        for vessel in vessels {
            if let Some(target) = projection.project(vessel) {
                self.draw_blip(surface, vessel, &target);
            }
        }

        surface.circle(center.0, center.1, CENTER_MARKER_PX, palette::CENTER, true);
        true
    }

    fn draw_rings<S: RadarSurface + ?Sized>(&self, surface: &mut S, projection: &Projection) {
        for i in 1..=RING_COUNT {
            let ring_radius = projection.radius / f64::from(RING_COUNT) * f64::from(i);
            surface.circle(
                projection.center_x,
                projection.center_y,
                ring_radius,
                palette::RING,
                false,
            );
            let label = format!(
                "{:.0} NM",
                self.range_nm / f64::from(RING_COUNT) * f64::from(i)
            );
            surface.text(
                projection.center_x + 5.0,
                projection.center_y - ring_radius + 5.0,
                &label,
                palette::RING_LABEL,
            );
        }
    }

    fn draw_blip<S: RadarSurface + ?Sized>(
        &self,
        surface: &mut S,
        vessel: &Vessel,
        target: &RadarTarget,
    ) {
        let selected = self.selected.as_deref() == Some(vessel.id.as_str());
        let (x, y) = (target.screen_x, target.screen_y);

        let (color, blip_radius) = if selected {
            (palette::SELECTED, SELECTED_BLIP_RADIUS_PX)
        } else {
            let intensity = self.controls.intensity(target.distance_nm, self.range_nm);
            (palette::BLIP.with_alpha(intensity), BLIP_RADIUS_PX)
        };
        surface.circle(x, y, blip_radius, color, true);

        if vessel.speed > 0.0 {
            let heading_rad = vessel.heading.to_radians();
            let tail = (
                (-TRAIL_PX).mul_add(heading_rad.sin(), x),
                TRAIL_PX.mul_add(heading_rad.cos(), y),
            );
            let trail_color = if selected {
                palette::SELECTED_TRAIL
            } else {
                palette::TRAIL
            };
            surface.line((x, y), tail, trail_color);
        }

        if selected {
            surface.text(x, y - 15.0, &vessel.name, palette::LABEL);
        }
    }
}

fn draw_axes<S: RadarSurface + ?Sized>(surface: &mut S, center: (f64, f64), radius: f64) {
    let (cx, cy) = center;
    surface.line((cx, cy - radius), (cx, cy + radius), palette::AXIS);
    surface.line((cx - radius, cy), (cx + radius, cy), palette::AXIS);

    surface.text(cx, cy - radius - 5.0, "N", palette::CARDINAL);
    surface.text(cx, cy + radius + 15.0, "S", palette::CARDINAL);
    surface.text(cx - radius - 5.0, cy + 5.0, "W", palette::CARDINAL);
    surface.text(cx + radius + 5.0, cy + 5.0, "E", palette::CARDINAL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed;
    use crate::radar::surface::{RecordingSurface, SurfaceOp};

    const CENTER: Position = Position::new(27.1865, 56.2808);

    fn vessel_at(id: &str, lat: f64, lng: f64) -> Vessel {
        let template = seed::vessels().remove(0);
        Vessel {
            id: id.to_string(),
            name: format!("Vessel {id}"),
            position: Position::new(lat, lng),
            ..template
        }
    }

    #[test]
    fn north_target_is_straight_up() {
        let scope = RadarScope::new(CENTER, 50.0);
        let vessels = vec![vessel_at("n", 27.1965, 56.2808)];

        let targets = scope.targets(SURFACE_PX, SURFACE_PX, &vessels);

        let (_, target) = &targets[0];
        assert!((target.distance_nm - 0.6).abs() < 1e-6);
        assert!(target.bearing_deg.abs() < 1e-6);
        assert!((target.screen_x - 300.0).abs() < 1e-9);
        // 0.6 / 50 of a 280 px radius
        assert!((target.screen_y - (300.0 - 3.36)).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_vessels_are_neither_drawn_nor_clickable() {
        let mut scope = RadarScope::new(CENTER, 50.0);
        // a little over 71 NM south-west
        let far = vessel_at("far", 26.0, 55.5);
        let vessels = vec![far];

        let mut surface = RecordingSurface::new(SURFACE_PX, SURFACE_PX);
        assert!(scope.render(&mut surface, &vessels));
        assert!(surface.dots(BLIP_RADIUS_PX).is_empty());

        let projection = Projection {
            range_nm: 1000.0,
            ..scope.projection(SURFACE_PX, SURFACE_PX).expect("surface fits")
        };
        let wide = projection.project(&vessels[0]).expect("in range at 1000 NM");
        assert!(wide.distance_nm > 50.0);

        for (x, y) in [(wide.screen_x, wide.screen_y), (300.0, 300.0)] {
            assert!(scope.hit_test(SURFACE_PX, SURFACE_PX, &vessels, x, y).is_none());
        }
        assert_eq!(scope.selected(), None);
    }

    #[test]
    fn click_within_ten_pixels_selects_and_farther_clears() {
        let mut scope = RadarScope::new(CENTER, 50.0);
        let vessels = vec![vessel_at("a", 27.3, 56.4)];
        let (_, target) = scope.targets(SURFACE_PX, SURFACE_PX, &vessels).remove(0);

        let hit = scope.hit_test(
            SURFACE_PX,
            SURFACE_PX,
            &vessels,
            target.screen_x + 6.0,
            target.screen_y - 7.0,
        );
        assert_eq!(hit.map(|v| v.id.as_str()), Some("a"));
        assert_eq!(scope.selected(), Some("a"));

        let miss = scope.hit_test(
            SURFACE_PX,
            SURFACE_PX,
            &vessels,
            target.screen_x + 10.0,
            target.screen_y,
        );
        assert!(miss.is_none());
        assert_eq!(scope.selected(), None);
    }

    #[test]
    fn wider_radius_reaches_blips_a_coarse_pointer_misses() {
        let mut scope = RadarScope::new(CENTER, 50.0);
        let vessels = vec![vessel_at("a", 27.3, 56.4)];
        let (_, target) = scope.targets(SURFACE_PX, SURFACE_PX, &vessels).remove(0);
        let point = (target.screen_x + 5.0, target.screen_y + 10.0);

        assert!(scope
            .hit_test(SURFACE_PX, SURFACE_PX, &vessels, point.0, point.1)
            .is_none());
        let hit = scope.hit_test_within(SURFACE_PX, SURFACE_PX, &vessels, point, 12.5);
        assert_eq!(hit.map(|v| v.id.as_str()), Some("a"));

        // Never tighter than the surface radius.
        let near = (target.screen_x + 6.0, target.screen_y);
        let hit = scope.hit_test_within(SURFACE_PX, SURFACE_PX, &vessels, near, 1.0);
        assert_eq!(hit.map(|v| v.id.as_str()), Some("a"));
    }

    #[test]
    fn overlapping_blips_pick_the_first_in_order() {
        let mut scope = RadarScope::new(CENTER, 50.0);
        let vessels = vec![vessel_at("first", 27.3, 56.4), vessel_at("second", 27.3, 56.4)];
        let (_, target) = scope.targets(SURFACE_PX, SURFACE_PX, &vessels).remove(0);

        let hit = scope.hit_test(SURFACE_PX, SURFACE_PX, &vessels, target.screen_x, target.screen_y);

        assert_eq!(hit.map(|v| v.id.as_str()), Some("first"));
    }

    #[test]
    fn frame_draws_rings_labels_and_center() {
        let scope = RadarScope::new(CENTER, 50.0);
        let mut surface = RecordingSurface::new(SURFACE_PX, SURFACE_PX);

        assert!(scope.render(&mut surface, &seed::vessels()));

        assert_eq!(surface.ops.first(), Some(&SurfaceOp::Fill(palette::BACKGROUND)));
        let labels: Vec<&str> = surface.texts().collect();
        for expected in ["25 NM", "50 NM", "N", "E", "S", "W"] {
            assert!(labels.contains(&expected), "missing label {expected}");
        }
        let rings = surface
            .ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Circle { filled: false, .. }))
            .count();
        assert_eq!(rings, 4);
        assert_eq!(
            surface.ops.last(),
            Some(&SurfaceOp::Circle {
                x: 300.0,
                y: 300.0,
                radius: CENTER_MARKER_PX,
                color: palette::CENTER,
                filled: true,
            })
        );
    }

    #[test]
    fn selected_blip_is_amber_and_named() {
        let mut scope = RadarScope::new(CENTER, 50.0);
        let vessels = seed::vessels();
        scope.select(Some("v3".to_string()));
        let mut surface = RecordingSurface::new(SURFACE_PX, SURFACE_PX);

        scope.render(&mut surface, &vessels);

        let selected = surface.dots(SELECTED_BLIP_RADIUS_PX);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].2, palette::SELECTED);
        assert!(surface.texts().any(|text| text == "Pars Trader"));
    }

    #[test]
    fn trail_points_away_from_heading_for_moving_vessels() {
        let scope = RadarScope::new(CENTER, 50.0);
        let mut moving = vessel_at("m", 27.3, 56.4);
        moving.speed = 10.0;
        moving.heading = 90.0;
        let mut still = vessel_at("s", 27.0, 56.1);
        still.speed = 0.0;
        let mut surface = RecordingSurface::new(SURFACE_PX, SURFACE_PX);

        scope.render(&mut surface, &[moving, still]);

        let trails: Vec<_> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Line { from, to, color }
                    if *color == palette::TRAIL
                        && ((from.0 - to.0).hypot(from.1 - to.1) - TRAIL_PX).abs() < 1e-9 =>
                {
                    Some((*from, *to))
                }
                _ => None,
            })
            .collect();
        assert_eq!(trails.len(), 1);
        let (from, to) = trails[0];
        assert!((from.0 - to.0 - TRAIL_PX).abs() < 1e-9);
        assert!((to.1 - from.1).abs() < 1e-9);
    }

    #[test]
    fn sweep_wedge_follows_the_sweep_angle() {
        let mut scope = RadarScope::new(CENTER, 50.0);
        for _ in 0..45 {
            scope.sweep.step();
        }
        let mut surface = RecordingSurface::new(SURFACE_PX, SURFACE_PX);
        scope.render(&mut surface, &[]);

        let wedge = surface.ops.iter().find_map(|op| match op {
            SurfaceOp::Wedge {
                start_rad, end_rad, ..
            } => Some((*start_rad + *end_rad) / 2.0),
            _ => None,
        });
        assert!(wedge.is_some_and(|mid| (mid - PI / 2.0).abs() < 1e-9));
    }

    #[test]
    fn undersized_surface_skips_the_frame() {
        let scope = RadarScope::new(CENTER, 50.0);
        let mut surface = RecordingSurface::new(40.0, 300.0);

        assert!(!scope.render(&mut surface, &seed::vessels()));
        assert!(surface.ops.is_empty());
        assert!(scope.targets(40.0, 300.0, &seed::vessels()).is_empty());
    }

    #[test]
    fn zoom_walks_range_steps_and_cycle_wraps() {
        let mut scope = RadarScope::new(CENTER, 50.0);
        scope.zoom(true);
        assert!((scope.range_nm() - 100.0).abs() < f64::EPSILON);
        scope.zoom(false);
        scope.zoom(false);
        assert!((scope.range_nm() - 25.0).abs() < f64::EPSILON);

        let mut scope = RadarScope::new(CENTER, 100.0);
        let vessels = seed::vessels();
        scope.cycle_selection(&vessels, true);
        assert_eq!(scope.selected(), Some("v1"));
        scope.cycle_selection(&vessels, false);
        assert_eq!(scope.selected(), Some("v3"));
    }
}
