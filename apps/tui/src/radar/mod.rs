//! Radar scope: projects vessels around a center position onto a square
//! raster surface and draws rings, sweep and blips.

pub mod controls;
pub mod scope;
pub mod surface;
pub mod sweep;

pub use controls::{ControlKind, RadarControls, DIAL_STEP};
pub use scope::{Projection, RadarScope, RadarTarget, HIT_RADIUS_PX, SURFACE_PX};
pub use surface::{GradientStop, RadarSurface, RecordingSurface, Rgba, SurfaceOp};
pub use sweep::Sweep;
