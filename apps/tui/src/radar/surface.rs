//! Drawing target for the scope. Coordinates are raster pixels with the
//! origin top-left and y growing downward.

/// Straight-alpha color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Composites `self` over an opaque `base`, returning opaque channels.
    pub fn over(self, base: (u8, u8, u8)) -> (u8, u8, u8) {
        let alpha = self.a.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| -> u8 {
            let value = f64::from(top).mul_add(alpha, f64::from(bottom) * (1.0 - alpha));
            value.round().clamp(0.0, 255.0) as u8
        };
        (mix(self.r, base.0), mix(self.g, base.1), mix(self.b, base.2))
    }

    /// Linear interpolation between two colors, `t` in `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            (f64::from(b) - f64::from(a))
                .mul_add(t, f64::from(a))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: (other.a - self.a).mul_add(t, self.a),
        }
    }
}

pub mod palette {
    use super::Rgba;

    pub const BACKGROUND: Rgba = Rgba::new(0, 20, 40, 0.95);
    pub const RING: Rgba = Rgba::new(0, 255, 100, 0.3);
    pub const RING_LABEL: Rgba = Rgba::new(0, 255, 100, 0.6);
    pub const AXIS: Rgba = Rgba::new(0, 255, 100, 0.4);
    pub const CARDINAL: Rgba = Rgba::new(0, 255, 100, 0.8);
    pub const BLIP: Rgba = Rgba::new(0, 255, 100, 0.8);
    pub const SELECTED: Rgba = Rgba::new(255, 200, 0, 0.9);
    pub const TRAIL: Rgba = Rgba::new(0, 255, 100, 0.4);
    pub const SELECTED_TRAIL: Rgba = Rgba::new(255, 200, 0, 0.5);
    pub const LABEL: Rgba = Rgba::new(255, 255, 255, 0.9);
    pub const CENTER: Rgba = Rgba::new(255, 100, 0, 0.8);
    pub const SWEEP: Rgba = Rgba::new(0, 255, 100, 0.3);
}

/// Color at a fractional distance along a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Color of a stop list at `offset`, interpolating between neighbours.
pub fn gradient_at(stops: &[GradientStop], offset: f64) -> Option<Rgba> {
    let first = stops.first()?;
    if offset <= first.offset {
        return Some(first.color);
    }
    for pair in stops.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if offset <= to.offset {
            let span = to.offset - from.offset;
            let t = if span > 0.0 {
                (offset - from.offset) / span
            } else {
                1.0
            };
            return Some(from.color.lerp(to.color, t));
        }
    }
    stops.last().map(|stop| stop.color)
}

pub trait RadarSurface {
    /// Raster size in pixels, `(width, height)`.
    fn size(&self) -> (f64, f64);

    fn fill(&mut self, color: Rgba);

    fn circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, filled: bool);

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba);

    fn text(&mut self, x: f64, y: f64, text: &str, color: Rgba);

    /// Pie slice around `(cx, cy)` between two angles in radians, measured
    /// clockwise from the +x axis, shaded by a radial gradient.
    fn wedge(
        &mut self,
        center: (f64, f64),
        radius: f64,
        start_rad: f64,
        end_rad: f64,
        gradient: &[GradientStop],
    );
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Fill(Rgba),
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
        filled: bool,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgba,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        color: Rgba,
    },
    Wedge {
        center: (f64, f64),
        radius: f64,
        start_rad: f64,
        end_rad: f64,
        gradient: Vec<GradientStop>,
    },
}

/// Surface that keeps the calls made on it instead of drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Filled circles with the given radius, as `(x, y, color)`.
    pub fn dots(&self, radius: f64) -> Vec<(f64, f64, Rgba)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Circle {
                    x,
                    y,
                    radius: r,
                    color,
                    filled: true,
                } if (*r - radius).abs() < f64::EPSILON => Some((*x, *y, *color)),
                _ => None,
            })
            .collect()
    }
}

impl RadarSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Rgba) {
        self.ops.push(SurfaceOp::Fill(color));
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, filled: bool) {
        self.ops.push(SurfaceOp::Circle {
            x,
            y,
            radius,
            color,
            filled,
        });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba) {
        self.ops.push(SurfaceOp::Line { from, to, color });
    }

    fn text(&mut self, x: f64, y: f64, text: &str, color: Rgba) {
        self.ops.push(SurfaceOp::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }

    fn wedge(
        &mut self,
        center: (f64, f64),
        radius: f64,
        start_rad: f64,
        end_rad: f64,
        gradient: &[GradientStop],
    ) {
        self.ops.push(SurfaceOp::Wedge {
            center,
            radius,
            start_rad,
            end_rad,
            gradient: gradient.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_blends_toward_base() {
        let half_white = Rgba::new(255, 255, 255, 0.5);
        assert_eq!(half_white.over((0, 0, 0)), (128, 128, 128));
        assert_eq!(half_white.with_alpha(0.0).over((10, 20, 30)), (10, 20, 30));
        assert_eq!(half_white.with_alpha(1.0).over((10, 20, 30)), (255, 255, 255));
    }

    #[test]
    fn gradient_interpolates_between_stops() {
        let stops = [
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
        ];

        let quarter = gradient_at(&stops, 0.25).map(|c| c.a);
        let rim = gradient_at(&stops, 1.0).map(|c| c.a);
        let beyond = gradient_at(&stops, 2.0).map(|c| c.a);

        assert!(quarter.is_some_and(|a| (a - 0.2).abs() < 1e-9));
        assert!(rim.is_some_and(|a| a.abs() < 1e-9));
        assert!(beyond.is_some_and(|a| a.abs() < 1e-9));
        assert_eq!(gradient_at(&[], 0.5), None);
    }
}
