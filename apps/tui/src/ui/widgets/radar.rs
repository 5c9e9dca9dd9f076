use fleetwatch::db::models::Vessel;
use fleetwatch::radar::surface::{gradient_at, palette};
use fleetwatch::radar::{GradientStop, RadarScope, RadarSurface, Rgba, SURFACE_PX};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Smallest cell area worth drawing a scope into.
pub const MIN_SCOPE_CELLS: (u16, u16) = (12, 6);

/// Radial lines per degree of sweep wedge.
const WEDGE_RAYS_PER_DEG: f64 = 1.0;
/// Segments per wedge ray, each shaded from the gradient at its midpoint.
const WEDGE_SEGMENTS: u32 = 6;
/// Gradient alpha at or below which a wedge segment is not drawn.
const FADED_ALPHA: f64 = 0.01;

#[derive(Debug, Clone)]
enum Shape {
    Circle { x: f64, y: f64, radius: f64, color: Color },
    Dot { x: f64, y: f64, color: Color },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, color: Color },
    Text { x: f64, y: f64, text: String, color: Color },
}

/// Collects scope drawing calls as canvas shapes.
///
/// Translucent colors are composited over the scope background up front
/// because canvas cells hold a single opaque color. The y axis is flipped
/// since the canvas grows upward.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    width: f64,
    height: f64,
    background: (u8, u8, u8),
    shapes: Vec<Shape>,
}

impl CanvasSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: palette::BACKGROUND.over((0, 0, 0)),
            shapes: Vec::new(),
        }
    }

    fn color(&self, color: Rgba) -> Color {
        let (r, g, b) = color.over(self.background);
        Color::Rgb(r, g, b)
    }

    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }

    pub fn background(&self) -> Color {
        let (r, g, b) = self.background;
        Color::Rgb(r, g, b)
    }

    /// Paints the collected shapes into `area`.
    pub fn render(self, f: &mut Frame<'_>, area: Rect) {
        let background = self.background();
        let (width, height) = (self.width, self.height);
        let shapes = self.shapes;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(background)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(move |ctx| {
                for shape in &shapes {
                    match shape {
                        Shape::Circle { x, y, radius, color } => ctx.draw(&Circle {
                            x: *x,
                            y: *y,
                            radius: *radius,
                            color: *color,
                        }),
                        Shape::Dot { x, y, color } => ctx.draw(&Points {
                            coords: &[(*x, *y)],
                            color: *color,
                        }),
                        Shape::Line { x1, y1, x2, y2, color } => ctx.draw(&CanvasLine {
                            x1: *x1,
                            y1: *y1,
                            x2: *x2,
                            y2: *y2,
                            color: *color,
                        }),
                        Shape::Text { .. } => {}
                    }
                }
                // Labels go on a layer above the rings and blips.
                ctx.layer();
                for shape in &shapes {
                    if let Shape::Text { x, y, text, color } = shape {
                        ctx.print(*x, *y, Span::styled(text.clone(), Style::default().fg(*color)));
                    }
                }
            });
        f.render_widget(canvas, area);
    }
}

impl RadarSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Rgba) {
        self.background = color.over((0, 0, 0));
        self.shapes.clear();
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, filled: bool) {
        let color = self.color(color);
        let y = self.flip(y);
        self.shapes.push(Shape::Circle { x, y, radius, color });
        if filled {
            let mut inner = radius / 2.0;
            while inner >= 1.0 {
                self.shapes.push(Shape::Circle {
                    x,
                    y,
                    radius: inner,
                    color,
                });
                inner /= 2.0;
            }
            self.shapes.push(Shape::Dot { x, y, color });
        }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba) {
        let color = self.color(color);
        self.shapes.push(Shape::Line {
            x1: from.0,
            y1: self.flip(from.1),
            x2: to.0,
            y2: self.flip(to.1),
            color,
        });
    }

    fn text(&mut self, x: f64, y: f64, text: &str, color: Rgba) {
        let color = self.color(color);
        self.shapes.push(Shape::Text {
            x,
            y: self.flip(y),
            text: text.to_string(),
            color,
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn wedge(
        &mut self,
        center: (f64, f64),
        radius: f64,
        start_rad: f64,
        end_rad: f64,
        gradient: &[GradientStop],
    ) {
        let span_deg = (end_rad - start_rad).to_degrees().abs();
        let rays = (span_deg * WEDGE_RAYS_PER_DEG).ceil().max(1.0) as u32;
        for ray in 0..=rays {
            let angle = (end_rad - start_rad).mul_add(f64::from(ray) / f64::from(rays), start_rad);
            let (sin, cos) = angle.sin_cos();
            for segment in 0..WEDGE_SEGMENTS {
                let near = f64::from(segment) / f64::from(WEDGE_SEGMENTS);
                let far = f64::from(segment + 1) / f64::from(WEDGE_SEGMENTS);
                let (Some(shade), Some(edge)) = (
                    gradient_at(gradient, (near + far) / 2.0),
                    gradient_at(gradient, far),
                ) else {
                    return;
                };
                // Segments that have faded out by their outer edge are dropped.
                if edge.a <= FADED_ALPHA {
                    continue;
                }
                self.line(
                    (cos.mul_add(radius * near, center.0), sin.mul_add(radius * near, center.1)),
                    (cos.mul_add(radius * far, center.0), sin.mul_add(radius * far, center.1)),
                    shade,
                );
            }
        }
    }
}

/// Largest rect inside `area` whose cells show a square surface.
/// Terminal cells are about twice as tall as they are wide.
pub fn square_cells(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let height = (width / 2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draws `scope` over `vessels` into `area`. Undersized areas skip the frame.
pub fn render_scope(f: &mut Frame<'_>, area: Rect, scope: &RadarScope, vessels: &[Vessel]) {
    if area.width < MIN_SCOPE_CELLS.0 || area.height < MIN_SCOPE_CELLS.1 {
        let paragraph = Paragraph::new("Radar area too small")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(paragraph, area);
        return;
    }

    let mut surface = CanvasSurface::new(SURFACE_PX, SURFACE_PX);
    if scope.render(&mut surface, vessels) {
        surface.render(f, area);
    }
}

/// Compact scope for the dashboard.
pub fn render_mini_radar(f: &mut Frame<'_>, area: Rect, scope: &RadarScope, vessels: &[Vessel]) {
    let block = Block::default()
        .title(format!(" Radar · {:.0} NM ", scope.range_nm()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);
    render_scope(f, square_cells(inner), scope, vessels);
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetwatch::geo::Position;

    #[test]
    fn square_cells_keeps_a_two_to_one_shape() {
        let fitted = square_cells(Rect::new(0, 0, 100, 20));
        assert_eq!(fitted.width, 40);
        assert_eq!(fitted.height, 20);
        assert_eq!(fitted.x, 30);

        let tall = square_cells(Rect::new(0, 0, 30, 40));
        assert_eq!(tall.width, 30);
        assert_eq!(tall.height, 15);
    }

    #[test]
    fn surface_flips_y_and_composites_colors() {
        let mut surface = CanvasSurface::new(600.0, 600.0);
        surface.fill(palette::BACKGROUND);
        surface.line((0.0, 0.0), (10.0, 100.0), Rgba::new(255, 255, 255, 1.0));

        match surface.shapes.first() {
            Some(Shape::Line { y1, y2, color, .. }) => {
                assert!((y1 - 600.0).abs() < f64::EPSILON);
                assert!((y2 - 500.0).abs() < f64::EPSILON);
                assert_eq!(*color, Color::Rgb(255, 255, 255));
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn transparent_wedge_tail_is_not_drawn() {
        let mut surface = CanvasSurface::new(600.0, 600.0);
        let stops = [
            GradientStop {
                offset: 0.0,
                color: palette::SWEEP,
            },
            GradientStop {
                offset: 1.0,
                color: palette::SWEEP.with_alpha(0.0),
            },
        ];
        surface.wedge((300.0, 300.0), 280.0, 0.0, 0.1, &stops);

        let rays = (0.1_f64.to_degrees()).ceil() as usize + 1;
        // Every ray keeps its inner segments and drops the one ending at the rim.
        assert_eq!(surface.shapes.len(), rays * (WEDGE_SEGMENTS as usize - 1));
        assert!(surface.shapes.iter().all(|shape| match shape {
            Shape::Line { x1, y1, x2, y2, .. } => {
                let inner = (x1 - 300.0).hypot(y1 - 300.0);
                let outer = (x2 - 300.0).hypot(y2 - 300.0);
                inner < outer && outer < 280.0 - 1.0
            }
            _ => false,
        }));
    }

    #[test]
    fn fully_transparent_gradient_draws_nothing() {
        let mut surface = CanvasSurface::new(600.0, 600.0);
        let clear = palette::SWEEP.with_alpha(0.0);
        let stops = [
            GradientStop {
                offset: 0.0,
                color: clear,
            },
            GradientStop {
                offset: 1.0,
                color: clear,
            },
        ];
        surface.wedge((300.0, 300.0), 280.0, 0.0, 0.5, &stops);
        assert!(surface.shapes.is_empty());
    }

    #[test]
    fn scope_renders_onto_the_canvas_surface() {
        let scope = RadarScope::new(Position::new(27.0, 56.0), 50.0);
        let mut surface = CanvasSurface::new(SURFACE_PX, SURFACE_PX);
        assert!(scope.render(&mut surface, &[]));
        assert!(surface
            .shapes
            .iter()
            .any(|shape| matches!(shape, Shape::Text { text, .. } if text == "N")));
    }
}
