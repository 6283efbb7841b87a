//! Software surface that paints into a ratatui buffer.

use nodefield_core::{Rgba, Surface};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
    },
};

/// A painted primitive, in pixel space with y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// A filled circle.
    Disc {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
    },
    /// A stroked circle outline.
    Ring {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
    },
    /// A stroked line segment.
    Segment {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Rgba,
    },
}

impl Shape {
    /// Bounding box as `(left, top, right, bottom)`.
    fn bounds(&self) -> (f64, f64, f64, f64) {
        match *self {
            Shape::Disc { x, y, radius, .. } | Shape::Ring { x, y, radius, .. } => {
                (x - radius, y - radius, x + radius, y + radius)
            }
            Shape::Segment { x1, y1, x2, y2, .. } => (x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PathOp {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc { x: f64, y: f64, radius: f64 },
}

/// Display-list canvas rendered through ratatui's braille [`Canvas`].
///
/// Arcs are always painted as whole circles. Colours are alpha-blended onto
/// the background when the canvas is rendered.
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    /// Drawing area width in pixels.
    width: f64,
    /// Drawing area height in pixels.
    height: f64,
    /// Opaque colour shown behind every shape.
    background: (u8, u8, u8),
    /// Shapes painted since the last clear, oldest first.
    shapes: Vec<Shape>,
    /// Path under construction.
    path: Vec<PathOp>,
    fill_style: Rgba,
    stroke_style: Rgba,
    line_width: f64,
}

impl Default for TerminalCanvas {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl TerminalCanvas {
    /// Create an empty canvas on a black background.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: (0, 0, 0),
            shapes: Vec::new(),
            path: Vec::new(),
            fill_style: Rgba::opaque(0, 0, 0),
            stroke_style: Rgba::opaque(0, 0, 0),
            line_width: 1.0,
        }
    }

    pub fn with_background(mut self, background: (u8, u8, u8)) -> Self {
        self.background = background;
        self
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn blend(&self, color: Rgba) -> Color {
        let (r, g, b) = color.over(self.background);
        Color::Rgb(r, g, b)
    }

    /// Braille dots covering a disc drawn into `area`, in canvas
    /// coordinates (y up).
    ///
    /// The sample grid never extends past the number of dots in `area`, so
    /// the point count stays bounded however small a dot is in pixels.
    fn disc_points(&self, x: f64, y: f64, radius: f64, area: Rect) -> Vec<(f64, f64)> {
        let dots_x = area.width as i64 * 2;
        let dots_y = area.height as i64 * 4;
        let dot_w = self.width.max(1.0) / dots_x.max(1) as f64;
        let dot_h = self.height.max(1.0) / dots_y.max(1) as f64;

        let cy = self.height.max(1.0) - y;
        let nx = ((radius / dot_w).ceil() as i64).min(dots_x);
        let ny = ((radius / dot_h).ceil() as i64).min(dots_y);
        let mut points = vec![(x, cy)];
        for i in -nx..=nx {
            for j in -ny..=ny {
                if i == 0 && j == 0 {
                    continue;
                }
                let (dx, dy) = (i as f64 * dot_w, j as f64 * dot_h);
                if dx * dx + dy * dy <= radius * radius {
                    points.push((x + dx, cy + dy));
                }
            }
        }
        points
    }
}

impl Surface for TerminalCanvas {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.shapes.clear();
        self.path.clear();
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        // Only the part of the rectangle on the canvas counts.
        let left = x.max(0.0);
        let top = y.max(0.0);
        let right = (x + width).min(self.width);
        let bottom = (y + height).min(self.height);
        if right <= left || bottom <= top {
            return;
        }

        let canvas_w = self.width;
        let canvas_h = self.height;
        self.shapes.retain(|shape| {
            let (l, t, r, b) = shape.bounds();
            let (l, t) = (l.max(0.0), t.max(0.0));
            let (r, b) = (r.min(canvas_w), b.min(canvas_h));
            if r < l || b < t {
                // Entirely off the canvas.
                return false;
            }
            !(l >= left && t >= top && r <= right && b <= bottom)
        });
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start_angle: f64, _end_angle: f64) {
        self.path.push(PathOp::Arc { x, y, radius });
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(PathOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(PathOp::LineTo(x, y));
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.fill_style = color;
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.stroke_style = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn fill(&mut self) {
        let color = self.fill_style;
        for op in &self.path {
            if let PathOp::Arc { x, y, radius } = *op {
                self.shapes.push(Shape::Disc {
                    x,
                    y,
                    radius,
                    color,
                });
            }
        }
    }

    fn stroke(&mut self) {
        let color = self.stroke_style;
        let width = self.line_width;
        let mut cursor = None;
        for op in &self.path {
            match *op {
                PathOp::MoveTo(x, y) => cursor = Some((x, y)),
                PathOp::LineTo(x, y) => {
                    if let Some((x1, y1)) = cursor {
                        self.shapes.push(Shape::Segment {
                            x1,
                            y1,
                            x2: x,
                            y2: y,
                            width,
                            color,
                        });
                    }
                    cursor = Some((x, y));
                }
                PathOp::Arc { x, y, radius } => {
                    self.shapes.push(Shape::Ring {
                        x,
                        y,
                        radius,
                        color,
                    });
                    cursor = Some((x + radius, y));
                }
            }
        }
    }
}

impl Widget for &TerminalCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let width = self.width.max(1.0);
        let height = self.height.max(1.0);
        let (r, g, b) = self.background;

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(Color::Rgb(r, g, b))
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for shape in &self.shapes {
                    match *shape {
                        Shape::Segment {
                            x1,
                            y1,
                            x2,
                            y2,
                            color,
                            ..
                        } => ctx.draw(&CanvasLine::new(
                            x1,
                            height - y1,
                            x2,
                            height - y2,
                            self.blend(color),
                        )),
                        Shape::Ring {
                            x,
                            y,
                            radius,
                            color,
                        } => ctx.draw(&Circle {
                            x,
                            y: height - y,
                            radius,
                            color: self.blend(color),
                        }),
                        Shape::Disc {
                            x,
                            y,
                            radius,
                            color,
                        } => {
                            let coords = self.disc_points(x, y, radius, area);
                            ctx.draw(&Points {
                                coords: &coords,
                                color: self.blend(color),
                            });
                        }
                    }
                }
            })
            .render(area, buf);
    }
}
