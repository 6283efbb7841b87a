//! Headless surface that records drawing calls.

use nodefield_core::{Rgba, Surface};

/// A single call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize {
        width: f64,
        height: f64,
    },
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    BeginPath,
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    FillStyle(Rgba),
    StrokeStyle(Rgba),
    LineWidth(f64),
    Fill,
    Stroke,
}

/// A line painted by a `stroke` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokedLine {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: Rgba,
    pub width: f64,
}

/// A disc painted by a `fill` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledArc {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgba,
}

/// Surface that draws nothing and remembers every call.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call recorded so far, oldest first.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget all recorded calls.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Lines painted since the last `clear`, with the style active at the
    /// time of each `stroke`.
    pub fn strokes(&self) -> Vec<StrokedLine> {
        let mut lines = Vec::new();
        let mut path: Vec<&DrawCommand> = Vec::new();
        let mut color = Rgba::opaque(0, 0, 0);
        let mut width = 1.0;

        for command in &self.commands {
            match command {
                DrawCommand::BeginPath => path.clear(),
                DrawCommand::MoveTo { .. } | DrawCommand::LineTo { .. } => path.push(command),
                DrawCommand::StrokeStyle(c) => color = *c,
                DrawCommand::LineWidth(w) => width = *w,
                DrawCommand::Stroke => {
                    let mut cursor = None;
                    for op in &path {
                        match op {
                            DrawCommand::MoveTo { x, y } => cursor = Some((*x, *y)),
                            DrawCommand::LineTo { x, y } => {
                                if let Some(from) = cursor {
                                    lines.push(StrokedLine {
                                        from,
                                        to: (*x, *y),
                                        color,
                                        width,
                                    });
                                }
                                cursor = Some((*x, *y));
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }

        lines
    }

    /// Discs painted since the last `clear`, with the fill style active at
    /// the time of each `fill`.
    pub fn fills(&self) -> Vec<FilledArc> {
        let mut discs = Vec::new();
        let mut arcs: Vec<(f64, f64, f64)> = Vec::new();
        let mut color = Rgba::opaque(0, 0, 0);

        for command in &self.commands {
            match command {
                DrawCommand::BeginPath => arcs.clear(),
                DrawCommand::Arc { x, y, radius, .. } => arcs.push((*x, *y, *radius)),
                DrawCommand::FillStyle(c) => color = *c,
                DrawCommand::Fill => {
                    discs.extend(arcs.iter().map(|&(x, y, radius)| FilledArc {
                        x,
                        y,
                        radius,
                        color,
                    }));
                }
                _ => {}
            }
        }

        discs
    }

    /// Number of `clear_rect` calls since the last `clear`.
    pub fn clears(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::ClearRect { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.commands.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::FillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::StrokeStyle(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strokes_use_active_style() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.set_stroke_style(Rgba::new(1, 2, 3, 0.5));
        surface.set_line_width(2.0);
        surface.move_to(0.0, 0.0);
        surface.line_to(10.0, 0.0);
        surface.line_to(10.0, 10.0);
        surface.stroke();

        let strokes = surface.strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].from, (0.0, 0.0));
        assert_eq!(strokes[1].to, (10.0, 10.0));
        assert_eq!(strokes[1].color.a, 0.5);
        assert_eq!(strokes[1].width, 2.0);
    }

    #[test]
    fn test_begin_path_discards_previous_path() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.arc(1.0, 1.0, 2.0, 0.0, std::f64::consts::TAU);
        surface.begin_path();
        surface.arc(5.0, 5.0, 3.0, 0.0, std::f64::consts::TAU);
        surface.fill();

        let fills = surface.fills();
        assert_eq!(fills.len(), 1);
        assert_eq!((fills[0].x, fills[0].radius), (5.0, 3.0));
    }

    #[test]
    fn test_clear_forgets_commands() {
        let mut surface = RecordingSurface::new();
        surface.clear_rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(surface.clears(), 1);
        surface.clear();
        assert!(surface.commands().is_empty());
    }
}
