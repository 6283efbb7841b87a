//! Capabilities a host provides to drive the particle field.

use crate::Rgba;

/// A 2-D drawing context in pixel space.
///
/// Paths work like a canvas context: `begin_path` starts a new path,
/// `arc`/`move_to`/`line_to` extend it, and `fill`/`stroke` paint it with the
/// current fill or stroke style.
pub trait Surface {
    /// Resize the drawing area. Clears everything drawn so far.
    fn resize(&mut self, width: f64, height: f64);
    /// Erase everything inside the rectangle.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    /// Add a circular arc centred on `(x, y)`, angles in radians.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn set_fill_style(&mut self, color: Rgba);
    fn set_stroke_style(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f64);
    fn fill(&mut self);
    fn stroke(&mut self);
}

/// Source of the current drawing area size.
pub trait Viewport {
    /// Current size in pixels as `(width, height)`.
    fn size(&self) -> (f64, f64);

    /// The new size if the viewport changed since the last call.
    fn take_resize(&mut self) -> Option<(f64, f64)>;
}

/// Per-frame scheduling primitive of the host.
pub trait FrameScheduler {
    /// Wait for the next frame boundary.
    ///
    /// Returns `false` once the host has been torn down; no further frames
    /// will be requested after that.
    fn next_frame(&mut self) -> bool;
}
