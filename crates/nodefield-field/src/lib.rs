//! Particle field animation for nodefield.
//!
//! A fixed set of particles drifts across the drawing area, bouncing off its
//! edges, and every pair closer than the link distance is joined by a line
//! that fades out with distance. The animation is written against the
//! [`nodefield_core::Surface`] capability so it can paint onto the terminal
//! ([`TerminalCanvas`]) or a headless recorder ([`RecordingSurface`]).

mod canvas;
mod links;
mod particle;
mod recording;
mod state;

pub use canvas::{Shape, TerminalCanvas};
pub use links::{DEFAULT_LINK_DISTANCE, link_opacity};
pub use particle::{MAX_SPEED, Particle};
pub use recording::{DrawCommand, FilledArc, RecordingSurface, StrokedLine};
pub use state::{DEFAULT_NODE_COUNT, FieldState, FieldStyle, activate};
