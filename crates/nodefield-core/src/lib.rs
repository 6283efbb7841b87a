//! Core types for the nodefield particle animation.
//!
//! Holds the colour types shared by the animator and its hosts, plus the
//! capability traits a host implements to run the field: a 2-D drawing
//! [`Surface`], a [`Viewport`] size source, a [`FrameScheduler`] and an
//! injectable [`RandomSource`].

mod color;
mod host;
mod random;

pub use color::{ColorTheme, Rgba};
pub use host::{FrameScheduler, Surface, Viewport};
pub use random::RandomSource;
