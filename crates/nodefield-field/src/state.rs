//! Particle field animation state management.

use std::f64::consts::TAU;

use nodefield_core::{ColorTheme, FrameScheduler, RandomSource, Rgba, Surface, Viewport};

use crate::links::{DEFAULT_LINK_DISTANCE, link_opacity};
use crate::particle::{self, Particle};

/// Number of particles in a default field.
pub const DEFAULT_NODE_COUNT: usize = 60;

/// Colours and link geometry used when painting the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStyle {
    /// Fill for node discs.
    pub node_fill: Rgba,
    /// Link colour; its alpha is replaced by the per-link opacity.
    pub link_color: Rgba,
    /// Pairs at or beyond this distance are not linked.
    pub link_distance: f64,
    /// Stroke width for links.
    pub line_width: f64,
}

impl FieldStyle {
    /// Style derived from a colour theme with the default link distance.
    pub fn from_theme(theme: ColorTheme) -> Self {
        Self {
            node_fill: theme.node_fill(),
            link_color: theme.link_base(),
            link_distance: DEFAULT_LINK_DISTANCE,
            line_width: 1.0,
        }
    }

    pub fn with_link_distance(mut self, link_distance: f64) -> Self {
        self.link_distance = link_distance;
        self
    }
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self::from_theme(ColorTheme::default())
    }
}

/// Particle field animation state.
///
/// Owned by whichever component hosts the animation and passed to
/// [`FieldState::tick`] and [`FieldState::resize`] explicitly.
#[derive(Debug, Clone)]
pub struct FieldState {
    /// Particles, created once and moved every tick.
    particles: Vec<Particle>,
    /// Width used for edge reflection.
    width: f64,
    /// Height used for edge reflection.
    height: f64,
    /// Paint settings.
    style: FieldStyle,
    /// Ticks performed so far.
    frames: u64,
}

impl FieldState {
    /// Create a field of `count` randomly placed particles.
    pub fn initialize<R: RandomSource + ?Sized>(
        width: f64,
        height: f64,
        count: usize,
        rng: &mut R,
    ) -> Self {
        Self::from_particles(width, height, particle::init_particles(width, height, count, rng))
    }

    /// Create a field from explicit particles.
    pub fn from_particles(width: f64, height: f64, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            width,
            height,
            style: FieldStyle::default(),
            frames: 0,
        }
    }

    pub fn with_style(mut self, style: FieldStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the paint settings. Particles are left untouched.
    pub fn set_style(&mut self, style: FieldStyle) {
        self.style = style;
    }

    pub fn style(&self) -> &FieldStyle {
        &self.style
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Dimensions used for edge reflection, as `(width, height)`.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Number of ticks performed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Adopt new dimensions and resize the surface.
    ///
    /// Particles keep their positions; any left outside a smaller area head
    /// back in under their own motion.
    pub fn resize<S: Surface + ?Sized>(&mut self, surface: &mut S, width: f64, height: f64) {
        if width != self.width || height != self.height {
            tracing::debug!(width, height, "particle field resized");
        }
        self.width = width;
        self.height = height;
        surface.resize(width, height);
    }

    /// Advance every particle one frame and repaint the surface.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        particle::update(&mut self.particles, self.width, self.height);
        self.draw(surface);
        self.frames += 1;
    }

    /// Repaint the current frame without moving anything.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear_rect(0.0, 0.0, self.width, self.height);
        self.draw_links(surface);
        self.draw_nodes(surface);
    }

    /// Tick once per host frame until the host is torn down.
    ///
    /// The field first adopts the host's current viewport size, then
    /// pending viewport changes are applied before each tick. Returns the
    /// number of ticks performed by this call.
    pub fn run<H>(&mut self, host: &mut H) -> u64
    where
        H: Surface + Viewport + FrameScheduler + ?Sized,
    {
        let (width, height) = host.size();
        if (width, height) != self.size() {
            self.resize(host, width, height);
        }

        let start = self.frames;
        while host.next_frame() {
            if let Some((width, height)) = host.take_resize() {
                self.resize(host, width, height);
            }
            self.tick(host);
        }
        let ticks = self.frames - start;
        tracing::debug!(ticks, "particle field host torn down");
        ticks
    }

    /// Stroke a fading line between every pair closer than the link distance.
    fn draw_links<S: Surface + ?Sized>(&self, surface: &mut S) {
        let style = &self.style;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let Some(opacity) = link_opacity(a.distance(b), style.link_distance) else {
                    continue;
                };
                surface.begin_path();
                surface.set_stroke_style(style.link_color.with_alpha(opacity));
                surface.set_line_width(style.line_width);
                surface.move_to(a.x, a.y);
                surface.line_to(b.x, b.y);
                surface.stroke();
            }
        }
    }

    fn draw_nodes<S: Surface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            surface.begin_path();
            surface.arc(p.x, p.y, p.radius, 0.0, TAU);
            surface.set_fill_style(self.style.node_fill);
            surface.fill();
        }
    }
}

/// Start a field on `surface`, or do nothing if there is no surface.
///
/// The surface is sized to `size` before the first tick.
pub fn activate<S, R>(
    surface: Option<&mut S>,
    size: (f64, f64),
    count: usize,
    style: FieldStyle,
    rng: &mut R,
) -> Option<FieldState>
where
    S: Surface + ?Sized,
    R: RandomSource + ?Sized,
{
    let Some(surface) = surface else {
        tracing::debug!("no rendering surface, particle field not started");
        return None;
    };

    let (width, height) = size;
    let mut field = FieldState::initialize(width, height, count, rng).with_style(style);
    field.resize(surface, width, height);
    tracing::info!(count, width, height, "particle field started");
    Some(field)
}
