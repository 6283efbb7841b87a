//! Headless benchmark: runs the field without a terminal.

use std::time::{Duration, Instant};

use nodefield_core::{FrameScheduler, Rgba, Surface, Viewport};
use nodefield_field::{FieldState, RecordingSurface};

/// Host with a fixed viewport that stops after a set number of frames.
///
/// Each frame boundary tallies the links painted during the previous frame
/// and then discards the recorded calls.
#[derive(Debug)]
pub struct HeadlessHost {
    surface: RecordingSurface,
    size: (f64, f64),
    frames_left: u64,
    links: u64,
}

impl HeadlessHost {
    pub fn new(size: (f64, f64), frames: u64) -> Self {
        Self {
            surface: RecordingSurface::new(),
            size,
            frames_left: frames,
            links: 0,
        }
    }

    /// Links painted over all completed frames.
    pub fn links(&self) -> u64 {
        self.links
    }

    fn collect(&mut self) {
        self.links += self.surface.strokes().len() as u64;
        self.surface.clear();
    }
}

impl Surface for HeadlessHost {
    fn resize(&mut self, width: f64, height: f64) {
        self.surface.resize(width, height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.surface.clear_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.surface.begin_path();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.surface.arc(x, y, radius, start_angle, end_angle);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.surface.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.surface.line_to(x, y);
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.surface.set_fill_style(color);
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.surface.set_stroke_style(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.surface.set_line_width(width);
    }

    fn fill(&mut self) {
        self.surface.fill();
    }

    fn stroke(&mut self) {
        self.surface.stroke();
    }
}

impl Viewport for HeadlessHost {
    fn size(&self) -> (f64, f64) {
        self.size
    }

    fn take_resize(&mut self) -> Option<(f64, f64)> {
        None
    }
}

impl FrameScheduler for HeadlessHost {
    fn next_frame(&mut self) -> bool {
        self.collect();
        if self.frames_left == 0 {
            return false;
        }
        self.frames_left -= 1;
        true
    }
}

/// Timing of a benchmark run.
#[derive(Debug, Clone, Copy)]
pub struct BenchReport {
    pub frames: u64,
    pub links: u64,
    pub elapsed: Duration,
}

impl BenchReport {
    pub fn frames_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            f64::INFINITY
        }
    }

    pub fn links_per_frame(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.links as f64 / self.frames as f64
        }
    }
}

/// Tick `field` for `frames` frames on a headless host.
pub fn run(field: &mut FieldState, frames: u64) -> BenchReport {
    let mut host = HeadlessHost::new(field.size(), frames);
    let start = Instant::now();
    let frames = field.run(&mut host);
    let elapsed = start.elapsed();

    let report = BenchReport {
        frames,
        links: host.links(),
        elapsed,
    };
    tracing::info!(
        frames = report.frames,
        links_per_frame = report.links_per_frame(),
        fps = report.frames_per_second(),
        "benchmark finished"
    );
    report
}
