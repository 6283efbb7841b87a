//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use nodefield_config::Config;
use nodefield_core::ColorTheme;

/// A drifting particle network animation for the terminal.
#[derive(Debug, Parser)]
#[command(name = "nodefield", version, about)]
pub struct Cli {
    /// Number of particles.
    #[arg(short, long)]
    pub nodes: Option<usize>,

    /// Distance under which particles are linked, in pixels.
    #[arg(short, long)]
    pub link_distance: Option<f64>,

    /// Target frames per second.
    #[arg(short, long)]
    pub fps: Option<u32>,

    /// Colour theme (aws, cyan, green, magenta, yellow, red, blue, white).
    #[arg(short, long)]
    pub theme: Option<ColorTheme>,

    /// Seed for a reproducible field.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Read settings from this file instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run headless for this many frames and print timing instead of
    /// opening the terminal UI.
    #[arg(long, value_name = "FRAMES")]
    pub bench: Option<u64>,
}

impl Cli {
    /// Overlay command line values on top of the file configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(nodes) = self.nodes {
            config.node_count = nodes;
        }
        if let Some(link_distance) = self.link_distance {
            config.link_distance = link_distance;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }
}
