mod app;
mod bench;
mod cli;
mod logging;

use clap::Parser;
use nodefield_config::Config;
use nodefield_field::FieldState;

use crate::app::{App, field_rng, field_style};
use crate::cli::Cli;

/// Viewport used by `--bench`, in pixels.
const BENCH_VIEWPORT: (f64, f64) = (1280.0, 720.0);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if cli.bench.is_some() {
        logging::init_stderr();
    } else {
        logging::init_file();
    }

    let file_config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut config = file_config.clone();
    cli.apply(&mut config);
    config.validate()?;

    if let Some(frames) = cli.bench {
        run_bench(&config, frames);
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = App::new(config, file_config, cli.config).run(terminal);
    ratatui::restore();
    result
}

/// Run the field headless and print a summary.
fn run_bench(config: &Config, frames: u64) {
    let (width, height) = BENCH_VIEWPORT;
    let mut rng = field_rng(config.seed);
    let mut field = FieldState::initialize(width, height, config.node_count, &mut rng)
        .with_style(field_style(config));

    let report = bench::run(&mut field, frames);
    println!(
        "{} frames, {} nodes: {:.0} frames/s, {:.1} links/frame",
        report.frames,
        config.node_count,
        report.frames_per_second(),
        report.links_per_frame()
    );
}
