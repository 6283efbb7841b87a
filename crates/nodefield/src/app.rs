//! Terminal application hosting the particle field.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nodefield_config::Config;
use nodefield_field::{FieldState, FieldStyle, TerminalCanvas, activate};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};

/// Paint settings for a configuration.
pub fn field_style(config: &Config) -> FieldStyle {
    FieldStyle::from_theme(config.theme).with_link_distance(config.link_distance)
}

/// Random source for a new field: seeded when the config asks for it.
pub fn field_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Is the animation frozen?
    paused: bool,
    /// Effective settings (file plus command line).
    config: Config,
    /// Settings as read from the file, written back on theme changes.
    file_config: Config,
    /// Where to save the config; the default location when unset.
    config_path: Option<PathBuf>,
    /// Was the theme changed while running?
    theme_changed: bool,
    /// The animation, once a drawing area is available.
    field: Option<FieldState>,
    /// Surface the field paints on.
    canvas: TerminalCanvas,
    /// Random source used when the field is activated.
    rng: StdRng,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, file_config: Config, config_path: Option<PathBuf>) -> Self {
        let rng = field_rng(config.seed);
        Self {
            running: false,
            paused: false,
            config,
            file_config,
            config_path,
            theme_changed: false,
            field: None,
            canvas: TerminalCanvas::default(),
            rng,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let (cols, rows) = crossterm::terminal::size()?;
        self.on_resize(cols, rows);

        self.running = true;
        while self.running {
            let deadline = Instant::now() + self.frame_interval();
            self.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(deadline)?;
        }

        self.save_theme();
        Ok(())
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.config.fps.max(1) as f64)
    }

    /// Pixel size of the field for a terminal of `cols` x `rows` cells.
    ///
    /// The bottom row is kept for the help line.
    fn pixel_size(&self, cols: u16, rows: u16) -> (f64, f64) {
        (
            cols as f64 * self.config.cell_width,
            rows.saturating_sub(1) as f64 * self.config.cell_height,
        )
    }

    /// Advance the animation by one frame unless paused.
    fn tick(&mut self) {
        if self.paused {
            return;
        }
        if let Some(field) = &mut self.field {
            field.tick(&mut self.canvas);
        }
    }

    /// Apply a terminal size change, starting the field if it is not running.
    ///
    /// Resizing clears the canvas, so a paused field is repainted in place.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        let (width, height) = self.pixel_size(cols, rows);
        if let Some(field) = &mut self.field {
            field.resize(&mut self.canvas, width, height);
            if self.paused {
                field.draw(&mut self.canvas);
            }
            return;
        }

        let style = field_style(&self.config);
        let surface = (width > 0.0 && height > 0.0).then_some(&mut self.canvas);
        self.field = activate(
            surface,
            (width, height),
            self.config.node_count,
            style,
            &mut self.rng,
        );
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let color = self.config.theme.color();
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Particle field
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        frame.render_widget(&self.canvas, chunks[0]);

        let mut help = vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color  ".dark_gray(),
            "space".bold().fg(color),
            " pause".dark_gray(),
        ];
        if self.paused {
            help.push("  [paused]".fg(color));
        }
        frame.render_widget(Line::from(help).centered(), chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Keeps polling until the next frame is due.
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
            if timeout.is_zero() {
                break;
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            _ => {}
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.config.theme = self.config.theme.next();
        self.theme_changed = true;
        let style = field_style(&self.config);
        if let Some(field) = &mut self.field {
            field.set_style(style);
        }
        tracing::debug!(theme = self.config.theme.name(), "color theme changed");
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }

    /// Persist a theme picked while running.
    fn save_theme(&mut self) {
        if !self.theme_changed {
            return;
        }
        self.file_config.theme = self.config.theme;
        let result = match &self.config_path {
            Some(path) => self.file_config.save_to(path).map(|_| path.clone()),
            None => self.file_config.save(),
        };
        match result {
            Ok(path) => tracing::info!(path = %path.display(), "theme saved"),
            Err(e) => tracing::warn!(error = %e, "failed to save theme"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodefield_core::ColorTheme;
    use nodefield_field::Shape;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App {
        let config = Config {
            seed: Some(42),
            node_count: 20,
            ..Default::default()
        };
        App::new(config.clone(), config, None)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_field_starts_on_first_size() {
        let mut app = app();
        app.on_resize(80, 25);
        let field = app.field.as_ref().unwrap();
        assert_eq!(field.particles().len(), 20);
        assert_eq!(field.size(), (640.0, 384.0));
        assert_eq!(app.canvas.size(), (640.0, 384.0));
    }

    #[test]
    fn test_no_surface_without_area() {
        let mut app = app();
        app.on_resize(0, 0);
        assert!(app.field.is_none());
        app.on_resize(80, 1);
        assert!(app.field.is_none());
        app.tick();
        assert!(app.canvas.shapes().is_empty());
    }

    #[test]
    fn test_resize_keeps_particles() {
        let mut app = app();
        app.on_resize(80, 25);
        let before = app.field.as_ref().unwrap().particles().to_vec();
        app.on_resize(40, 13);
        let field = app.field.as_ref().unwrap();
        assert_eq!(field.particles(), before.as_slice());
        assert_eq!(field.size(), (320.0, 192.0));
    }

    #[test]
    fn test_tick_paints_canvas() {
        let mut app = app();
        app.on_resize(80, 25);
        app.tick();
        let discs = app
            .canvas
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Disc { .. }))
            .count();
        assert_eq!(discs, 20);
    }

    #[test]
    fn test_pause_stops_motion() {
        let mut app = app();
        app.on_resize(80, 25);
        press(&mut app, KeyCode::Char(' '));
        let before = app.field.as_ref().unwrap().particles().to_vec();
        app.tick();
        assert_eq!(app.field.as_ref().unwrap().particles(), before.as_slice());

        press(&mut app, KeyCode::Char(' '));
        app.tick();
        assert_eq!(app.field.as_ref().unwrap().frames(), 1);
    }

    #[test]
    fn test_resize_while_paused_repaints() {
        let mut app = app();
        app.on_resize(80, 25);
        app.tick();
        press(&mut app, KeyCode::Char(' '));
        let before = app.field.as_ref().unwrap().particles().to_vec();

        app.on_resize(100, 30);

        let field = app.field.as_ref().unwrap();
        assert_eq!(field.particles(), before.as_slice());
        assert_eq!(field.frames(), 1);
        let discs = app
            .canvas
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Disc { .. }))
            .count();
        assert_eq!(discs, 20);
    }

    #[test]
    fn test_cycle_color_restyles_field() {
        let mut app = app();
        app.on_resize(80, 25);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.config.theme, ColorTheme::Cyan);
        assert!(app.theme_changed);
        assert_eq!(
            app.field.as_ref().unwrap().style().node_fill,
            ColorTheme::Cyan.node_fill()
        );
    }

    #[test]
    fn test_quit_keys() {
        for (code, modifiers) in [
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            app.running = true;
            app.on_key_event(KeyEvent::new(code, modifiers));
            assert!(!app.running);
            assert_eq!(app.config.theme, ColorTheme::Aws);
        }
    }

    #[test]
    fn test_seeded_fields_match() {
        let mut a = app();
        let mut b = app();
        a.on_resize(80, 25);
        b.on_resize(80, 25);
        assert_eq!(
            a.field.as_ref().unwrap().particles(),
            b.field.as_ref().unwrap().particles()
        );
    }

    #[test]
    fn test_render_help_line() {
        let mut app = app();
        app.on_resize(40, 10);
        app.tick();

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let last_row: String = (0..40u16)
            .map(|x| buffer[(x, 9u16)].symbol().to_string())
            .collect();
        assert!(last_row.contains("quit"));
        assert!(last_row.contains("pause"));
    }

    #[test]
    fn test_theme_saved_to_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let file_config = Config {
            fps: 30,
            ..Default::default()
        };
        let effective = Config {
            node_count: 5,
            ..file_config.clone()
        };
        let mut app = App::new(effective, file_config, Some(path.clone()));
        press(&mut app, KeyCode::Char('c'));
        app.save_theme();

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.theme, ColorTheme::Cyan);
        assert_eq!(saved.fps, 30);
        assert_eq!(saved.node_count, 60);
    }
}
