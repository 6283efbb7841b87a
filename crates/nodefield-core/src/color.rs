//! Colour types for node and link rendering.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// An RGB colour with a floating point alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f64,
}

impl Rgba {
    /// Create a colour, clamping alpha into `0.0..=1.0`.
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Fully opaque colour.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Alpha-blend this colour over an opaque background.
    pub fn over(self, background: (u8, u8, u8)) -> (u8, u8, u8) {
        let mix = |fg: u8, bg: u8| -> u8 {
            let v = fg as f64 * self.a + bg as f64 * (1.0 - self.a);
            v.round().clamp(0.0, 255.0) as u8
        };
        (
            mix(self.r, background.0),
            mix(self.g, background.1),
            mix(self.b, background.2),
        )
    }
}

/// Colour theme for nodes and links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Aws,
    Cyan,
    Green,
    Magenta,
    Yellow,
    Red,
    Blue,
    White,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Aws => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
            ColorTheme::White => ColorTheme::Aws,
        }
    }

    /// Base RGB value of the theme.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::Aws => (255, 153, 0),
            ColorTheme::Cyan => (0, 200, 220),
            ColorTheme::Green => (60, 220, 90),
            ColorTheme::Magenta => (220, 60, 200),
            ColorTheme::Yellow => (240, 220, 40),
            ColorTheme::Red => (230, 50, 50),
            ColorTheme::Blue => (60, 120, 255),
            ColorTheme::White => (230, 230, 230),
        }
    }

    /// Translucent fill used for node discs.
    pub fn node_fill(self) -> Rgba {
        let (r, g, b) = self.rgb();
        Rgba::new(r, g, b, 0.6)
    }

    /// Opaque base colour for links; opacity is applied per link.
    pub fn link_base(self) -> Rgba {
        let (r, g, b) = self.rgb();
        Rgba::opaque(r, g, b)
    }

    /// Convert theme to Ratatui Color.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }

    /// Lowercase theme name as used in the config file.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Aws => "aws",
            ColorTheme::Cyan => "cyan",
            ColorTheme::Green => "green",
            ColorTheme::Magenta => "magenta",
            ColorTheme::Yellow => "yellow",
            ColorTheme::Red => "red",
            ColorTheme::Blue => "blue",
            ColorTheme::White => "white",
        }
    }
}

impl std::str::FromStr for ColorTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut theme = ColorTheme::default();
        loop {
            if theme.name().eq_ignore_ascii_case(s.trim()) {
                return Ok(theme);
            }
            theme = theme.next();
            if theme == ColorTheme::default() {
                return Err(format!("unknown color theme: {s}"));
            }
        }
    }
}
