//! Presentation settings, built once at startup and passed down explicitly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::style::Color;
use serde::Deserialize;

use crate::appearance::Appearance;
use crate::error::Result;
use crate::geometry::{BorderStyle, BorderWidths};

/// Named appearances used by the window chrome and status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub default: Appearance,
    pub debug: Appearance,
    pub warning: Appearance,
    pub error: Appearance,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            default: Appearance::new()
                .with_foreground(Color::Black)
                .with_background(Color::White),
            debug: Appearance::new()
                .with_foreground(Color::White)
                .with_background(Color::Blue),
            warning: Appearance::new()
                .with_foreground(Color::Black)
                .with_background(Color::Rgb {
                    r: 0xff,
                    g: 0xa5,
                    b: 0x00,
                }),
            error: Appearance::new()
                .with_foreground(Color::White)
                .with_background(Color::Red),
        }
    }
}

/// Configuration knobs for windows, the status bar and the terminal driver.
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub palette: Palette,
    /// Border thickness of the outer window frame.
    pub window_border: BorderWidths,
    /// Cells reserved to the right of status text.
    pub status_margin: u16,
    /// Rows between the status line and the window's bottom edge.
    pub status_offset: u16,
    /// Input poll timeout of the driver loop.
    pub tick_interval: Duration,
    /// Optional JSON log file.
    pub log_path: Option<PathBuf>,
    /// Size at which the log file is truncated. Zero disables rotation.
    pub log_max_bytes: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            window_border: BorderWidths::uniform(1),
            status_margin: 5,
            status_offset: 2,
            tick_interval: Duration::from_millis(200),
            log_path: None,
            log_max_bytes: 1024 * 1024,
        }
    }
}

impl UiConfig {
    /// Window frame style painted with the palette's default appearance.
    pub fn window_border_style(&self) -> BorderStyle {
        BorderStyle::new(self.palette.default).with_widths(self.window_border)
    }

    /// Overlay the fields present in a JSON document onto the defaults.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(content)?;
        Ok(file.into_config())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ConfigFile {
    palette: PaletteFile,
    window_border: Option<Vec<u16>>,
    status_margin: Option<u16>,
    status_offset: Option<u16>,
    tick_ms: Option<u64>,
    log_path: Option<PathBuf>,
    log_max_bytes: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PaletteFile {
    default: Option<ColorPair>,
    debug: Option<ColorPair>,
    warning: Option<ColorPair>,
    error: Option<ColorPair>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct ColorPair {
    fg: [u8; 3],
    bg: [u8; 3],
}

impl ColorPair {
    fn appearance(self) -> Appearance {
        Appearance::rgb(self.fg, self.bg)
    }
}

impl ConfigFile {
    fn into_config(self) -> UiConfig {
        let defaults = UiConfig::default();
        let pick = |pair: Option<ColorPair>, fallback: Appearance| {
            pair.map(ColorPair::appearance).unwrap_or(fallback)
        };
        let window_border = self
            .window_border
            .map(|values| BorderWidths::from_values_or_fallback(&values).0)
            .unwrap_or(defaults.window_border);

        UiConfig {
            palette: Palette {
                default: pick(self.palette.default, defaults.palette.default),
                debug: pick(self.palette.debug, defaults.palette.debug),
                warning: pick(self.palette.warning, defaults.palette.warning),
                error: pick(self.palette.error, defaults.palette.error),
            },
            window_border,
            status_margin: self.status_margin.unwrap_or(defaults.status_margin),
            status_offset: self.status_offset.unwrap_or(defaults.status_offset),
            tick_interval: self
                .tick_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_interval),
            log_path: self.log_path.or(defaults.log_path),
            log_max_bytes: self.log_max_bytes.unwrap_or(defaults.log_max_bytes),
        }
    }
}
