//! Declarative drawing scripts.
//!
//! A script is a JSON document of drawings, each an ordered list of line and
//! box commands plus pacing. [`ScriptPlayer`] executes the commands in
//! document order through the regular drawing primitives.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::appearance::Appearance;
use crate::error::Result;
use crate::geometry::{BorderStyle, BorderWidths, Cell, Rectangle};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::RenderMetrics;
use crate::render::{BoxOptions, draw_box, draw_line};
use crate::surface::Surface;

const LOG_TARGET: &str = "poyekhali::script";

/// Built-in demo played by `--ui-test runtest`.
pub const SAMPLE_SCRIPT: &str = r#"{
  "drawings": [
    {
      "textColor": [255, 255, 255],
      "drawColor": [128, 0, 128],
      "testLines": [
        { "start": { "x": 10, "y": 10 }, "end": { "x": 10, "y": 32 } },
        { "start": { "x": 12, "y": 4 }, "end": { "x": 40, "y": 4 }, "text": "hline" }
      ],
      "testBoxes": [
        { "start": { "x": 14, "y": 6 }, "end": { "x": 40, "y": 14 }, "widths": [1], "caption": "single" },
        { "start": { "x": 44, "y": 6 }, "end": { "x": 70, "y": 18 }, "widths": [2, 1, 3, 1], "caption": "mismatched widths" }
      ],
      "pause": 1,
      "pauseDiv": 2
    }
  ],
  "pause": 2,
  "pauseDiv": 1
}"#;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawingScript {
    pub drawings: Vec<Drawing>,
    pub pause: u64,
    #[serde(alias = "pause_div")]
    pub pause_div: u64,
}

impl DrawingScript {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn sample() -> Result<Self> {
        Self::from_json_str(SAMPLE_SCRIPT)
    }

    /// Delay after the last drawing.
    pub fn pause(&self) -> Duration {
        pacing(self.pause, self.pause_div)
    }

    pub fn command_count(&self) -> usize {
        self.drawings
            .iter()
            .map(|drawing| drawing.lines.len() + drawing.boxes.len())
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Drawing {
    pub text_color: [u8; 3],
    pub draw_color: [u8; 3],
    #[serde(rename = "testLines")]
    pub lines: Vec<LineCommand>,
    #[serde(rename = "testBoxes")]
    pub boxes: Vec<BoxCommand>,
    pub pause: u64,
    #[serde(alias = "pause_div")]
    pub pause_div: u64,
}

impl Drawing {
    pub fn appearance(&self) -> Appearance {
        Appearance::rgb(self.text_color, self.draw_color)
    }

    /// Delay after every command of this drawing.
    pub fn pause(&self) -> Duration {
        pacing(self.pause, self.pause_div)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LineCommand {
    #[serde(deserialize_with = "cell")]
    pub start: Cell,
    #[serde(deserialize_with = "cell")]
    pub end: Cell,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoxCommand {
    #[serde(deserialize_with = "cell")]
    pub start: Cell,
    #[serde(deserialize_with = "cell")]
    pub end: Cell,
    #[serde(default)]
    pub widths: Vec<u16>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Deserialize)]
struct CellDoc {
    #[serde(alias = "X")]
    x: u16,
    #[serde(alias = "Y")]
    y: u16,
}

fn cell<'de, D>(deserializer: D) -> std::result::Result<Cell, D::Error>
where
    D: Deserializer<'de>,
{
    CellDoc::deserialize(deserializer).map(|doc| Cell::new(doc.x, doc.y))
}

/// `pause` seconds split `pause_div` ways; a divisor below one counts as one.
fn pacing(pause: u64, pause_div: u64) -> Duration {
    let divisor = u32::try_from(pause_div.max(1)).unwrap_or(u32::MAX);
    Duration::from_secs(pause) / divisor
}

/// Delay source between script commands.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Never waits; remembers what it was asked to wait for.
#[derive(Debug, Default, Clone)]
pub struct NoPacer {
    pub requested: Vec<Duration>,
}

impl Pacer for NoPacer {
    fn pause(&mut self, duration: Duration) {
        self.requested.push(duration);
    }
}

/// Executes drawing scripts against a surface.
#[derive(Default)]
pub struct ScriptPlayer {
    logger: Option<Logger>,
    metrics: Option<Arc<Mutex<RenderMetrics>>>,
}

impl ScriptPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Mutex<RenderMetrics>>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Run every command in document order, showing the surface and pacing
    /// after each one. The first failing command ends playback.
    pub fn play(
        &self,
        script: &DrawingScript,
        surface: &mut dyn Surface,
        pacer: &mut dyn Pacer,
    ) -> Result<()> {
        self.emit(
            LogLevel::Info,
            "script.start",
            [
                json_kv("drawings", json!(script.drawings.len())),
                json_kv("commands", json!(script.command_count())),
            ],
        );

        for (index, drawing) in script.drawings.iter().enumerate() {
            if let Err(err) = self.play_drawing(index, drawing, surface, pacer) {
                self.record(RenderMetrics::record_failure);
                self.emit(
                    LogLevel::Error,
                    "script.failed",
                    [
                        json_kv("drawing", json!(index)),
                        json_kv("error", json!(err.to_string())),
                    ],
                );
                return Err(err);
            }
        }

        surface.show()?;
        self.record(RenderMetrics::record_flush);
        pacer.pause(script.pause());
        self.emit(LogLevel::Info, "script.finished", []);
        Ok(())
    }

    fn play_drawing(
        &self,
        index: usize,
        drawing: &Drawing,
        surface: &mut dyn Surface,
        pacer: &mut dyn Pacer,
    ) -> Result<()> {
        let appearance = drawing.appearance();
        self.emit(
            LogLevel::Debug,
            "drawing.start",
            [json_kv("drawing", json!(index))],
        );

        for line in &drawing.lines {
            draw_line(surface, line.start, line.end, appearance, line.text.as_deref())?;
            self.command_done(surface, pacer, drawing.pause())?;
        }

        for (box_index, command) in drawing.boxes.iter().enumerate() {
            let rect = Rectangle::from_cells(command.start, command.end)?;
            let mut options = BoxOptions::new();
            if !command.widths.is_empty() {
                let (widths, arity) = BorderWidths::from_values_or_fallback(&command.widths);
                if let Some(err) = arity {
                    self.emit(
                        LogLevel::Warn,
                        "box.widths_fallback",
                        [
                            json_kv("drawing", json!(index)),
                            json_kv("box", json!(box_index)),
                            json_kv("error", json!(err.to_string())),
                        ],
                    );
                }
                options = options.with_border_style(BorderStyle::new(appearance).with_widths(widths));
            }
            if let Some(caption) = &command.caption {
                options = options.with_title(caption.clone());
            }
            draw_box(surface, rect, appearance, Some(&options))?;
            self.command_done(surface, pacer, drawing.pause())?;
        }
        Ok(())
    }

    fn command_done(
        &self,
        surface: &mut dyn Surface,
        pacer: &mut dyn Pacer,
        pause: Duration,
    ) -> Result<()> {
        surface.show()?;
        self.record(|metrics| {
            metrics.record_command();
            metrics.record_flush();
        });
        pacer.pause(pause);
        Ok(())
    }

    fn record(&self, update: impl FnOnce(&mut RenderMetrics)) {
        if let Some(metrics) = &self.metrics {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut guard);
            }
        }
    }

    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        fields: impl IntoIterator<Item = (String, serde_json::Value)>,
    ) {
        if let Some(logger) = &self.logger {
            let _ = logger.log_event(event_with_fields(level, LOG_TARGET, message, fields));
        }
    }
}
