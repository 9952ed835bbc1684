use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use serde_json::json;
use thiserror::Error;

use crate::config::UiConfig;
use crate::error::LayoutError;
use crate::geometry::Size;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::{MetricSnapshot, RenderMetrics};
use crate::script::{DrawingScript, ScriptPlayer, ThreadPacer};
use crate::surface::{Surface, TerminalSurface};
use crate::window::MissionControl;

const LOG_TARGET: &str = "poyekhali::driver";

pub type DriverResult<T> = std::result::Result<T, CliDriverError>;

#[derive(Debug, Error)]
pub enum CliDriverError {
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Interactive driver: owns a mission-control window, polls crossterm for
/// input and redraws on every event and tick.
pub struct CliDriver {
    control: MissionControl,
    tick_interval: Duration,
    logger: Option<Logger>,
    metrics: Arc<Mutex<RenderMetrics>>,
    started: Instant,
}

impl CliDriver {
    pub fn new(control: MissionControl, config: &UiConfig) -> Self {
        Self {
            control,
            tick_interval: config.tick_interval,
            logger: None,
            metrics: Arc::new(Mutex::new(RenderMetrics::new())),
            started: Instant::now(),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn metrics(&self) -> Arc<Mutex<RenderMetrics>> {
        Arc::clone(&self.metrics)
    }

    pub fn control(&self) -> &MissionControl {
        &self.control
    }

    /// Take over stdout until the user quits.
    pub fn run(mut self) -> DriverResult<MetricSnapshot> {
        let mut stdout = io::stdout();
        enter(&mut stdout)?;
        let result = self.run_inner(&mut stdout);
        exit(&mut stdout);
        result?;
        Ok(self.finish())
    }

    fn run_inner(&mut self, stdout: &mut impl Write) -> DriverResult<()> {
        let (width, height) = terminal::size()?;
        let mut surface = TerminalSurface::new(stdout, width, height);
        self.bootstrap(&mut surface, Size::new(width, height))?;

        let mut last_tick = Instant::now();
        loop {
            let timeout = self
                .tick_interval
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(0));

            if event::poll(timeout)? {
                let event = event::read()?;
                if self.handle_event(&mut surface, event)? == LoopControl::Exit {
                    break;
                }
            }

            if last_tick.elapsed() >= self.tick_interval {
                last_tick = Instant::now();
                self.tick(&mut surface)?;
            }
        }
        Ok(())
    }

    /// Feed a fixed event sequence through the same handlers the terminal
    /// loop uses.
    pub fn run_scripted<W, I>(
        &mut self,
        surface: &mut TerminalSurface<W>,
        events: I,
    ) -> DriverResult<MetricSnapshot>
    where
        W: Write,
        I: IntoIterator<Item = Event>,
    {
        let (width, height) = surface.size();
        self.bootstrap(surface, Size::new(width, height))?;
        for event in events {
            if self.handle_event(surface, event)? == LoopControl::Exit {
                break;
            }
        }
        Ok(self.finish())
    }

    pub fn handle_event<W: Write>(
        &mut self,
        surface: &mut TerminalSurface<W>,
        event: Event,
    ) -> DriverResult<LoopControl> {
        match event {
            Event::Key(key) if is_quit(&key) => return Ok(LoopControl::Exit),
            Event::Resize(width, height) => self.resize(surface, Size::new(width, height))?,
            _ => {}
        }
        self.render_frame(surface)?;
        Ok(LoopControl::Continue)
    }

    /// Refresh the status line with the mission clock and redraw.
    pub fn tick<W: Write>(&mut self, surface: &mut TerminalSurface<W>) -> DriverResult<()> {
        let elapsed = self.started.elapsed().as_secs();
        let frames = self.snapshot().frames_drawn;
        let message = format!("T+{elapsed}s  frames {frames}  q to quit");
        if let Err(err) = self.control.status_debug(surface, &message) {
            self.draw_failed(&err);
        }
        self.render_frame(surface)
    }

    fn bootstrap<W: Write>(
        &mut self,
        surface: &mut TerminalSurface<W>,
        size: Size,
    ) -> DriverResult<()> {
        self.started = Instant::now();
        self.emit(
            LogLevel::Info,
            "driver.started",
            [
                json_kv("width", json!(size.width)),
                json_kv("height", json!(size.height)),
            ],
        );
        self.resize(surface, size)?;
        self.render_frame(surface)
    }

    fn resize<W: Write>(
        &mut self,
        surface: &mut TerminalSurface<W>,
        size: Size,
    ) -> DriverResult<()> {
        surface.resize(size.width, size.height)?;
        self.record(RenderMetrics::record_resize);
        match self.control.window_mut().resize(size) {
            Ok(()) => self.emit(
                LogLevel::Info,
                "driver.resized",
                [
                    json_kv("width", json!(size.width)),
                    json_kv("height", json!(size.height)),
                ],
            ),
            // Keep the previous layout; the surface clips whatever overflows.
            Err(err) => self.emit(
                LogLevel::Warn,
                "driver.resize_rejected",
                [
                    json_kv("width", json!(size.width)),
                    json_kv("height", json!(size.height)),
                    json_kv("error", json!(err.to_string())),
                ],
            ),
        }
        Ok(())
    }

    /// Draw walk plus flush. Layout failures are logged and the loop goes on;
    /// terminal I/O failures end it.
    fn render_frame<W: Write>(&mut self, surface: &mut TerminalSurface<W>) -> DriverResult<()> {
        surface.clear();
        match self.control.draw(surface) {
            Ok(()) => self.record(RenderMetrics::record_frame),
            Err(err) => self.draw_failed(&err),
        }
        surface.show()?;
        self.record(RenderMetrics::record_flush);
        Ok(())
    }

    fn draw_failed(&self, err: &LayoutError) {
        self.record(RenderMetrics::record_failure);
        self.emit(
            LogLevel::Error,
            "driver.draw_failed",
            [json_kv("error", json!(err.to_string()))],
        );
    }

    fn finish(&self) -> MetricSnapshot {
        let snapshot = self.snapshot();
        if let Some(logger) = &self.logger {
            let _ = logger.log_event(snapshot.to_log_event(LOG_TARGET));
        }
        self.emit(
            LogLevel::Info,
            "driver.stopped",
            [json_kv("uptime_ms", json!(snapshot.uptime_ms))],
        );
        snapshot
    }

    fn snapshot(&self) -> MetricSnapshot {
        let uptime = self.started.elapsed();
        self.metrics
            .lock()
            .map(|metrics| metrics.snapshot(uptime))
            .unwrap_or_else(|_| RenderMetrics::new().snapshot(uptime))
    }

    fn record(&self, update: impl FnOnce(&mut RenderMetrics)) {
        if let Ok(mut guard) = self.metrics.lock() {
            update(&mut guard);
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

/// Play a drawing script on the alternate screen with real pauses.
pub fn play_script(script: &DrawingScript, logger: Option<Logger>) -> DriverResult<MetricSnapshot> {
    let started = Instant::now();
    let metrics = Arc::new(Mutex::new(RenderMetrics::new()));
    let mut player = ScriptPlayer::new().with_metrics(Arc::clone(&metrics));
    if let Some(logger) = logger.clone() {
        player = player.with_logger(logger);
    }

    let mut stdout = io::stdout();
    enter(&mut stdout)?;
    let result = terminal::size()
        .map_err(CliDriverError::from)
        .and_then(|(width, height)| {
            let mut surface = TerminalSurface::new(&mut stdout, width, height);
            player
                .play(script, &mut surface, &mut ThreadPacer)
                .map_err(CliDriverError::from)
        });
    exit(&mut stdout);
    result?;

    let snapshot = metrics
        .lock()
        .map(|metrics| metrics.snapshot(started.elapsed()))
        .unwrap_or_else(|_| RenderMetrics::new().snapshot(started.elapsed()));
    if let Some(logger) = &logger {
        let _ = logger.log_event(snapshot.to_log_event(LOG_TARGET));
    }
    Ok(snapshot)
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn enter(stdout: &mut impl Write) -> DriverResult<()> {
    terminal::enable_raw_mode().map_err(|err| CliDriverError::Terminal(err.to_string()))?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
    Ok(())
}

fn exit(stdout: &mut impl Write) {
    execute!(stdout, Show, LeaveAlternateScreen).ok();
    terminal::disable_raw_mode().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::layout::{Division, PaneConstraints, ViewPane};
    use crate::logging::MemorySink;
    use crate::window::Panel;

    fn control(size: Size) -> MissionControl {
        let config = UiConfig::default();
        let mut control = MissionControl::new(size, Division::Auto, &config).unwrap();
        let border = config.window_border_style();
        control
            .add_pane(Panel::new("Telemetry", config.palette.default, border))
            .unwrap();
        control
            .add_pane(Panel::new("Orbit", config.palette.default, border))
            .unwrap();
        control
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn resize_relayouts_and_quit_stops() {
        let config = UiConfig::default();
        let sink = MemorySink::default();
        let mut driver = CliDriver::new(control(Size::new(40, 12)), &config)
            .with_logger(Logger::new(sink.clone()));
        let mut surface = TerminalSurface::new(Vec::new(), 40, 12);

        let snapshot = driver
            .run_scripted(
                &mut surface,
                [
                    Event::Resize(60, 20),
                    key(KeyCode::Char('q'), KeyModifiers::NONE),
                    Event::Resize(10, 10),
                ],
            )
            .unwrap();

        assert_eq!(driver.control().window().size(), Size::new(60, 20));
        assert_eq!(surface.frame().size(), (60, 20));
        assert_eq!(snapshot.frames_drawn, 2);
        assert_eq!(snapshot.resizes, 2);
        assert_eq!(snapshot.draw_failures, 0);

        let messages: Vec<String> = sink.events().into_iter().map(|e| e.message).collect();
        assert!(messages.iter().any(|m| m == "render_metrics"));
        assert_eq!(messages.last().map(String::as_str), Some("driver.stopped"));
    }

    #[test]
    fn ctrl_c_quits() {
        let config = UiConfig::default();
        let mut driver = CliDriver::new(control(Size::new(40, 12)), &config);
        let mut surface = TerminalSurface::new(Vec::new(), 40, 12);
        let quit = driver
            .handle_event(&mut surface, key(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(quit, LoopControl::Exit);
        let other = driver
            .handle_event(&mut surface, key(KeyCode::Char('c'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(other, LoopControl::Continue);
    }

    #[test]
    fn undersized_terminal_keeps_previous_layout() {
        let config = UiConfig::default();
        let sink = MemorySink::default();
        let mut driver = CliDriver::new(control(Size::new(40, 12)), &config)
            .with_logger(Logger::new(sink.clone()));
        let mut surface = TerminalSurface::new(Vec::new(), 40, 12);

        driver
            .run_scripted(&mut surface, [Event::Resize(2, 2)])
            .unwrap();

        assert_eq!(driver.control().window().size(), Size::new(40, 12));
        assert!(
            sink.events()
                .iter()
                .any(|e| e.message == "driver.resize_rejected")
        );
    }

    #[test]
    fn draw_failures_are_logged_and_the_loop_continues() {
        let config = UiConfig::default();
        let mut control = MissionControl::new(Size::new(20, 8), Division::Auto, &config).unwrap();
        control
            .add_pane(ViewPane::new(
                |_: &mut dyn Surface, _: u16, _: u16, _: u16, _: u16| -> Result<()> {
                    Err(LayoutError::Renderer("sensor offline".into()))
                },
                PaneConstraints::default(),
            ))
            .unwrap();
        let sink = MemorySink::default();
        let mut driver = CliDriver::new(control, &config).with_logger(Logger::new(sink.clone()));
        let mut surface = TerminalSurface::new(Vec::new(), 20, 8);

        let snapshot = driver
            .run_scripted(&mut surface, [Event::FocusGained, Event::FocusLost])
            .unwrap();

        assert_eq!(snapshot.draw_failures, 3);
        assert_eq!(snapshot.frames_flushed, 3);
        assert!(sink.events().iter().any(|e| e.message == "driver.draw_failed"));
    }

    #[test]
    fn tick_writes_the_mission_clock() {
        let config = UiConfig::default();
        let mut driver = CliDriver::new(control(Size::new(40, 12)), &config);
        let mut surface = TerminalSurface::new(Vec::new(), 40, 12);
        driver.tick(&mut surface).unwrap();
        let status = driver.control().window().status_bar().message();
        assert!(status.is_some_and(|text| text.starts_with("T+")));
        assert!(surface.frame().row_text(10).unwrap().contains("T+"));
    }
}
