use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters for frames and script commands.
#[derive(Debug, Default, Clone)]
pub struct RenderMetrics {
    frames_drawn: u64,
    frames_flushed: u64,
    script_commands: u64,
    draw_failures: u64,
    resizes: u64,
}

impl RenderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self) {
        self.frames_drawn = self.frames_drawn.saturating_add(1);
    }

    pub fn record_flush(&mut self) {
        self.frames_flushed = self.frames_flushed.saturating_add(1);
    }

    pub fn record_command(&mut self) {
        self.script_commands = self.script_commands.saturating_add(1);
    }

    pub fn record_failure(&mut self) {
        self.draw_failures = self.draw_failures.saturating_add(1);
    }

    pub fn record_resize(&mut self) {
        self.resizes = self.resizes.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            frames_drawn: self.frames_drawn,
            frames_flushed: self.frames_flushed,
            script_commands: self.script_commands,
            draw_failures: self.draw_failures,
            resizes: self.resizes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub frames_drawn: u64,
    pub frames_flushed: u64,
    pub script_commands: u64,
    pub draw_failures: u64,
    pub resizes: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "render_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("frames_drawn".to_string(), json!(self.frames_drawn));
        map.insert("frames_flushed".to_string(), json!(self.frames_flushed));
        map.insert("script_commands".to_string(), json!(self.script_commands));
        map.insert("draw_failures".to_string(), json!(self.draw_failures));
        map.insert("resizes".to_string(), json!(self.resizes));
        map
    }
}
