use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use poyekhali::{
    BspPane, CliDriver, Division, DrawingScript, FileSink, LogLevel, Logger, MissionControl,
    Panel, Size, UiConfig, play_script,
};

const EMPTY_SCRIPT: &str = r#"{"drawings":[],"pause":3,"pause_div":2}"#;

/// poyekhali - terminal mission-control layout
#[derive(Parser)]
#[command(name = "poyekhali")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show the mission-control window
    #[arg(long, conflicts_with = "ui_test")]
    ui: bool,

    /// Play a drawing script (`runtest` plays the built-in sample, `unmarshaltest` an empty one)
    #[arg(long, value_name = "FILE|runtest")]
    ui_test: Option<String>,

    /// Append JSON log lines to this file
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("poyekhali: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => UiConfig::from_path(path)?,
        None => UiConfig::default(),
    };
    if let Some(path) = cli.log {
        config.log_path = Some(path);
    }

    let logger = match &config.log_path {
        Some(path) => Some(
            Logger::new(FileSink::new(path, config.log_max_bytes)?).with_min_level(LogLevel::Debug),
        ),
        None => None,
    };

    if cli.ui {
        let (width, height) = crossterm::terminal::size()?;
        let control = mission_control(Size::new(width, height), &config)?;
        let mut driver = CliDriver::new(control, &config);
        if let Some(logger) = logger {
            driver = driver.with_logger(logger);
        }
        driver.run()?;
    } else if let Some(source) = cli.ui_test {
        let script = match source.as_str() {
            "runtest" => DrawingScript::sample()?,
            "unmarshaltest" | "unmarshalTest" => DrawingScript::from_json_str(EMPTY_SCRIPT)?,
            path => DrawingScript::from_path(path)?,
        };
        play_script(&script, logger)?;
    } else {
        Cli::command().print_help()?;
    }
    Ok(())
}

/// Telemetry on one side, orbit and staging stacked on the other.
fn mission_control(size: Size, config: &UiConfig) -> poyekhali::Result<MissionControl> {
    let palette = config.palette;
    let border = config.window_border_style();
    let mut control = MissionControl::new(size, Division::Auto, config)?;

    control.add_pane(
        Panel::new("Telemetry", palette.default, border)
            .with_lines(["Alt      0 m", "Vel      0 m/s", "Thr    100 %"]),
    )?;

    let mut flight = BspPane::new(Division::Vertical, None);
    flight.add_child(
        Panel::new("Orbit", palette.default, border).with_lines(["Ap   --", "Pe   --"]),
    )?;
    flight.add_child(
        Panel::new("Staging", palette.warning, border).with_lines(["Stage 1 armed"]),
    )?;
    control.add_pane(flight)?;
    Ok(control)
}
