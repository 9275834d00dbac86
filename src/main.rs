use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;

mod cli;
mod config;
mod geocode;
mod logger;
mod map;
mod number;
mod plan;
mod poller;
mod record;
mod sources;
mod tracker;

use cli::Cli;
use config::{AppConfig, ConfigError};
use logger::{StatusLogger, VerbosityLevel};
use map::{MapRenderer, RenderError};
use poller::LivePoller;
use record::{Coordinates, TrackedRecord};
use tracker::Tracker;

fn display_banner() {
    println!(
        r#"
    ##############################################
    #                                            #
    #            N U M I N T E L                 #
    #                                            #
    #     phone-number intelligence tracker      #
    #                                            #
    ##############################################
"#
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = cli.validate() {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // Handle --init before any other processing
    if cli.init {
        match AppConfig::create_default_config() {
            Ok(path) => {
                println!("✅ Created default configuration file at: {}", path.display());
                println!("   Edit this file to customize settings, then run numintel again.");
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("❌ Failed to create configuration file: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Load configuration, offering to create it when missing
    let app_config = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(ConfigError::FileNotFound(path)) => match AppConfig::prompt_create_config() {
            Ok(Some(created_path)) => {
                println!("✅ Created default configuration file at: {}", created_path.display());
                println!("   Edit this file to customize settings, then run numintel again.");
                std::process::exit(0);
            }
            Ok(None) => {
                eprintln!("❌ Configuration file not found at: {}", path.display());
                eprintln!("   Run with --init to create a default configuration file.");
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("❌ Failed to create configuration file: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let verbosity = VerbosityLevel::from_verbose_count(cli.verbose);
    let logger = match &cli.log_file {
        Some(path) => StatusLogger::with_log_file(verbosity, path.clone()),
        None => StatusLogger::new(verbosity),
    };

    let output_dir = match &cli.output_dir {
        Some(dir) => std::path::PathBuf::from(dir),
        None => app_config.map.resolved_output_dir(),
    };

    let tracker = Tracker::from_config(&app_config, logger.clone());
    let renderer = MapRenderer::new(output_dir, app_config.map.zoom);
    // Base coordinates are validated finite at config load
    let base = Coordinates::new(
        app_config.polling.base_latitude,
        app_config.polling.base_longitude,
    )
    .unwrap_or_else(|| Coordinates::new(17.385044, 78.486671).expect("finite literals"));
    let poller = LivePoller::new(
        MapRenderer::new(renderer.output_dir().to_path_buf(), app_config.map.zoom),
        logger.clone(),
        Duration::from_secs(app_config.polling.interval_secs),
        base,
        app_config.polling.jitter_degrees,
    );

    let result = if let Some(number) = &cli.number {
        run_one_shot(&tracker, &renderer, &poller, &logger, number, cli.duration).await
    } else {
        display_banner();
        run_menu(&tracker, &renderer, &poller, &logger).await
    };

    if logger.is_log_export_enabled() {
        if let Err(e) = logger.export_logs() {
            eprintln!("❌ Failed to export logs: {}", e);
        }
    }

    result
}

/// Scriptable mode: track one number, render, optionally live-track.
async fn run_one_shot(
    tracker: &Tracker,
    renderer: &MapRenderer,
    poller: &LivePoller,
    logger: &StatusLogger,
    number: &str,
    duration: Option<u64>,
) -> Result<()> {
    let mut record = match tracker.track(number).await {
        Ok(record) => record,
        Err(e) => {
            logger.error(&e.to_string());
            std::process::exit(1);
        }
    };
    logger.print_track_summary(&record);
    render_map(renderer, &record, logger);

    if let Some(secs) = duration {
        match poller.start(&mut record, Duration::from_secs(secs)).await {
            Ok(report) => logger.info(&format!("Wrote {} map artifact(s)", report.artifacts.len())),
            Err(e) => logger.error(&e.to_string()),
        }
    }
    Ok(())
}

/// Interactive menu loop. Invalid input re-prompts; a bad phone number
/// reports the parse failure and returns to the menu.
async fn run_menu(
    tracker: &Tracker,
    renderer: &MapRenderer,
    poller: &LivePoller,
    logger: &StatusLogger,
) -> Result<()> {
    let mut current: Option<TrackedRecord> = None;

    loop {
        println!("\nnumintel menu");
        println!("1. Track a phone number");
        println!("2. Display the map");
        println!("3. Start live tracking");
        println!("4. Exit");

        let choice = prompt("Enter your choice (1/2/3/4): ")?;
        match choice.as_str() {
            "1" => {
                let raw = prompt("Enter phone number with country code: ")?;
                match tracker.track(&raw).await {
                    Ok(record) => {
                        logger.print_track_summary(&record);
                        // A new track replaces the previous record wholesale
                        current = Some(record);
                    }
                    Err(e) => logger.error(&e.to_string()),
                }
            }
            "2" => match &current {
                Some(record) => render_map(renderer, record, logger),
                None => logger.error("No phone number tracked yet. Please track a phone number first."),
            },
            "3" => match current.as_mut() {
                Some(record) => {
                    let raw = prompt("Enter tracking duration in seconds: ")?;
                    match raw.parse::<u64>() {
                        Ok(secs) if secs > 0 => {
                            if let Err(e) = poller.start(record, Duration::from_secs(secs)).await {
                                logger.error(&e.to_string());
                            }
                        }
                        _ => logger.error("Invalid duration, please enter a positive number of seconds."),
                    }
                }
                None => logger.error("No phone number tracked yet. Please track a phone number first."),
            },
            "4" => {
                println!("Exiting... Goodbye!");
                return Ok(());
            }
            _ => println!("Invalid choice, please select 1, 2, 3, or 4."),
        }
    }
}

fn render_map(renderer: &MapRenderer, record: &TrackedRecord, logger: &StatusLogger) {
    match renderer.render(record) {
        Ok(path) => logger.log_render_success(&path.display().to_string()),
        Err(RenderError::CoordinatesUnavailable) => {
            logger.error("Coordinates are not available. Cannot create map.")
        }
        Err(e) => logger.error(&format!("Error in map creation: {}", e)),
    }
}

fn prompt(text: &str) -> io::Result<String> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
