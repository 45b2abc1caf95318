#![deny(missing_docs)]
//! Shared logging initialization for the playlist workspace.
//!
//! The aggregation pipeline logs through the `log` facade; this crate
//! wires that facade to a terminal logger, a dated log file, or both.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
pub enum LogDestination {
    /// Write to a dated file under the given directory.
    File,
    /// Write to terminal (stdout).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Initialize the global logger with the specified destination.
///
/// For `LogDestination::File` or `Both`, appends to
/// `{log_dir}/app-YYYY-MM-DD.log`, creating the directory if needed.
/// Returns the path of the log file when one was opened.
pub fn initialize(destination: LogDestination, log_dir: &Path) -> io::Result<Option<PathBuf>> {
    let level = LevelFilter::Info;
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    let mut file_path = None;

    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        let (logger, path) = create_file_logger(level, config, log_dir)?;
        loggers.push(logger);
        file_path = Some(path);
    }

    // Ignore the error if a logger has already been installed.
    let _ = CombinedLogger::init(loggers);
    Ok(file_path)
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_dir: &Path,
) -> io::Result<(Box<WriteLogger<File>>, PathBuf)> {
    fs::create_dir_all(log_dir)?;
    let today = chrono::Local::now().format("%Y-%m-%d");
    let path = log_dir.join(format!("app-{today}.log"));
    let file = File::options().create(true).append(true).open(&path)?;
    Ok((WriteLogger::new(level, config, file), path))
}
