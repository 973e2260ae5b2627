use crate::settings::LoggingConfig;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs::{File, OpenOptions};

/// Parse a configured level name, defaulting to `Info`.
pub fn level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

#[derive(Debug)]
enum LogTarget {
    File(File),
    Stderr,
}

/// The configured log file, or stderr when none is set or it cannot be opened.
fn open_target(config: &LoggingConfig) -> LogTarget {
    let Some(file_path) = config.file() else {
        return LogTarget::Stderr;
    };

    match OpenOptions::new().create(true).append(true).open(file_path) {
        Ok(file) => LogTarget::File(file),
        Err(e) => {
            eprintln!("Warning: Failed to open log file '{file_path}': {e}");
            LogTarget::Stderr
        }
    }
}

/// Install a global logger for hosts that do not bring their own.
///
/// Library code only talks to the `log` facade; calling this is optional.
pub fn setup_logger(config: &LoggingConfig) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let base_config = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level_filter(config.level()));

    match open_target(config) {
        LogTarget::File(file) => base_config.chain(file).apply()?,
        LogTarget::Stderr => base_config.chain(std::io::stderr()).apply()?,
    }

    log::info!("Logger initialized with level: {}", config.level());
    Ok(())
}
