use std::{
    io::{self, Write as _},
    sync::OnceLock,
};

use crossterm::style::{Color, Stylize as _};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger)
}

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(get_logger())?;
    log::set_max_level(level);
    Ok(())
}

/// Raises `base` by one level for each `-v`, saturating at `Trace`.
pub fn level_with_verbosity(base: LevelFilter, verbose: u8) -> LevelFilter {
    LevelFilter::iter()
        .skip_while(|level| *level != base)
        .nth(verbose as usize)
        .unwrap_or(LevelFilter::Trace)
}

/// Writes records to stderr as `| LEVEL source -> message`, the bar colored by level.
pub struct AppLogger;

impl AppLogger {
    const INDICATOR_CHAR: char = '|';

    fn format_record(record: &Record) -> String {
        format!(
            "{} {} {} -> {}",
            Self::INDICATOR_CHAR.with(Self::color(record.level())),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    }

    fn color(level: log::Level) -> Color {
        match level {
            log::Level::Error => Color::Red,
            log::Level::Warn => Color::Yellow,
            log::Level::Info => Color::White,
            log::Level::Debug => Color::Blue,
            log::Level::Trace => Color::Grey,
        }
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let _ = writeln!(io::stderr().lock(), "{}", Self::format_record(record));
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_steps() {
        assert_eq!(level_with_verbosity(LevelFilter::Warn, 0), LevelFilter::Warn);
        assert_eq!(level_with_verbosity(LevelFilter::Warn, 1), LevelFilter::Info);
        assert_eq!(level_with_verbosity(LevelFilter::Warn, 2), LevelFilter::Debug);
        assert_eq!(level_with_verbosity(LevelFilter::Warn, 9), LevelFilter::Trace);
        assert_eq!(level_with_verbosity(LevelFilter::Off, 1), LevelFilter::Error);
    }

    #[test]
    fn record_layout() {
        let line = AppLogger::format_record(
            &Record::builder()
                .args(format_args!("carving {}", 3))
                .level(log::Level::Warn)
                .module_path(Some("pmaze::maze"))
                .build(),
        );
        assert!(line.contains('|'));
        assert!(line.ends_with(" WARN pmaze::maze -> carving 3"));

        let anonymous = AppLogger::format_record(
            &Record::builder()
                .args(format_args!("hi"))
                .level(log::Level::Debug)
                .build(),
        );
        assert!(anonymous.ends_with(" DEBUG unknown -> hi"));
    }
}
