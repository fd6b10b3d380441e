use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use pmaze::dims::Dims;
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read or write settings file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse settings file: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub cols: Option<usize>,
    #[serde(default)]
    pub cell_width: Option<i32>,
    #[serde(default)]
    pub cell_height: Option<i32>,
    #[serde(default)]
    pub delay_ms: Option<u64>,
    #[serde(default)]
    pub commit_char: Option<char>,
    #[serde(default)]
    pub undo_char: Option<char>,
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_rows(&self) -> usize {
        self.rows.unwrap_or(10)
    }

    pub fn get_cols(&self) -> usize {
        self.cols.unwrap_or(10)
    }

    /// Size of one cell on the canvas, in characters, walls included.
    pub fn get_cell_size(&self) -> Dims {
        Dims(self.cell_width.unwrap_or(4), self.cell_height.unwrap_or(2))
    }

    /// Pause after every drawn change, `None` when animation is off.
    pub fn get_delay(&self) -> Option<Duration> {
        match self.delay_ms.unwrap_or_default() {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn get_commit_char(&self) -> char {
        self.commit_char.unwrap_or('*')
    }

    pub fn get_undo_char(&self) -> char {
        self.undo_char.unwrap_or('.')
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mazewalk")
            .join("settings.ron")
    }

    fn parse(source: &str) -> Result<Self, SettingsError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(source)?)
    }

    /// Loads settings from `path`, writing the default file first if there is none.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(source) => Self::parse(&source),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {:?}, writing defaults", path);
                Self::reset_config(path)?;
                Self::parse(DEFAULT_SETTINGS)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }
}
