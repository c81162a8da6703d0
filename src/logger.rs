use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

static STUDIO_LOGGER: Lazy<StudioLogger> = Lazy::new(StudioLogger::new);

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::from_env())
}

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    let max_level = config.min_level.to_level_filter();
    STUDIO_LOGGER.update_config(config)?;

    log::set_logger(&*STUDIO_LOGGER).map_err(|e| format!("Failed to set logger: {:?}", e))?;
    log::set_max_level(max_level);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }

    fn admits(&self, level: Level) -> bool {
        LogLevel::from(level) >= *self
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    pub location: Option<String>,
}

impl LogEntry {
    fn from_record(record: &Record) -> Self {
        let location = match (record.file(), record.line()) {
            (Some(file), Some(line)) => Some(format!("{}:{}", file, line)),
            _ => None,
        };

        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level: record.level().into(),
            target: record.target().to_string(),
            message: record.args().to_string(),
            location,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub show_colors: bool,
    pub show_target: bool,
    pub show_location: bool,
    pub timestamp_format: String,
    pub output_json: bool,
    pub log_file_path: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: true,
            show_target: true,
            show_location: false,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            output_json: false,
            log_file_path: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// `STUDIO_LOG_LEVEL`, `STUDIO_LOG_JSON` and `STUDIO_LOG_FILE` override the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(level) = std::env::var("STUDIO_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.min_level = level;
        }
        config.output_json = std::env::var("STUDIO_LOG_JSON")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        config.log_file_path = std::env::var("STUDIO_LOG_FILE").ok();
        config
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_file_output(mut self, path: &str) -> Self {
        self.log_file_path = Some(path.to_string());
        self
    }

    pub fn with_json_output(mut self, enabled: bool) -> Self {
        self.output_json = enabled;
        self
    }

    pub fn production() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: false,
            output_json: true,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            show_colors: true,
            show_location: true,
            ..Default::default()
        }
    }
}

pub struct StudioLogger {
    config: Mutex<LoggerConfig>,
    log_file: Mutex<Option<File>>,
}

impl StudioLogger {
    fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
            log_file: Mutex::new(None),
        }
    }

    fn update_config(&self, new_config: LoggerConfig) -> Result<(), String> {
        let file = match &new_config.log_file_path {
            Some(path) => Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| format!("Failed to open log file {}: {}", path, e))?,
            ),
            None => None,
        };

        if let Ok(mut slot) = self.log_file.lock() {
            *slot = file;
        }
        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }
        Ok(())
    }

    fn format_line(entry: &LogEntry, config: &LoggerConfig, colors: bool) -> String {
        let timestamp = entry.timestamp.format(&config.timestamp_format).to_string();
        let level = format!("{:<5}", entry.level.as_str());

        let mut line = if colors {
            format!(
                "{} {} ",
                timestamp.bright_black(),
                level.color(entry.level.color()).bold()
            )
        } else {
            format!("{} {} ", timestamp, level)
        };

        if config.show_target {
            if colors {
                line.push_str(&format!("{} ", entry.target.bright_blue()));
            } else {
                line.push_str(&format!("{} ", entry.target));
            }
        }

        line.push_str(&entry.message);

        if config.show_location {
            if let Some(location) = &entry.location {
                if colors {
                    line.push_str(&format!(" ({})", location.bright_black()));
                } else {
                    line.push_str(&format!(" ({})", location));
                }
            }
        }

        line
    }

    fn render(entry: &LogEntry, config: &LoggerConfig, colors: bool) -> String {
        if config.output_json {
            serde_json::to_string(entry).unwrap_or_default()
        } else {
            Self::format_line(entry, config, colors)
        }
    }
}

impl log::Log for StudioLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.config
            .lock()
            .map(|config| config.min_level.admits(metadata.level()))
            .unwrap_or(true)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry::from_record(record);
        let config = match self.config.lock() {
            Ok(config) => config.clone(),
            Err(_) => return,
        };

        // Diagnostics go to stderr so stdout stays free for program output.
        eprintln!("{}", Self::render(&entry, &config, config.show_colors));

        if let Ok(mut slot) = self.log_file.lock() {
            if let Some(file) = slot.as_mut() {
                let _ = writeln!(file, "{}", Self::render(&entry, &config, false));
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Ok(mut slot) = self.log_file.lock() {
            if let Some(file) = slot.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Logs how long a named operation took when dropped.
pub struct Stopwatch {
    start: Instant,
    name: String,
}

impl Stopwatch {
    pub fn start(name: impl Into<String>) -> Self {
        let name = name.into();
        log::debug!("Starting {}", name);
        Self {
            start: Instant::now(),
            name,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        log::info!("{} finished in {}ms", self.name, self.elapsed().as_millis());
    }
}

pub fn log_config_info(config: &crate::config::StudioConfig) {
    log::info!("Configuration loaded:");
    log::info!("   Endpoint: {}", config.base_url);
    log::info!("   API key variable: {}", config.api_key_env);
    log::info!("   Timeout: {}s", config.timeout_secs);
    log::info!("   Text model: {}", config.text_model);
    log::info!(
        "   Image models: standard={} pro={}",
        config.standard_image_model,
        config.pro_image_model
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: LogLevel) -> LogEntry {
        LogEntry {
            id: "id".to_string(),
            timestamp: Utc::now(),
            level,
            target: "persona_studio::gemini".to_string(),
            message: "hello".to_string(),
            location: Some("src/gemini/mod.rs:10".to_string()),
        }
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Debug.color(), Color::Blue);
        assert!(LogLevel::Info.admits(Level::Warn));
        assert!(!LogLevel::Warn.admits(Level::Info));
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
    }

    #[test]
    fn test_logger_config() {
        let config = LoggerConfig::development();
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.show_colors);

        let prod_config = LoggerConfig::production();
        assert!(!prod_config.show_colors);
        assert!(prod_config.output_json);
    }

    #[test]
    fn plain_line_includes_target_and_location() {
        let config = LoggerConfig::development().with_colors(false);
        let line = StudioLogger::format_line(&entry(LogLevel::Warn), &config, false);
        assert!(line.contains("WARN  persona_studio::gemini hello"));
        assert!(line.ends_with("(src/gemini/mod.rs:10)"));
    }

    #[test]
    fn json_output_is_one_object_per_entry() {
        let config = LoggerConfig::production();
        let rendered = StudioLogger::render(&entry(LogLevel::Error), &config, false);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["level"], "Error");
        assert_eq!(value["message"], "hello");
    }
}
