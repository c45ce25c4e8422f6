//! Logging for the site data pipelines
//!
//! Timestamped, level-prefixed lines written to a session log file under the
//! app directory and echoed to the console.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::sync::{Arc, Mutex, OnceLock};

static LOGGER: OnceLock<Arc<Mutex<SiteLogger>>> = OnceLock::new();

// ============================================================================
// Log Levels
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Fetch, // outbound calls to GitHub / the registry
    Parse,
    Warning,
    Error,
}

impl LogLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Info => "[INFO]",
            LogLevel::Fetch => "[FETCH]",
            LogLevel::Parse => "[PARSE]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Error => "[ERROR]",
        }
    }
}

// ============================================================================
// Site Logger
// ============================================================================

pub struct SiteLogger {
    log_file: Option<File>,
}

impl SiteLogger {
    pub fn new() -> Self {
        let log_dir = crate::site_path!("logs");
        let _ = fs::create_dir_all(&log_dir);

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("ireader-site_{}.log", timestamp));

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .ok();

        let mut logger = Self { log_file };

        let header = format!(
            "ireader-site v{} - {}",
            env!("CARGO_PKG_VERSION"),
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        logger.write_raw(&header);

        logger
    }

    fn write_raw(&mut self, msg: &str) {
        // Write to file
        if let Some(ref mut file) = self.log_file {
            let _ = writeln!(file, "{}", msg);
            let _ = file.flush();
        }

        // Also print to console
        println!("{}", msg);
    }

    pub fn log(&mut self, level: LogLevel, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        let formatted = format!("[{}] {} {}", timestamp, level.prefix(), message);
        self.write_raw(&formatted);
    }
}

impl Default for SiteLogger {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Global Logger Access
// ============================================================================

/// Initialize the global logger (call once at startup)
pub fn init_logger() {
    LOGGER.get_or_init(|| Arc::new(Mutex::new(SiteLogger::new())));
}

/// Get the global logger instance
fn logger() -> Arc<Mutex<SiteLogger>> {
    LOGGER
        .get_or_init(|| Arc::new(Mutex::new(SiteLogger::new())))
        .clone()
}

// ============================================================================
// Convenience Logging Functions
// ============================================================================

pub fn log_info(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Info, message);
    }
}

pub fn log_fetch(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Fetch, message);
    }
}

pub fn log_parse(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Parse, message);
    }
}

pub fn log_warning(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Warning, message);
    }
}

pub fn log_error(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Error, message);
    }
}
