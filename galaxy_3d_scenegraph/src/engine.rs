/// Galaxy3D Engine - process-wide logging facade
///
/// The scene graph keeps no global rendering state: traversals, stacks and
/// pagers are owned by the caller. The only process-wide singleton is the
/// logger used by the `engine_*!` macros, stored behind a RwLock so worker
/// threads and traversals can log concurrently.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

/// Engine facade for process-wide services
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_scenegraph::galaxy3d::Engine;
/// use galaxy_3d_scenegraph::galaxy3d::log::{DefaultLogger, LogSeverity};
///
/// // Print per-node traversal detail while debugging a scene
/// Engine::set_logger(DefaultLogger::new(LogSeverity::Trace));
/// ```
pub struct Engine;

impl Engine {
    /// Set a custom logger
    ///
    /// Replaces the current logger. All subsequent `engine_*!` calls go to
    /// the new logger, from every thread.
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger at Info)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error!, engine_err! and engine_bail!.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
