//! Logging initialisation built on flexi_logger
//!
//! The crate itself only ever logs through the `log` facade; host
//! applications that already install their own backend can skip this
//! module entirely.

use crate::core::sync::handle_mutex_poison;

// Global static logger handle for flexi_logger
static LOGGER_HANDLE: std::sync::OnceLock<std::sync::Mutex<flexi_logger::LoggerHandle>> =
    std::sync::OnceLock::new();

/// Initialise logging with flexi_logger
///
/// `log_format` selects one of "text" (default) or "json"; `log_file`
/// redirects output to the given path instead of stderr.
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let level_str = log_level.unwrap_or("info");
    let format_type = log_format.map_or("text", |f| f);

    let mut logger = Logger::try_with_str(level_str)?;

    match format_type {
        "json" => {
            logger = logger.format(json_format);
        }
        _ => {
            if color_enabled {
                logger = logger.format(simple_color_format);
            } else {
                logger = logger.format(simple_format);
            }
        }
    }

    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(std::path::Path::new(file_path))?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(std::sync::Mutex::new(handle));

    Ok(())
}

/// Reconfigure the log level at runtime
///
/// # Limitations
/// Format and output destination are fixed at initialisation; only the log
/// level can be changed afterwards. This is a limitation of flexi_logger's
/// design.
pub fn reconfigure_logging(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let handle_mutex = LOGGER_HANDLE
        .get()
        .ok_or("Logger handle not initialised. Call init_logging first.")?;
    let mut handle = handle_mutex_poison(handle_mutex.lock(), |msg| -> Box<dyn std::error::Error> {
        msg.into()
    })?;
    let _ = handle.parse_and_push_temp_spec(log_level);
    Ok(())
}

// Simple text format: "YYYY-MM-DD HH:mm:ss.fff INF message (relay/proxy.rs:42)"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let level_abbr = level_abbreviation(record.level());
    let target_formatted = format_target_as_path(record.target(), record.line());

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr,
        record.args(),
        target_formatted
    )
}

// Simple color format
fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::*;

    let level_colored = match record.level() {
        log::Level::Error => "ERR".red().bold(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Info => "INF".green(),
        log::Level::Debug => "DBG".blue(),
        log::Level::Trace => "TRC".magenta(),
    };
    let target_formatted = format_target_as_path(record.target(), record.line());

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored,
        record.args(),
        target_formatted.dimmed()
    )
}

// JSON format: timestamp, level, message, target
fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use serde_json::{json, to_string};

    let json_obj = json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbreviation(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line())
    });

    match to_string(&json_obj) {
        Ok(json_string) => {
            w.write_all(json_string.as_bytes())?;
            Ok(())
        }
        Err(_) => {
            w.write_all(b"{\"error\":\"Failed to serialize log message\"}")?;
            Ok(())
        }
    }
}

fn level_abbreviation(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

// Helper function to format target as file path with line number
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    // Convert podrelay::relay::proxy -> relay/proxy.rs
    let path_like = if let Some(without_prefix) = target.strip_prefix("podrelay::") {
        without_prefix.replace("::", "/") + ".rs"
    } else {
        target.replace("::", "/")
    };

    if let Some(line_num) = line {
        format!("{}:{}", path_like, line_num)
    } else {
        path_like
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;

    static INIT: Once = Once::new();

    fn init_test_logging() {
        INIT.call_once(|| {
            // Only call this once to avoid "logger already initialized" errors
            let _ = init_logging(Some("debug"), None, None, false);
        });
    }

    #[test]
    #[serial]
    fn test_logging_macros_work_after_init() {
        init_test_logging();

        log::info!("Test info message");
        log::debug!("Test debug message");
        log::warn!("Test warning message");
    }

    #[test]
    #[serial]
    fn test_reconfigure_requires_initialisation() {
        init_test_logging();

        // After init, level reconfiguration should be accepted
        assert!(reconfigure_logging("trace").is_ok());
        assert!(reconfigure_logging("info").is_ok());
    }

    #[test]
    fn test_format_target_as_path_strips_crate_prefix() {
        assert_eq!(
            format_target_as_path("podrelay::relay::proxy", Some(42)),
            "relay/proxy.rs:42"
        );
        assert_eq!(
            format_target_as_path("podrelay::core::sync", None),
            "core/sync.rs"
        );
        // External targets keep their module path shape
        assert_eq!(
            format_target_as_path("hyper::client", Some(7)),
            "hyper/client:7"
        );
    }

    #[test]
    fn test_level_abbreviations() {
        assert_eq!(level_abbreviation(log::Level::Error), "ERR");
        assert_eq!(level_abbreviation(log::Level::Trace), "TRC");
    }
}
