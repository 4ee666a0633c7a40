use crate::config::get_config;
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::Write;

/// Record of a single transport call.
#[derive(Debug)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

/// Appends one line per API call to the configured log file. Logging is a
/// diagnostic trace only; failures here must never reach the chat screen.
pub fn log_api_call(log: &ApiCallLog) {
    let log_entry = format!(
        "[{}] {} - {} - Status: {} - Time: {}ms\n",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );

    let path = get_config().log_file;
    match OpenOptions::new().append(true).create(true).open(&path) {
        Ok(mut file) => {
            if let Err(e) = file.write_all(log_entry.as_bytes()) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
        Err(e) => eprintln!("Failed to open log file {}: {}", path, e),
    }
}
