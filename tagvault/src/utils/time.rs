use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Layout used when presenting cached timestamps to a user.
///
/// Example: "Tuesday, October 14, 2025 03:49:58"
pub const DISPLAY_FORMAT: &str = "%A, %B %d, %Y %I:%M:%S";

/// Formats a filesystem timestamp in local time using [`DISPLAY_FORMAT`].
pub fn format_system_time(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format(DISPLAY_FORMAT).to_string()
}
