//! Human-readable sizes and durations for build reports.

use std::time::Duration;

const SIZE_UNITS: [&str; 4] = ["B", "kB", "MB", "GB"];

/// Format a byte count with decimal units, as npm tooling reports bundle sizes.
///
/// ```
/// use bunchee_cli::ui::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1536), "1.54 kB");
/// assert_eq!(format_size(2_000_000), "2 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit + 1 < SIZE_UNITS.len() {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        return format!("{} {}", bytes, SIZE_UNITS[0]);
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Format how long a build took.
///
/// Below one second: `Nms`. Below one minute: seconds with two decimals.
/// Otherwise whole minutes and seconds.
///
/// ```
/// use std::time::Duration;
/// use bunchee_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    match duration.as_millis() {
        ms @ 0..1_000 => format!("{}ms", ms),
        1_000..60_000 => format!("{:.2}s", duration.as_secs_f64()),
        _ => {
            let secs = duration.as_secs();
            format!("{}m {}s", secs / 60, secs % 60)
        }
    }
}
