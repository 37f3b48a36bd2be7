//! Status lines on stderr.

use owo_colors::OwoColorize;

/// Kind of status line, which picks its marker and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Info,
    Warning,
    Error,
}

impl Status {
    fn marker(self) -> &'static str {
        match self {
            Status::Success => "✓",
            Status::Info => "ℹ",
            Status::Warning => "⚠",
            Status::Error => "✗",
        }
    }
}

/// Render a status line, coloured only when `color` is set.
pub fn status_line(status: Status, message: &str, color: bool) -> String {
    let marker = status.marker();
    if !color {
        return format!("{} {}", marker, message);
    }

    match status {
        Status::Success => format!("{} {}", marker.green().bold(), message),
        Status::Info => format!("{} {}", marker.blue().bold(), message),
        Status::Warning => format!("{} {}", marker.yellow().bold(), message.yellow()),
        Status::Error => format!("{} {}", marker.red().bold(), message.red()),
    }
}

fn print(status: Status, message: &str) {
    eprintln!("{}", status_line(status, message, super::should_use_color()));
}

pub fn success(message: &str) {
    print(Status::Success, message);
}

pub fn info(message: &str) {
    print(Status::Info, message);
}

pub fn warning(message: &str) {
    print(Status::Warning, message);
}

pub fn error(message: &str) {
    print(Status::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_status_lines() {
        assert_eq!(status_line(Status::Success, "Finished in 5ms", false), "✓ Finished in 5ms");
        assert_eq!(status_line(Status::Warning, "careful", false), "⚠ careful");
        assert_eq!(status_line(Status::Error, "boom", false), "✗ boom");
    }

    #[test]
    fn test_coloured_status_lines_keep_text() {
        let line = status_line(Status::Info, "Rebuilt in 3ms", true);
        assert!(line.contains("Rebuilt in 3ms"));
        assert!(line.contains('\u{1b}'));
    }
}
