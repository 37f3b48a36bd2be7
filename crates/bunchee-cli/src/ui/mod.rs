//! Terminal UI helpers: status lines, durations and a build spinner.
//!
//! All output here goes to stderr so stdout stays reserved for help text, the
//! version string and lint findings.

mod format;
mod messages;
mod spinner;

pub use format::{format_duration, format_size};
pub use messages::{error, info, status_line, success, warning, Status};
pub use spinner::Spinner;

/// Variables set by common CI providers.
const CI_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "BUILDKITE"];

/// Whether we are running under CI.
pub fn is_ci() -> bool {
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

/// Whether colour should be used on stderr.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colour follows whether stderr
/// is attended.
pub fn should_use_color() -> bool {
    color_choice(
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var_os("FORCE_COLOR").is_some(),
        console::user_attended_stderr(),
    )
}

fn color_choice(no_color: bool, force_color: bool, attended: bool) -> bool {
    !no_color && (force_color || attended)
}

/// Whether animated output (spinners) makes sense.
pub fn is_interactive() -> bool {
    !is_ci() && console::user_attended_stderr()
}
