//! Terminal output for rnws.
//!
//! Status lines go to stderr so that stdout stays free for tools that pipe
//! rnws output. Spinners and colors degrade on their own when stderr is not
//! a terminal.

mod format;
mod messages;
mod spinner;

pub use format::{format_duration, format_size, print_bundle_summary};
pub use messages::{info, success, warning};
pub use spinner::Spinner;

/// Variables set by common CI providers.
const CI_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS", "BUILDKITE"];

/// True when running under a CI provider.
pub fn is_ci() -> bool {
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

/// Whether colored output should be used.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors follow whether a
/// user is attached to stderr.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Apply the color decision to spinners and summary tables.
///
/// `--no-color` forces colors off regardless of the environment.
pub fn init_colors(no_color: bool) {
    console::set_colors_enabled_stderr(!no_color && should_use_color());
}
