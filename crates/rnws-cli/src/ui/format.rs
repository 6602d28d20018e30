//! Sizes, durations and the bundle summary table.

use console::Term;
use owo_colors::OwoColorize;
use std::time::Duration;

/// Human readable byte count.
///
/// ```
/// use rnws::ui::format_size;
///
/// assert_eq!(format_size(812), "812 B");
/// assert_eq!(format_size(1_536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

/// Human readable duration: `850ms`, `2.40s`, `3m 5s`.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1_000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print one row per written bundle plus a total line to stderr.
///
/// Rows are `(label, size in bytes, time to fetch and write)`.
pub fn print_bundle_summary(rows: &[(String, u64, Duration)]) {
    let width = (Term::stderr().size().1 as usize).clamp(20, 80);
    let rule = "─".repeat(width);

    eprintln!("\n{}", "Bundles".bold().underline());
    eprintln!("{}", rule);

    for (label, size, elapsed) in rows {
        eprintln!(
            "  {} {} {} {}",
            "▸".blue(),
            label.bright_white().bold(),
            format_size(*size).dimmed(),
            format!("({})", format_duration(*elapsed)).dimmed()
        );
    }

    eprintln!("{}", rule);

    let total: u64 = rows.iter().map(|(_, size, _)| size).sum();
    // Bundles are fetched concurrently, so the slowest one is the wall time
    let slowest = rows
        .iter()
        .map(|(_, _, elapsed)| *elapsed)
        .max()
        .unwrap_or_default();
    eprintln!(
        "  {} {} in {}",
        "Total:".bold(),
        format_size(total).green(),
        format_duration(slowest).green()
    );
}
