//! Formatting of sizes, durations, the plan summary and the size report.

use console::Term;
use owo_colors::{OwoColorize, Stream::Stderr};
use sheaf_plan::{BuildPlan, ChangeKind, SizeChange, SizeEntry};
use std::time::Duration;

/// Format a byte count in the most appropriate unit.
///
/// # Examples
///
/// ```
/// use sheaf_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format a signed size change; zero renders as `=`.
///
/// ```
/// use sheaf_cli::ui::format_delta;
///
/// assert_eq!(format_delta(0), "=");
/// assert_eq!(format_delta(12), "+12 B");
/// assert_eq!(format_delta(-2048), "-2.00 KB");
/// ```
pub fn format_delta(delta: i64) -> String {
    match delta {
        0 => "=".to_string(),
        d if d > 0 => format!("+{}", format_size(d.unsigned_abs())),
        d => format!("-{}", format_size(d.unsigned_abs())),
    }
}

/// Format a duration as ms, seconds or minutes.
///
/// ```
/// use std::time::Duration;
/// use sheaf_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn rule_width() -> usize {
    (Term::stderr().size().1 as usize).min(80)
}

/// One uncolored row of the plan summary.
pub(crate) fn plan_row(name: &str, input: &str, output: &str, width: usize) -> String {
    format!("{name:<width$}  {input} -> {output}")
}

/// Print the jobs of a plan as a table on stderr.
pub fn print_plan_summary(plan: &BuildPlan, elapsed: Duration) {
    let rule = "─".repeat(rule_width());
    let width = plan.jobs.iter().map(|j| j.name.len()).max().unwrap_or(0);

    eprintln!(
        "\n{}",
        "Build Plan".if_supports_color(Stderr, |t| t.bold().underline().to_string())
    );
    eprintln!("{}", rule);
    for job in &plan.jobs {
        let row = plan_row(
            &job.name,
            &job.input.display().to_string(),
            &job.output.display().to_string(),
            width,
        );
        eprintln!("  {} {}", "▸".if_supports_color(Stderr, |t| t.blue()), row);
    }
    eprintln!("{}", rule);

    let mut footer = format!(
        "{} jobs ({}, env {}) in {}",
        plan.len(),
        plan.jobs
            .first()
            .map(|j| j.format.as_str())
            .unwrap_or("cjs"),
        plan.env,
        format_duration(elapsed)
    );
    if !plan.collisions.is_empty() {
        footer.push_str(&format!(", {} shadowed", plan.collisions.len()));
    }
    eprintln!(
        "  {} {}",
        "Total:".if_supports_color(Stderr, |t| t.bold()),
        footer.if_supports_color(Stderr, |t| t.green())
    );
}

/// One uncolored row of the size report.
pub(crate) fn size_row(change: &SizeChange, width: usize) -> String {
    let name = &change.name;
    match (change.kind(), change.current) {
        (ChangeKind::Removed, _) | (_, None) => format!("{name:<width$}  removed"),
        (kind, Some(current)) => {
            let mut row = format!(
                "{name:<width$}  {:>10}  {:>10} gzip",
                format_size(current.bundled),
                format_size(current.gzipped)
            );
            match kind {
                ChangeKind::Added => row.push_str("  (new)"),
                ChangeKind::Changed => row.push_str(&format!(
                    "  ({}, {} gzip)",
                    format_delta(change.bundled_delta()),
                    format_delta(change.gzipped_delta())
                )),
                _ => {}
            }
            row
        }
    }
}

/// Print per-artifact sizes and their deltas on stderr.
pub fn print_size_report(changes: &[SizeChange], total: SizeEntry) {
    let rule = "─".repeat(rule_width());
    let width = changes.iter().map(|c| c.name.len()).max().unwrap_or(0);

    eprintln!(
        "\n{}",
        "Artifact Sizes".if_supports_color(Stderr, |t| t.bold().underline().to_string())
    );
    eprintln!("{}", rule);
    for change in changes {
        let row = size_row(change, width);
        let (marker, line) = match change.kind() {
            ChangeKind::Unchanged => (
                "▸".if_supports_color(Stderr, |t| t.blue()).to_string(),
                row,
            ),
            ChangeKind::Added => (
                "+".if_supports_color(Stderr, |t| t.green()).to_string(),
                row.if_supports_color(Stderr, |t| t.green()).to_string(),
            ),
            ChangeKind::Removed => (
                "-".if_supports_color(Stderr, |t| t.red()).to_string(),
                row.if_supports_color(Stderr, |t| t.red()).to_string(),
            ),
            ChangeKind::Changed => (
                "~".if_supports_color(Stderr, |t| t.yellow()).to_string(),
                row.if_supports_color(Stderr, |t| t.yellow()).to_string(),
            ),
        };
        eprintln!("  {} {}", marker, line);
    }
    eprintln!("{}", rule);
    eprintln!(
        "  {} {} ({} gzip)",
        "Total:".if_supports_color(Stderr, |t| t.bold()),
        format_size(total.bundled).if_supports_color(Stderr, |t| t.green()),
        format_size(total.gzipped).if_supports_color(Stderr, |t| t.green())
    );
}
