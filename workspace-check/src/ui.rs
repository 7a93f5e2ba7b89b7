//! Display logic for the workspace-check CLI.
//!
//! Handles the colored result lines, the optional styled header, progress
//! counters and the final summary. Uses only the `console` crate.

use console::{pad_str, style, Alignment};
use std::time::Duration;
use workspace_check_lib::{BatchItem, BatchStatus, BatchTally};

const DOMAIN_WIDTH: usize = 30;

/// Status label shown next to each domain.
fn status_label(status: BatchStatus) -> &'static str {
    match status {
        BatchStatus::Available => "AVAILABLE",
        BatchStatus::Taken => "TAKEN",
        BatchStatus::Error => "ERROR",
    }
}

/// Print a styled header at the start of a pretty run.
pub fn print_header(domain_count: usize) {
    println!(
        "{} {} {}",
        style("workspace-check").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "— Checking {} domain{}",
            domain_count,
            if domain_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );
    println!();
}

/// Format and print a single result with colors and alignment.
///
/// If `counter` is Some((current, total)), a progress prefix like `[3/8]`
/// is shown. With `show_message`, the outcome message is appended dimmed.
pub fn print_result(item: &BatchItem, show_message: bool, counter: Option<(usize, usize)>) {
    let padded_domain = pad_str(&item.domain, DOMAIN_WIDTH, Alignment::Left, Some(".."));

    let prefix = match counter {
        Some((cur, total)) => {
            format!("{} ", style(format!("[{}/{}]", cur, total)).dim())
        }
        None => String::new(),
    };

    let label = match item.status {
        BatchStatus::Available => style(status_label(item.status)).green().bold(),
        BatchStatus::Taken => style(status_label(item.status)).red().bold(),
        BatchStatus::Error => style(status_label(item.status)).yellow(),
    };

    let message = if show_message {
        format!("  {}", style(&item.message).dim())
    } else {
        String::new()
    };

    println!(
        "  {}{}  {}{}",
        prefix,
        style(&padded_domain).white(),
        label,
        message,
    );
}

/// Print the final summary bar with colored counts.
pub fn print_summary(tally: &BatchTally, duration: Duration) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}  {}  {}",
        style(tally.completed).bold(),
        if tally.completed == 1 { "" } else { "s" },
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} available", tally.available)).green(),
        style("|").dim(),
        style(format!("{} taken", tally.taken)).red(),
        style("|").dim(),
        style(format!("{} errors", tally.errors)).yellow(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(BatchStatus::Available), "AVAILABLE");
        assert_eq!(status_label(BatchStatus::Taken), "TAKEN");
        assert_eq!(status_label(BatchStatus::Error), "ERROR");
    }

    #[test]
    fn test_print_result_does_not_panic() {
        // Rendering must handle long domains (truncated with "..") and
        // counters without panicking
        let item = BatchItem {
            domain: "a-very-long-subdomain-name.some-long-domain.example.com".to_string(),
            status: BatchStatus::Taken,
            message: "Domain is already using Google Workspace.".to_string(),
        };
        print_result(&item, true, Some((3, 8)));
        print_result(&item, false, None);
    }
}
