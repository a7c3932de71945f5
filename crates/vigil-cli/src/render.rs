//! Human-readable result rendering

use colored::Colorize;
use vigil_sdk::{ScanOutcome, Severity};

/// Print the outcome of a finished (or async-submitted) scan
pub fn print_outcome(outcome: &ScanOutcome) {
    if outcome.is_async_submission() {
        println!(
            "{} scan {} submitted; not waiting for completion",
            "→".blue(),
            outcome.scan_id().bold()
        );
        return;
    }

    let Some(report) = outcome.report() else {
        return;
    };

    let summary = &report.summary;
    println!(
        "{} scan {} finished in {}s",
        "✓".green(),
        outcome.scan_id().bold(),
        outcome.result().job.elapsed().as_secs()
    );
    println!(
        "  findings: {} high, {} medium, {} low",
        color_count(summary.high_count, Severity::High),
        color_count(summary.medium_count, Severity::Medium),
        summary.low_count
    );
    println!(
        "  packages: {} total, {} outdated; risk score {:.1}",
        summary.total_packages, summary.outdated_packages, summary.risk_score
    );
    match outcome.report_url() {
        Some(url) => println!("  report: {}", url.underline()),
        None => println!("  report link unavailable (web URL not configured)"),
    }

    if outcome.has_violations() {
        println!("{} thresholds exceeded:", "✗".red());
        for violation in outcome.violations() {
            println!("  {}", violation.to_string().red());
        }
    }
}

fn color_count(count: u32, severity: Severity) -> String {
    if count == 0 {
        return count.to_string();
    }
    match severity {
        Severity::High => count.to_string().red().to_string(),
        Severity::Medium => count.to_string().yellow().to_string(),
        Severity::Low => count.to_string(),
    }
}
