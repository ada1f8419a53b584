//! Harvest summary display
//!
//! Formats the batch report for the console. The summary is the only
//! user-visible signal about failures; the output file itself carries
//! nothing but successful emails.

use crate::batch::BatchReport;

/// Formats the headline success/attempted line
///
/// # Arguments
///
/// * `report` - The finished batch report
pub fn summary_line(report: &BatchReport) -> String {
    format!(
        "Successfully retrieved {} out of {} emails",
        report.found(),
        report.attempted
    )
}

/// Prints the harvest summary to stdout
///
/// # Arguments
///
/// * `report` - The finished batch report
pub fn print_summary(report: &BatchReport) {
    println!("=== Harvest Summary ===\n");

    println!("{}", summary_line(report));

    let percentage = if report.attempted > 0 {
        (report.found() as f64 / report.attempted as f64) * 100.0
    } else {
        0.0
    };
    println!("  Success rate: {:.1}%", percentage);
    println!("  No email listed: {}", report.absent);
    println!("  Fetch failures: {}", report.failed);
}
