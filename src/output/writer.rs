//! Result normalization and file output
//!
//! Turns the batch's accumulated values into the final line-delimited email
//! file. Values arrive as raw `href` attributes (`mailto:someone@...`); the
//! writer strips the configured prefix and surrounding whitespace and writes
//! one email per line, truncating whatever the previous run left behind.

use crate::HarvestError;
use std::path::Path;

/// Strips the prefix token and surrounding whitespace from one raw value
///
/// The prefix is only stripped from the front; an email that merely
/// contains the token elsewhere is left alone.
pub fn normalize(value: &str, strip_prefix: &str) -> String {
    let trimmed = value.trim();
    trimmed
        .strip_prefix(strip_prefix)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// Writes normalized results to `destination`, one per line
///
/// Overwrites any prior content so repeated runs never accumulate. No
/// deduplication happens here: duplicate targets produce duplicate lines.
///
/// # Arguments
///
/// * `values` - Raw extracted values in completion order
/// * `strip_prefix` - Prefix token to remove from each value
/// * `destination` - Output file path
pub fn write_results(
    values: &[String],
    strip_prefix: &str,
    destination: &Path,
) -> Result<(), HarvestError> {
    let mut content = String::new();
    for value in values {
        content.push_str(&normalize(value, strip_prefix));
        content.push('\n');
    }

    std::fs::write(destination, content)?;

    tracing::info!(
        "Wrote {} emails to {}",
        values.len(),
        destination.display()
    );

    Ok(())
}
