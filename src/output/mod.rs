//! Output module for result writing and summaries
//!
//! This module handles:
//! - Normalizing extracted values and writing the line-delimited email file
//! - Formatting the end-of-run harvest summary

pub mod stats;
mod writer;

pub use stats::{print_summary, summary_line};
pub use writer::{normalize, write_results};
