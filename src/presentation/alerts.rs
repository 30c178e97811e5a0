//! Failure reporting.
//!
//! Every failed action is logged and shown once; nothing is retried.

use std::fmt::Display;

use tracing::error;

/// Text shown to the user for a failure.
#[must_use]
pub fn format_alert(error: &dyn Display) -> String {
    format!("Error: {error}")
}

/// Logs the failure and prints it to stderr.
pub fn alert(error: &dyn Display) {
    error!(error = %error, "Action failed");
    eprintln!("{}", format_alert(error));
}
