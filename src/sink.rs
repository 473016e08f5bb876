//! Submission sinks that receive validated form data

use crate::state::FormValues;

/// Receives the values of a successfully validated form.
///
/// Called synchronously while the form is being submitted. The engine does not
/// handle sink failures, so implementations deal with their own errors.
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionSink: Send {
    fn consume(&mut self, snapshot: &FormValues);
}

/// Logs each submission: the complete object, then every key/value pair
#[derive(Debug, Default)]
pub struct TracingSink;

impl SubmissionSink for TracingSink {
    fn consume(&mut self, snapshot: &FormValues) {
        match serde_json::to_string(snapshot) {
            Ok(json) => tracing::info!("Form Data (complete object): {json}"),
            Err(e) => tracing::warn!("Failed to serialize form data: {e}"),
        }
        for line in key_value_lines(snapshot) {
            tracing::info!("{line}");
        }
    }
}

/// One `key: "value"` line per entry, sorted by key
fn key_value_lines(snapshot: &FormValues) -> Vec<String> {
    let mut pairs: Vec<_> = snapshot.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}: \"{value}\""))
        .collect()
}
