//! Structured logging helpers for mock resolution.
//!
//! All events go through the `tracing` crate; the binary decides where they
//! end up.

use serde_json::Value;

/// Log a dataset source that finished loading.
pub fn log_dataset_loaded(path: &str, calls: usize) {
    tracing::info!(dataset = path, calls, "Mock dataset loaded");
}

pub fn log_dataset_listed(calls: usize, rules: usize) {
    tracing::debug!(calls, rules, "Listing mocked calls");
}

/// Log an incoming mocked call.
pub fn log_mock_call(name: &str, args: &Value, kwargs: &Value) {
    tracing::debug!(
        name,
        args = %args,
        kwargs = %kwargs,
        "Mock call"
    );
}

pub fn log_mock_result(name: &str, result: &Value) {
    tracing::debug!(name, result = %result, "Mock result");
}

pub fn log_mock_error(name: &str, message: &str) {
    tracing::debug!(name, error = message, "Mock result error");
}

/// Log a call the dataset has no answer for, with enough detail to add a rule.
pub fn log_unresolved(reason: &str, name: &str, args: &str, kwargs: &str) {
    tracing::error!(
        name,
        args,
        kwargs,
        "unknown {} for mocking: {}: {{ args: {}, kwargs: {} }}",
        reason,
        name,
        args,
        kwargs
    );
}
