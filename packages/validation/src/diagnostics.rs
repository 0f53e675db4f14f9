//! Side channel for configuration warnings.
//!
//! A declared validation entry that cannot be called is skipped and
//! reported here. Validation failures themselves never reach this channel.

#[cfg(test)]
use mockall::automock;

/// Receives non-fatal warnings about how a component declared its validations
#[cfg_attr(test, automock)]
pub trait Diagnostics: Send + Sync {
    fn warn(&self, key: &str, message: &str);
}

/// Forwards warnings to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, key: &str, message: &str) {
        tracing::warn!(key = %key, "{}", message);
    }
}

/// Drops every warning
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn warn(&self, _key: &str, _message: &str) {}
}

impl<F> Diagnostics for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn warn(&self, key: &str, message: &str) {
        self(key, message)
    }
}
