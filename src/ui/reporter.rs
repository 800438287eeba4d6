//! Reporter trait for dependency injection
//!
//! This trait allows core logic to report progress and status without
//! being coupled to a specific terminal implementation.

pub trait Reporter: Send + Sync {
    /// Start a live phase (e.g. "Fetching cordova 9.0.0").
    fn begin(&self, msg: &str);

    /// Replace the live phase text while it keeps running.
    fn update(&self, msg: &str);

    /// End the live phase, clearing its display.
    fn finish(&self);

    /// Log a warning message.
    fn warning(&self, msg: &str);
}

/// A no-op reporter for silent operations (e.g., testing).
#[derive(Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn begin(&self, _: &str) {}
    fn update(&self, _: &str) {}
    fn finish(&self) {}
    fn warning(&self, _: &str) {}
}
