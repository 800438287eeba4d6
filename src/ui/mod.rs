//! UI module - terminal output concerns
//!
//! Core logic reports through the [`Reporter`] trait; the command surface
//! picks the concrete implementation ([`SpinnerReporter`] for a terminal,
//! [`NullReporter`] for silence).

pub mod progress;
pub mod reporter;

pub use progress::SpinnerReporter;
pub use reporter::{NullReporter, Reporter};
