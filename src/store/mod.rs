//! Persistent state - config record and root lock

pub mod config;
pub mod lock;

pub use config::Config;
pub use lock::{Lock, LockError};
