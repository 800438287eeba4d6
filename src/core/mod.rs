//! Core modules - pure, stateless logic

pub mod version;
