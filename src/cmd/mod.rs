//! Command modules - one file per CLI command

pub mod install;
pub mod list;
pub mod off;
pub mod on;
pub mod uninstall;
pub mod r#use;
