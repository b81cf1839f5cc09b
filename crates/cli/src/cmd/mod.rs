//! Command implementations

pub mod info;
pub mod install;
pub mod installed;
pub mod list;
pub mod uninstall;
