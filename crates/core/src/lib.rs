//! Core types shared by all hookforge crates
//!
//! This crate provides:
//! - Base error types that all crates can build on
//! - The `Console` abstraction over terminal interaction

pub mod console;
pub mod error;

pub use console::{Console, ScriptedConsole};
pub use error::{Error, Result};
