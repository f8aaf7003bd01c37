// src/core/mod.rs

//! The central module containing the builder engine and its supporting types.

pub mod cluster;
pub mod commands;
pub mod errors;

pub use commands::{Builder, Cacheable, CommandFlags, Completed};
pub use errors::CommandError;
