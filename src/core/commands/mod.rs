// src/core/commands/mod.rs

//! The command-builder engine: token buffer, command cell, pool, entry point,
//! finalized values, and the generated per-command grammars.

pub mod arbitrary;
pub mod args;
pub mod builder;
pub mod builtin;
pub mod cell;
pub mod command_spec;
pub mod command_trait;
pub mod completed;
pub mod groups;
pub mod helpers;
pub mod pool;

pub use arbitrary::Arbitrary;
pub use args::ArgBuffer;
pub use builder::Builder;
pub use cell::CommandCell;
pub(crate) use cell::Incomplete;
pub use command_spec::CommandSpec;
pub use command_trait::{CommandFlags, IntoToken, Variadic};
pub use completed::{Cacheable, Completed};
pub use pool::{CellPool, PoolStats, PooledCell};
