// src/core/errors.rs

//! Defines the error type for the few runtime failures the builders have.
//!
//! Misordered or missing arguments never reach this type: the generated
//! grammars reject them at compile time.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// An untyped command was finalized without a single token.
    #[error("Cannot build a command without tokens")]
    EmptyCommand,

    #[error("Command '{0}' cannot be served from the client-side cache")]
    NotCacheable(String),

    /// A raw slot word that is neither a sentinel nor a slot below 16384.
    #[error("Invalid slot value {0:#010x}")]
    InvalidSlot(u32),

    #[error("The command cell pool is already initialized")]
    PoolAlreadyInitialized,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
