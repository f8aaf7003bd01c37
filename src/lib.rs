// src/lib.rs

//! Type-state builders for Redis commands.
//!
//! Every command starts from a [`Builder`] method and walks a chain of state
//! types, one per position in the command's documented syntax. Only valid
//! argument orders type-check; keys are hashed into a cluster slot as they are
//! appended; the finished [`Completed`] carries the tokens, the slot and the
//! flags the wire layer needs.
//!
//! ```
//! use typedcmds::{Builder, CommandFlags};
//!
//! let cmd = Builder::new()
//!     .bitcount()
//!     .key("foo")
//!     .start(0)
//!     .end(-1)
//!     .bit()
//!     .cache();
//! assert_eq!(cmd.commands(), ["BITCOUNT", "foo", "0", "-1", "BIT"]);
//! assert_eq!(cmd.flags(), CommandFlags::READ_ONLY | CommandFlags::CACHE_ELIGIBLE);
//! ```
//!
//! Write commands have no `cache()`:
//!
//! ```compile_fail
//! use typedcmds::Builder;
//!
//! let _ = Builder::new().ts_add().key("k").timestamp("*").value(1.5).cache();
//! ```
//!
//! Clauses cannot be reordered. `RETENTION` must come before `ON_DUPLICATE`:
//!
//! ```compile_fail
//! use typedcmds::Builder;
//!
//! let _ = Builder::new()
//!     .ts_add()
//!     .key("k")
//!     .timestamp("*")
//!     .value(1.5)
//!     .on_duplicate_block()
//!     .retention(1000)
//!     .build();
//! ```
//!
//! A command cannot be built before its required arguments:
//!
//! ```compile_fail
//! use typedcmds::Builder;
//!
//! let _ = Builder::new().bitop().and().destkey("dst").build();
//! ```

pub mod config;
pub mod core;

// Re-export
pub use crate::core::cluster::slot::{Slot, key_slot};
pub use crate::core::commands::{
    Arbitrary, Builder, Cacheable, CommandFlags, CommandSpec, Completed, IntoToken, Variadic,
    builtin, command_spec,
};
pub use crate::core::errors::CommandError;
