// src/core/commands/builder.rs

//! The entry point of every command construction.
//!
//! `Builder` carries one method per command (generated from the command
//! schemas), each returning the start state of that command's grammar.

use crate::core::cluster::slot::Slot;
use crate::core::commands::cell::Incomplete;
use crate::core::commands::command_trait::CommandFlags;
use crate::core::commands::pool::{self, CellPool};

/// Factory for command builders.
///
/// A builder may carry an inherited slot, such as the slot a dedicated
/// connection or a transaction is pinned to. Every command it starts begins
/// with that constraint, so keys from another slot turn the command
/// cross-slot.
///
/// ```
/// use typedcmds::Builder;
///
/// let cmd = Builder::new().get().key("foo").build();
/// assert_eq!(cmd.commands(), ["GET", "foo"]);
/// assert_eq!(cmd.slot().get(), Some(12182));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Builder {
    slot: Slot,
    pool: &'static CellPool,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// A builder drawing cells from the process-wide pool, with no slot
    /// constraint.
    pub fn new() -> Self {
        Self {
            slot: Slot::UNSET,
            pool: pool::global(),
        }
    }

    /// A builder whose commands inherit `slot`.
    pub fn with_slot(slot: Slot) -> Self {
        Self::new().inherit(slot)
    }

    /// Draws cells from `pool` instead of the process-wide pool.
    pub fn with_pool(pool: &'static CellPool) -> Self {
        Self {
            slot: Slot::UNSET,
            pool,
        }
    }

    pub fn inherit(mut self, slot: Slot) -> Self {
        self.slot = slot;
        self
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn pool(&self) -> &'static CellPool {
        self.pool
    }

    /// Claims a cell and seeds it with the command name, the static flags
    /// and the inherited slot.
    pub(crate) fn start(&self, name: &[&'static str], flags: CommandFlags) -> Incomplete {
        let mut cell = self.pool.acquire();
        cell.slot.inherit(self.slot);
        cell.flags = flags;
        let mut incomplete = Incomplete::new(cell);
        for token in name {
            incomplete.push_static(token);
        }
        incomplete
    }
}
