// src/core/commands/completed.rs

//! The finished command values handed to the wire layer.

use crate::core::CommandError;
use crate::core::cluster::slot::Slot;
use crate::core::commands::command_trait::{CommandFlags, IntoToken};
use crate::core::commands::pool::{self, PooledCell};
use bytes::{Bytes, BytesMut};
use std::fmt;

/// A finished command: frozen tokens plus the final flags and slot.
///
/// The cell goes back to its pool when the value is dropped.
pub struct Completed {
    cell: PooledCell,
}

impl Completed {
    pub(crate) fn new(cell: PooledCell) -> Self {
        debug_assert!(cell.is_finalized());
        Self { cell }
    }

    /// Wraps already-split arguments, such as a command line typed by a user.
    /// The result has no flags and an unset slot.
    pub fn from_tokens<I, T>(tokens: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = T>,
        T: IntoToken,
    {
        let mut cell = pool::acquire();
        cell.args
            .push_all(tokens.into_iter().map(IntoToken::into_token));
        if cell.args.is_empty() {
            return Err(CommandError::EmptyCommand);
        }
        cell.args.freeze();
        Ok(Self::new(cell))
    }

    /// The tokens in wire order, to be framed as an array of bulk strings.
    pub fn commands(&self) -> &[Bytes] {
        self.cell.args.as_slice()
    }

    /// The command name, which is always the first token.
    pub fn name(&self) -> &Bytes {
        &self.commands()[0]
    }

    pub fn flags(&self) -> CommandFlags {
        self.cell.flags()
    }

    pub fn slot(&self) -> Slot {
        self.cell.slot()
    }

    pub fn is_read_only(&self) -> bool {
        self.flags().contains(CommandFlags::READ_ONLY)
    }

    pub fn is_block(&self) -> bool {
        self.flags().contains(CommandFlags::BLOCK_TAG)
    }

    pub fn no_reply(&self) -> bool {
        self.flags().contains(CommandFlags::NO_REPLY)
    }

    pub fn is_opt_in(&self) -> bool {
        self.flags().contains(CommandFlags::OPT_IN)
    }

    pub fn is_unsubscribe(&self) -> bool {
        self.flags().contains(CommandFlags::UNSUBSCRIBE)
    }

    pub fn is_multi_get(&self) -> bool {
        self.flags().contains(CommandFlags::MULTI_GET)
    }

    pub fn is_cache_eligible(&self) -> bool {
        self.flags().contains(CommandFlags::CACHE_ELIGIBLE)
    }
}

impl Clone for Completed {
    /// Copies into a fresh cell from the same pool. Tokens are shared, not
    /// duplicated.
    fn clone(&self) -> Self {
        let mut cell = self.cell.pool().acquire();
        cell.args.push_all(self.commands().iter().cloned());
        cell.args.freeze();
        cell.flags = self.cell.flags;
        cell.slot = self.cell.slot;
        Self::new(cell)
    }
}

impl PartialEq for Completed {
    fn eq(&self, other: &Self) -> bool {
        self.commands() == other.commands()
            && self.flags() == other.flags()
            && self.slot() == other.slot()
    }
}

impl Eq for Completed {}

impl fmt::Debug for Completed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<_> = self
            .commands()
            .iter()
            .map(|token| String::from_utf8_lossy(token))
            .collect();
        f.debug_struct("Completed")
            .field("commands", &tokens)
            .field("flags", &self.flags())
            .field("slot", &self.slot())
            .finish()
    }
}

/// A finished read-only command whose reply the client may cache.
///
/// Only produced by `cache()`, which the generated builders offer solely on
/// terminal states of cacheable commands. Dereferences to [`Completed`].
#[derive(Clone, PartialEq, Eq)]
pub struct Cacheable {
    inner: Completed,
}

impl Cacheable {
    pub(crate) fn new(inner: Completed) -> Self {
        debug_assert!(inner.is_cache_eligible());
        Self { inner }
    }

    /// The key the client-side cache indexes this reply under, and the
    /// command that identifies the reply for that key.
    ///
    /// The key is the second token; the command is every other token
    /// concatenated, so `GET k` caches under (`k`, `GET`) and
    /// `BITCOUNT k 0 -1 BIT` under (`k`, `BITCOUNT0-1BIT`).
    pub fn cache_key(&self) -> (Bytes, Bytes) {
        let tokens = self.inner.commands();
        let key = tokens.get(1).cloned().unwrap_or_default();
        if tokens.len() <= 2 {
            return (key, tokens[0].clone());
        }

        let length = tokens
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 1)
            .map(|(_, token)| token.len())
            .sum();
        let mut command = BytesMut::with_capacity(length);
        for (i, token) in tokens.iter().enumerate() {
            if i != 1 {
                command.extend_from_slice(token);
            }
        }
        (key, command.freeze())
    }

    pub fn into_completed(self) -> Completed {
        self.inner
    }
}

impl std::ops::Deref for Cacheable {
    type Target = Completed;

    fn deref(&self) -> &Completed {
        &self.inner
    }
}

impl From<Cacheable> for Completed {
    fn from(cacheable: Cacheable) -> Self {
        cacheable.inner
    }
}

impl fmt::Debug for Cacheable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cacheable").field(&self.inner).finish()
    }
}
