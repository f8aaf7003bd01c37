// src/core/commands/arbitrary.rs

//! An untyped builder for commands without a schema, such as module commands.

use crate::core::CommandError;
use crate::core::commands::builder::Builder;
use crate::core::commands::cell::Incomplete;
use crate::core::commands::command_trait::{CommandFlags, Variadic};
use crate::core::commands::completed::{Cacheable, Completed};
use bytes::Bytes;

/// A command assembled token by token.
///
/// Nothing checks the argument structure, but keys still go through the slot
/// tracker and the flags still reach the wire layer.
///
/// ```
/// use typedcmds::Builder;
///
/// let cmd = Builder::new()
///     .arbitrary(["JSON.GET"])
///     .keys("doc")
///     .args("$.name")
///     .read_only()
///     .build()?;
/// assert_eq!(cmd.commands(), ["JSON.GET", "doc", "$.name"]);
/// assert!(cmd.is_read_only());
/// # Ok::<(), typedcmds::CommandError>(())
/// ```
#[derive(Debug)]
#[must_use = "a command builder does nothing until it is built"]
pub struct Arbitrary {
    cmd: Incomplete,
    name_len: usize,
    keys: usize,
    first_key: Option<usize>,
}

impl Builder {
    /// Starts an untyped command from its name token(s).
    pub fn arbitrary(&self, name: impl Variadic<Bytes>) -> Arbitrary {
        let mut cmd = self.start(&[], CommandFlags::empty());
        let mut name_len = 0;
        name.each(|token| {
            cmd.push(token);
            name_len += 1;
        });
        Arbitrary {
            cmd,
            name_len,
            keys: 0,
            first_key: None,
        }
    }
}

impl Arbitrary {
    /// Appends keys, tracking their slot.
    pub fn keys(mut self, keys: impl Variadic<Bytes>) -> Self {
        keys.each(|key| {
            if self.first_key.is_none() {
                self.first_key = Some(self.cmd.len());
            }
            self.keys += 1;
            self.cmd.push_key(key);
        });
        self
    }

    /// Appends non-key arguments.
    pub fn args(mut self, args: impl Variadic<Bytes>) -> Self {
        args.each(|arg| self.cmd.push(arg));
        self
    }

    pub fn read_only(mut self) -> Self {
        self.cmd.tag(CommandFlags::READ_ONLY);
        self
    }

    pub fn blocking(mut self) -> Self {
        self.cmd.tag(CommandFlags::BLOCK_TAG);
        self
    }

    /// Fails with [`CommandError::EmptyCommand`] when no name token was given,
    /// even if keys or arguments follow.
    pub fn build(self) -> Result<Completed, CommandError> {
        if self.name_len == 0 {
            return Err(CommandError::EmptyCommand);
        }
        Ok(self.cmd.build())
    }

    /// Finalizes as a cacheable read. The command must be marked read-only
    /// and carry exactly one key, placed right after a one-token name.
    pub fn cache(self) -> Result<Cacheable, CommandError> {
        if self.name_len == 0 {
            return Err(CommandError::EmptyCommand);
        }
        if !self.cmd.is_tagged(CommandFlags::READ_ONLY)
            || self.keys != 1
            || self.first_key != Some(1)
        {
            return Err(CommandError::NotCacheable(self.cmd.name_lossy()));
        }
        Ok(self.cmd.cache())
    }
}
