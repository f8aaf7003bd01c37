// src/core/commands/cell.rs

//! The command cell and the `Incomplete` handle every generated state wraps.

use crate::core::cluster::slot::{Slot, SlotTracker};
use crate::core::commands::args::ArgBuffer;
use crate::core::commands::command_trait::{CommandFlags, IntoToken};
use crate::core::commands::completed::{Cacheable, Completed};
use crate::core::commands::helpers::{float_token, int_token};
use crate::core::commands::pool::PooledCell;
use bytes::Bytes;

/// The record a command is assembled in: tokens, flags and slot.
#[derive(Debug, Default)]
pub struct CommandCell {
    pub(crate) args: ArgBuffer,
    pub(crate) flags: CommandFlags,
    pub(crate) slot: SlotTracker,
}

impl CommandCell {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            args: ArgBuffer::with_capacity(capacity),
            flags: CommandFlags::empty(),
            slot: SlotTracker::new(),
        }
    }

    pub fn args(&self) -> &ArgBuffer {
        &self.args
    }

    pub fn flags(&self) -> CommandFlags {
        self.flags
    }

    pub fn slot(&self) -> Slot {
        self.slot.snapshot()
    }

    pub fn is_finalized(&self) -> bool {
        self.args.is_frozen()
    }

    /// Returns the cell to its pristine state, keeping the token allocation.
    pub fn reset(&mut self) {
        self.args.reset();
        self.flags = CommandFlags::empty();
        self.slot.reset();
    }

    /// Whether the cell holds nothing: no tokens, no flags, no slot.
    pub fn is_pristine(&self) -> bool {
        self.args.is_empty()
            && !self.args.is_frozen()
            && self.flags.is_empty()
            && self.slot.snapshot().is_unset()
    }
}

/// The single owner of a cell under construction.
///
/// Every generated state type is a newtype over `Incomplete`, so a transition
/// moves the same cell from one state type to the next. Dropping an
/// unfinished state returns the cell to its pool.
#[derive(Debug)]
pub(crate) struct Incomplete {
    cell: PooledCell,
}

impl Incomplete {
    pub(crate) fn new(cell: PooledCell) -> Self {
        Self { cell }
    }

    pub(crate) fn push_static(&mut self, token: &'static str) {
        self.cell.args.push(Bytes::from_static(token.as_bytes()));
    }

    pub(crate) fn push(&mut self, token: impl IntoToken) {
        self.cell.args.push(token.into_token());
    }

    /// The only way a key reaches the buffer: the slot is observed first.
    pub(crate) fn push_key(&mut self, key: impl IntoToken) {
        let key = key.into_token();
        self.cell.slot.observe(&key);
        self.cell.args.push(key);
    }

    pub(crate) fn push_int(&mut self, value: i64) {
        self.cell.args.push(int_token(value));
    }

    pub(crate) fn push_float(&mut self, value: f64) {
        self.cell.args.push(float_token(value));
    }

    pub(crate) fn tag(&mut self, flags: CommandFlags) {
        self.cell.flags.insert(flags);
    }

    pub(crate) fn len(&self) -> usize {
        self.cell.args.len()
    }

    /// The first token, for error messages.
    pub(crate) fn name_lossy(&self) -> String {
        self.cell
            .args
            .as_slice()
            .first()
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .unwrap_or_default()
    }

    pub(crate) fn is_tagged(&self, flags: CommandFlags) -> bool {
        self.cell.flags.contains(flags)
    }

    pub(crate) fn build(mut self) -> Completed {
        self.cell.args.freeze();
        Completed::new(self.cell)
    }

    pub(crate) fn cache(mut self) -> Cacheable {
        self.cell.flags.insert(CommandFlags::CACHE_ELIGIBLE);
        Cacheable::new(self.build())
    }
}
