// src/core/cluster/slot.rs

//! Implements the cluster hash slot algorithm and the per-command slot tracker.

use crate::core::CommandError;
use crc::{CRC_16_XMODEM, Crc};
use std::fmt;

/// The total number of hash slots in the cluster.
pub const NUM_SLOTS: usize = 16384;

/// The CRC16 variant Redis Cluster hashes keys with.
const CRC16_ALGO: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

const UNSET_BIT: u32 = 1 << 31;
const CROSS_BIT: u32 = 1 << 30;
const SLOT_MASK: u32 = (NUM_SLOTS as u32) - 1;

/// Calculates the hash slot for a given key.
///
/// If the key contains a non-empty hash tag (the bytes between the first `{`
/// and the first `}` after it), only the tag is hashed, which lets callers
/// force related keys into the same slot. Otherwise the whole key is hashed.
pub fn key_slot(key: &[u8]) -> u16 {
    if let Some(start) = key.iter().position(|&b| b == b'{')
        && let Some(end_offset) = key[start + 1..].iter().position(|&b| b == b'}')
    {
        let end = start + 1 + end_offset;
        // "user:{}" has an empty tag and hashes in full.
        if end > start + 1 {
            return CRC16_ALGO.checksum(&key[start + 1..end]) % (NUM_SLOTS as u16);
        }
    }
    CRC16_ALGO.checksum(key) % (NUM_SLOTS as u16)
}

/// The slot constraint of a command, packed into one 32-bit word.
///
/// The top bit marks "no key seen yet", the next bit marks "keys span several
/// slots", and otherwise the low 14 bits hold the slot. The encoding is shared
/// with the cluster client and must not change.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(u32);

/// A decoded view of [`Slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    Unset,
    Single(u16),
    Cross,
}

impl Slot {
    pub const UNSET: Slot = Slot(UNSET_BIT);
    pub const CROSS: Slot = Slot(CROSS_BIT);

    /// The slot of a single key.
    pub fn of(key: &[u8]) -> Self {
        Slot(u32::from(key_slot(key)))
    }

    /// Builds a slot from a number in `[0, 16384)`.
    pub fn from_number(slot: u16) -> Result<Self, CommandError> {
        if usize::from(slot) >= NUM_SLOTS {
            return Err(CommandError::InvalidSlot(u32::from(slot)));
        }
        Ok(Slot(u32::from(slot)))
    }

    pub fn state(self) -> SlotState {
        if self.0 & CROSS_BIT != 0 {
            SlotState::Cross
        } else if self.0 & UNSET_BIT != 0 {
            SlotState::Unset
        } else {
            SlotState::Single((self.0 & SLOT_MASK) as u16)
        }
    }

    /// The slot number, if exactly one slot is involved.
    pub fn get(self) -> Option<u16> {
        match self.state() {
            SlotState::Single(slot) => Some(slot),
            _ => None,
        }
    }

    pub fn is_unset(self) -> bool {
        self.state() == SlotState::Unset
    }

    pub fn is_cross(self) -> bool {
        self.state() == SlotState::Cross
    }

    /// The raw 32-bit word.
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Folds one more key slot into the constraint.
    fn merge(self, slot: u16) -> Self {
        match self.state() {
            SlotState::Unset => Slot(u32::from(slot)),
            SlotState::Single(current) if current == slot => self,
            SlotState::Single(_) | SlotState::Cross => Slot::CROSS,
        }
    }
}

impl Default for Slot {
    fn default() -> Self {
        Slot::UNSET
    }
}

impl TryFrom<u32> for Slot {
    type Error = CommandError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        if raw & CROSS_BIT != 0 {
            Ok(Slot::CROSS)
        } else if raw & UNSET_BIT != 0 {
            Ok(Slot::UNSET)
        } else if raw > SLOT_MASK {
            Err(CommandError::InvalidSlot(raw))
        } else {
            Ok(Slot(raw))
        }
    }
}

impl From<Slot> for u32 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state() {
            SlotState::Unset => f.write_str("Slot(unset)"),
            SlotState::Cross => f.write_str("Slot(cross)"),
            SlotState::Single(slot) => write!(f, "Slot({slot})"),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state() {
            SlotState::Unset => f.write_str("unset"),
            SlotState::Cross => f.write_str("cross-slot"),
            SlotState::Single(slot) => write!(f, "{slot}"),
        }
    }
}

/// Accumulates the slot constraint as keys are appended to a command.
///
/// Once cross-slot, the tracker stays cross-slot until it is reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotTracker {
    current: Slot,
}

impl SlotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a constraint inherited from the surrounding context, such as
    /// the slot a dedicated connection or transaction is pinned to.
    pub fn inherit(&mut self, slot: Slot) {
        self.current = slot;
    }

    pub fn observe(&mut self, key: &[u8]) {
        self.current = self.current.merge(key_slot(key));
    }

    pub fn snapshot(&self) -> Slot {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = Slot::UNSET;
    }
}
