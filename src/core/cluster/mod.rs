// src/core/cluster/mod.rs

//! Cluster keyspace routing: the hash slot function and the slot constraint
//! a command accumulates from its keys.

pub mod slot;

// Re-export key types for easier access from other modules.
pub use slot::{NUM_SLOTS, Slot, SlotState, SlotTracker, key_slot};
