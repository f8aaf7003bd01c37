// src/core/commands/builtin.rs

//! Ready-made commands the connection and cluster layers send on their own:
//! health checks, transaction framing, redirects and topology refreshes.

use crate::core::commands::builder::Builder;
use crate::core::commands::completed::Completed;

fn builder() -> Builder {
    Builder::new()
}

pub fn ping() -> Completed {
    builder().ping().build()
}

pub fn multi() -> Completed {
    builder().multi().build()
}

pub fn exec() -> Completed {
    builder().exec().build()
}

pub fn discard() -> Completed {
    builder().discard().build()
}

/// Sent before a command redirected with `-ASK`.
pub fn asking() -> Completed {
    builder().asking().build()
}

/// `CLIENT CACHING YES`, sent ahead of an opt-in cached read.
pub fn opt_in() -> Completed {
    builder().client_caching().yes().build()
}

/// `UNSUBSCRIBE` from every channel.
pub fn unsubscribe() -> Completed {
    builder().unsubscribe().build()
}

pub fn punsubscribe() -> Completed {
    builder().punsubscribe().build()
}

pub fn sunsubscribe() -> Completed {
    builder().sunsubscribe().build()
}

pub fn cluster_slots() -> Completed {
    builder().cluster_slots().build()
}

pub fn cluster_shards() -> Completed {
    builder().cluster_shards().build()
}
