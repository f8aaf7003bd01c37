// src/core/commands/pool.rs

//! The process-wide recycler for command cells.
//!
//! Cells live in sharded free-lists. A thread always goes to the same shard,
//! so acquire and release usually take an uncontended lock. An empty shard
//! never fails an acquire: a fresh cell is allocated instead.

use crate::config::PoolConfig;
use crate::core::CommandError;
use crate::core::commands::cell::CommandCell;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::{debug, info, trace};

static GLOBAL: OnceCell<CellPool> = OnceCell::new();

/// Hands out shard indices to threads in round-robin order.
static NEXT_SHARD: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static SHARD_INDEX: usize = NEXT_SHARD.fetch_add(1, Ordering::Relaxed);
}

/// Counters describing how well the pool is recycling.
#[derive(Debug, Default)]
pub struct PoolStats {
    /// Acquires served from a free-list.
    hits: AtomicU64,
    /// Acquires that had to allocate.
    misses: AtomicU64,
    /// Cells put back on a free-list.
    returns: AtomicU64,
    /// Cells discarded on release (shard full or buffer oversized).
    drops: AtomicU64,
}

impl PoolStats {
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn returns(&self) -> u64 {
        self.returns.load(Ordering::Relaxed)
    }

    pub fn drops(&self) -> u64 {
        self.drops.load(Ordering::Relaxed)
    }

    /// Share of acquires served without allocating, as a percentage.
    /// A pool that has never been used reports 100.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 {
            100.0
        } else {
            (hits / total) * 100.0
        }
    }
}

/// A sharded pool of [`CommandCell`]s.
pub struct CellPool {
    shards: Box<[Mutex<Vec<Box<CommandCell>>>]>,
    config: PoolConfig,
    stats: PoolStats,
}

impl fmt::Debug for CellPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellPool")
            .field("shards", &self.shards.len())
            .field("idle", &self.idle())
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish()
    }
}

impl CellPool {
    /// Creates a pool. Cells only ever come back to a `'static` pool, so a
    /// standalone pool is usually created with [`CellPool::leak`].
    pub fn new(config: PoolConfig) -> Result<Self, CommandError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: PoolConfig) -> Self {
        let shards = (0..config.shards.max(1))
            .map(|_| Mutex::new(Vec::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            shards,
            config,
            stats: PoolStats::default(),
        }
    }

    /// Creates a pool that lives for the rest of the process.
    pub fn leak(config: PoolConfig) -> Result<&'static Self, CommandError> {
        Ok(Box::leak(Box::new(Self::new(config)?)))
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Number of cells currently waiting on the free-lists.
    pub fn idle(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    fn shard(&self) -> &Mutex<Vec<Box<CommandCell>>> {
        let index = SHARD_INDEX.with(|index| *index) % self.shards.len();
        &self.shards[index]
    }

    /// Returns an empty, unfrozen cell with no flags and no slot.
    pub fn acquire(&'static self) -> PooledCell {
        let recycled = self.shard().lock().pop();
        let cell = match recycled {
            Some(cell) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                cell
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                Box::new(CommandCell::with_capacity(self.config.initial_capacity))
            }
        };
        debug_assert!(cell.is_pristine(), "pooled cell was not reset");
        PooledCell {
            cell: Some(cell),
            pool: self,
        }
    }

    fn release(&self, mut cell: Box<CommandCell>) {
        if cell.args.capacity() > self.config.max_retained_capacity {
            self.stats.drops.fetch_add(1, Ordering::Relaxed);
            trace!(
                capacity = cell.args.capacity(),
                "Discarding oversized command cell"
            );
            return;
        }
        cell.reset();

        let mut shard = self.shard().lock();
        if shard.len() >= self.config.max_cells_per_shard {
            drop(shard);
            self.stats.drops.fetch_add(1, Ordering::Relaxed);
            trace!("Discarding command cell, shard is full");
            return;
        }
        shard.push(cell);
        drop(shard);
        self.stats.returns.fetch_add(1, Ordering::Relaxed);
    }
}

/// A cell on loan from a [`CellPool`]; it goes back when this is dropped.
pub struct PooledCell {
    cell: Option<Box<CommandCell>>,
    pool: &'static CellPool,
}

impl PooledCell {
    pub fn pool(&self) -> &'static CellPool {
        self.pool
    }
}

impl Deref for PooledCell {
    type Target = CommandCell;

    fn deref(&self) -> &CommandCell {
        self.cell
            .as_deref()
            .expect("Invariant violation: pooled cell is present until drop")
    }
}

impl DerefMut for PooledCell {
    fn deref_mut(&mut self) -> &mut CommandCell {
        self.cell
            .as_deref_mut()
            .expect("Invariant violation: pooled cell is present until drop")
    }
}

impl Drop for PooledCell {
    fn drop(&mut self) {
        if let Some(cell) = self.cell.take() {
            self.pool.release(cell);
        }
    }
}

impl fmt::Debug for PooledCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

/// Installs the process-wide pool. Fails if a pool is already installed,
/// including one installed lazily by an earlier command construction.
pub fn init(config: PoolConfig) -> Result<&'static CellPool, CommandError> {
    let pool = CellPool::new(config)?;
    let shards = pool.config.shards;
    let max_cells = pool.config.max_cells_per_shard;
    GLOBAL
        .set(pool)
        .map_err(|_| CommandError::PoolAlreadyInitialized)?;
    info!(shards, max_cells_per_shard = max_cells, "Command cell pool initialized");
    Ok(global())
}

/// The process-wide pool, installed with defaults on first use.
pub fn global() -> &'static CellPool {
    GLOBAL.get_or_init(|| {
        debug!("Installing command cell pool with default configuration");
        CellPool::with_config(PoolConfig::default())
    })
}

/// Takes a cell from the process-wide pool.
pub fn acquire() -> PooledCell {
    global().acquire()
}
