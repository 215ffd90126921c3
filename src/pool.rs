//! Record pool for recycling tree nodes.
//!
//! Trees with a high insert/remove rate allocate and free one node per
//! operation. A [`Pool`] keeps released records on a free list and hands them
//! back out on the next acquisition, so steady-state churn performs no heap
//! allocation at all.
//!
//! Every record is erased on release. A recycled record therefore never
//! carries a key, value or child pointer from its previous life.

use log::{debug, trace};

use crate::error::{Error, Result};

/// Default cap on the number of idle records kept by a pool.
const DEFAULT_MAX_IDLE: usize = 1 << 16;

/// Reset a record to its blank state before it is reused.
pub trait Erase {
    fn erase(&mut self);
}

/// Construction options for a [`Pool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    initial_len: usize,
    max_idle: usize,
}

impl PoolConfig {
    pub fn new() -> Self {
        Self {
            initial_len: 0,
            max_idle: DEFAULT_MAX_IDLE,
        }
    }

    /// Number of blank records allocated up front.
    pub fn initial_len(mut self, initial_len: usize) -> Self {
        self.initial_len = initial_len;
        self
    }

    /// Maximum number of idle records retained. Records released beyond this
    /// are dropped.
    pub fn max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_idle == 0 {
            return Err(Error::InvalidConfig("max_idle must be at least 1"));
        }
        if self.initial_len > self.max_idle {
            return Err(Error::InvalidConfig("initial_len exceeds max_idle"));
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters describing how a pool has been used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Records created with a fresh heap allocation.
    pub allocated: usize,
    /// Acquisitions served from the free list.
    pub reused: usize,
    /// Records handed back through [`Pool::release`].
    pub released: usize,
    /// Released records freed because the free list was full.
    pub dropped: usize,
}

/// A free list of boxed records.
pub struct Pool<T> {
    free: Vec<Box<T>>,
    max_idle: usize,
    stats: PoolStats,
}

impl<T: Erase + Default> Pool<T> {
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            max_idle: DEFAULT_MAX_IDLE,
            stats: PoolStats::default(),
        }
    }

    pub fn with_config(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        let mut free = Vec::with_capacity(config.initial_len);
        free.resize_with(config.initial_len, Box::<T>::default);
        debug!(
            "created pool: initial_len={}, max_idle={}",
            config.initial_len, config.max_idle
        );
        Ok(Self {
            free,
            max_idle: config.max_idle,
            stats: PoolStats {
                allocated: config.initial_len,
                ..PoolStats::default()
            },
        })
    }

    /// Take a blank record, reusing an idle one when available.
    pub fn acquire(&mut self) -> Box<T> {
        match self.free.pop() {
            Some(record) => {
                self.stats.reused += 1;
                trace!("pool reuse: {} idle left", self.free.len());
                record
            }
            None => {
                self.stats.allocated += 1;
                Box::default()
            }
        }
    }

    /// Erase `record` and make it available to a later [`Pool::acquire`].
    pub fn release(&mut self, mut record: Box<T>) {
        record.erase();
        self.stats.released += 1;
        if self.free.len() < self.max_idle {
            self.free.push(record);
        } else {
            self.stats.dropped += 1;
        }
    }
}

impl<T> Pool<T> {
    /// Number of records currently waiting on the free list.
    #[inline]
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Free every idle record.
    pub fn shrink(&mut self) {
        self.free.clear();
        self.free.shrink_to_fit();
    }

    #[cfg(test)]
    pub(crate) fn idle_records(&self) -> impl Iterator<Item = &T> {
        self.free.iter().map(|record| &**record)
    }
}

impl<T: Erase + Default> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}
