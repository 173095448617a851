//! Cost parameters and the rounding rule that turns a requested memory
//! size into the actual block count `m'`.

use crate::error::{Error, Result};

/// Number of synchronization slices per lane, per pass.
pub const SYNC_POINTS: u32 = 4;

/// Absolute minimum memory cost, in blocks: two blocks per slice. Below
/// this, rounding up to `8p` cannot be applied — it is a hard error
/// regardless of lane count.
pub const MIN_MEMORY: u32 = 2 * SYNC_POINTS;

pub const MIN_LANES: u32 = 1;
/// `p ∈ [1, 2^24)`.
pub const MAX_LANES: u32 = (1 << 24) - 1;

pub const MIN_TIME: u32 = 1;

/// `m` is stored in a `u32`, so `2^32 - 1` blocks is the representable
/// ceiling.
pub const MAX_MEMORY: u64 = u32::MAX as u64;

/// `τ ∈ [4, 2^32)`.
pub const MIN_OUTLEN: usize = 4;
pub const MAX_OUTLEN: usize = u32::MAX as usize;

pub const MIN_SALT_LEN: usize = 8;
pub const MAX_SALT_LEN: usize = u32::MAX as usize;
pub const MAX_PWD_LEN: usize = u32::MAX as usize;
pub const MAX_AD_LEN: usize = u32::MAX as usize;
pub const MAX_SECRET_LEN: usize = u32::MAX as usize;

/// Cost parameters for a single hash call: time cost `t`, memory cost
/// `m` (in KiB/blocks), and degree of parallelism `p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    t_cost: u32,
    m_cost: u32,
    p_cost: u32,
    /// Worker thread count, `worker_count ≤ p`. Defaults to `p`.
    threads: u32,
    output_len: usize,
}

impl Params {
    pub const DEFAULT_OUTPUT_LEN: usize = 32;

    /// Validates and constructs `Params` with `worker_count = p_cost` and
    /// the default output length. Every invalid field returns its own
    /// distinct [`Error`] variant before any allocation happens.
    pub fn new(t_cost: u32, m_cost: u32, p_cost: u32) -> Result<Params> {
        ParamsBuilder::new(t_cost, m_cost, p_cost).build()
    }

    pub fn t_cost(&self) -> u32 {
        self.t_cost
    }

    pub fn m_cost(&self) -> u32 {
        self.m_cost
    }

    pub fn p_cost(&self) -> u32 {
        self.p_cost
    }

    pub fn threads(&self) -> u32 {
        self.threads
    }

    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// `m'`, the effective block count after rounding:
    /// `m' = floor(max(m, 8p) / 4p) * 4p`.
    pub fn block_count(&self) -> u32 {
        let raised = self.m_cost.max(MIN_MEMORY.max(8 * self.p_cost));
        (raised / (SYNC_POINTS * self.p_cost)) * (SYNC_POINTS * self.p_cost)
    }

    /// `L = m' / p`, the number of blocks per lane.
    pub fn lane_length(&self) -> u32 {
        self.block_count() / self.p_cost
    }

    /// `s = L / 4`, the number of blocks per slice.
    pub fn segment_length(&self) -> u32 {
        self.lane_length() / SYNC_POINTS
    }
}

impl Default for Params {
    fn default() -> Self {
        // from run.c: t=3, m=4096 KiB, p=1
        Params::new(3, 4096, 1).expect("default parameters are always valid")
    }
}

/// Builder for [`Params`], allowing the worker count and output length to
/// be set independently of the cost parameters (`hash_with_context` takes
/// these as distinct inputs).
#[derive(Debug, Clone, Copy)]
pub struct ParamsBuilder {
    t_cost: u32,
    m_cost: u32,
    p_cost: u32,
    threads: Option<u32>,
    output_len: Option<usize>,
}

impl ParamsBuilder {
    pub fn new(t_cost: u32, m_cost: u32, p_cost: u32) -> Self {
        ParamsBuilder {
            t_cost,
            m_cost,
            p_cost,
            threads: None,
            output_len: None,
        }
    }

    pub fn threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn output_len(mut self, len: usize) -> Self {
        self.output_len = Some(len);
        self
    }

    pub fn build(self) -> Result<Params> {
        if self.t_cost < MIN_TIME {
            return Err(Error::TimeTooSmall);
        }
        if self.p_cost < MIN_LANES {
            return Err(Error::LanesTooFew);
        }
        if self.p_cost > MAX_LANES {
            return Err(Error::LanesTooMany);
        }
        if self.m_cost < MIN_MEMORY {
            return Err(Error::MemoryTooLittle);
        }
        if (self.m_cost as u64) > MAX_MEMORY {
            return Err(Error::MemoryTooMuch);
        }

        let threads = self.threads.unwrap_or(self.p_cost);
        if threads < 1 {
            return Err(Error::ThreadsTooFew);
        }
        if threads > self.p_cost {
            return Err(Error::ThreadsTooMany);
        }

        let output_len = self.output_len.unwrap_or(Params::DEFAULT_OUTPUT_LEN);
        if output_len < MIN_OUTLEN {
            return Err(Error::OutputTooShort);
        }
        if output_len > MAX_OUTLEN {
            return Err(Error::OutputTooLong);
        }

        Ok(Params {
            t_cost: self.t_cost,
            m_cost: self.m_cost,
            p_cost: self.p_cost,
            threads,
            output_len,
        })
    }
}
