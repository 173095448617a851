//! The working-memory allocation seam, generalized just enough that a
//! caller embedding this crate in a memory-constrained environment can
//! supply their own backing store instead of the default `Vec`.

use crate::block::Block;
use crate::error::{Error, Result};

/// Produces the zeroed `Vec<Block>` backing a hash call's memory matrix.
pub trait AllocatorHook {
    fn allocate(&self, blocks: usize) -> Result<Vec<Block>>;
}

/// The default allocator: a plain heap `Vec`.
/// `Vec::try_reserve` surfaces an allocation failure as
/// [`Error::AllocationError`] instead of aborting the process, which a
/// password hasher embedded in a server process should not do on
/// attacker-influenced memory-cost input.
pub struct DefaultAllocator;

impl AllocatorHook for DefaultAllocator {
    fn allocate(&self, blocks: usize) -> Result<Vec<Block>> {
        let mut v = Vec::new();
        v.try_reserve_exact(blocks).map_err(|_| Error::AllocationError)?;
        v.resize(blocks, Block::zero());
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allocator_returns_zeroed_blocks() {
        let alloc = DefaultAllocator;
        let blocks = alloc.allocate(4).unwrap();
        assert_eq!(blocks.len(), 4);
        assert!(blocks.iter().all(|b| b.words().iter().all(|&w| w == 0)));
    }
}
