//! The 64 KiB lookup table used only by Argon2ds, built from block 0 after
//! the first block of every lane has been written, and used to perturb
//! `G` during that variant's memory fill.

use crate::block::{Block, BLOCK_WORDS};
use crate::compress::compress;

/// Total number of 64-bit words in the table (64 KiB / 8 bytes).
const SBOX_WORDS: usize = 8192;
/// The table is split into two equal halves, one per half of the 64-bit
/// accumulator in [`Sbox::perturb`].
const SBOX_HALF: usize = SBOX_WORDS / 2;
const SBOX_MASK: u64 = (SBOX_HALF - 1) as u64;

/// Number of perturbation rounds run per `G` call.
const PERTURB_ROUNDS: usize = 96;

pub struct Sbox(Box<[u64; SBOX_WORDS]>);

impl Sbox {
    /// Builds the table from `seed`, which must be `B[0,0]` — the first
    /// block of lane 0.
    pub fn generate(seed: &Block) -> Sbox {
        let zero = Block::zero();
        let mut table = Box::new([0u64; SBOX_WORDS]);
        let mut start = *seed;
        let mut out = Block::zero();

        for chunk in table.chunks_exact_mut(BLOCK_WORDS) {
            compress(&mut out, &zero, &start);
            compress(&mut start, &zero, &out);
            chunk.copy_from_slice(start.words());
        }

        Sbox(table)
    }

    /// Runs the 96-round mixing accumulator seeded from `x0` and returns
    /// the final value `x`, to be folded back into `G`'s permutation
    /// input.
    pub fn perturb(&self, x0: u64) -> u64 {
        let mut x = x0;
        for _ in 0..PERTURB_ROUNDS {
            let x1 = x >> 32;
            let x2 = x & 0xffff_ffff;
            let y = self.0[(x1 & SBOX_MASK) as usize];
            let z = self.0[(x2 & SBOX_MASK) as usize + SBOX_HALF];
            x = x1.wrapping_mul(x2);
            x = x.wrapping_add(y);
            x ^= z;
        }
        x
    }
}
