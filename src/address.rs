//! The index selector `α` and the data-independent address generator used
//! by Argon2i and (for the first half of pass 0) Argon2id.

use crate::algorithm::Algorithm;
use crate::block::Block;
use crate::compress::compress_twice;

/// Number of 64-bit pseudo-random values produced per `G` call during
/// address generation: a single compression gives 128 words to draw from.
pub const ADDRESSES_PER_BLOCK: usize = 128;

/// Resolves the `α` reference index within a lane.
///
/// `same_lane` is `j2 % lanes == current_lane`; callers compute it once
/// and also use it to pick `ref_lane` itself, so it is passed in rather
/// than recomputed here.
#[cfg_attr(rustfmt, rustfmt_skip)]
pub fn index_alpha(
    pass: u32,
    slice: u32,
    lane_length: u32,
    sliceidx: u32,
    slice_length: u32,
    j1: u32,
    same_lane: bool,
) -> u32 {
    // Reference-set size.
    let reference_set_size: u32 = match (pass, slice, same_lane) {
        (0, 0, _) => sliceidx - 1,
        (0, _, false) => slice * slice_length - if sliceidx == 0 { 1 } else { 0 },
        (0, _, true) => slice * slice_length + sliceidx - 1,
        (_, _, false) => lane_length - slice_length - if sliceidx == 0 { 1 } else { 0 },
        (_, _, true) => lane_length - slice_length + sliceidx - 1,
    };

    // Nonuniform mapping favoring recent blocks.
    let (size64, j1_64) = (reference_set_size as u64, j1 as u64);
    let x = (j1_64 * j1_64) >> 32;
    let y = (size64 * x) >> 32;
    let relative_position = (size64 - 1 - y) as u32;

    // Starting offset and final index.
    let start = match (pass, slice) {
        (0, _) => 0,
        (_, 3) => 0,
        _ => slice_length * (slice + 1),
    };
    (start + relative_position) % lane_length
}

/// Streams pseudo-random `(j1, j2)` pairs for one `(pass, lane, slice)`
/// segment using data-independent addressing.
pub struct AddressGenerator {
    input: Block,
    addresses: Block,
    idx: usize,
}

impl AddressGenerator {
    pub fn new(pass: u32, lane: u32, slice: u32, block_count: u32, passes: u32, algorithm: Algorithm) -> Self {
        let mut input = Block::zero();
        input.words_mut()[0] = pass as u64;
        input.words_mut()[1] = lane as u64;
        input.words_mut()[2] = slice as u64;
        input.words_mut()[3] = block_count as u64;
        input.words_mut()[4] = passes as u64;
        input.words_mut()[5] = algorithm.h0_tag() as u64;

        let mut gen = AddressGenerator {
            input,
            addresses: Block::zero(),
            idx: 0,
        };
        gen.refill();
        gen
    }

    fn refill(&mut self) {
        self.input.words_mut()[6] += 1;
        compress_twice(&mut self.addresses, &self.input);
    }

    /// Returns the next pseudo-random 64-bit value, splitting it into
    /// `(j1, j2)` low/high 32-bit halves the way the caller needs them.
    pub fn next_value(&mut self) -> u64 {
        let v = self.addresses.words()[self.idx];
        self.idx += 1;
        if self.idx == ADDRESSES_PER_BLOCK {
            self.idx = 0;
            self.refill();
        }
        v
    }
}
