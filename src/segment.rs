//! Fills one `(pass, lane, slice)` segment of the memory matrix.

use crate::address::{index_alpha, AddressGenerator};
use crate::algorithm::Algorithm;
use crate::block::Matrix;
use crate::compress::compress_with_sbox;
use crate::params::Params;
use crate::sbox::Sbox;
use crate::version::Version;

#[allow(clippy::too_many_arguments)]
pub fn fill_segment(
    memory: &mut Matrix,
    pass: u32,
    lane: u32,
    slice: u32,
    algorithm: Algorithm,
    version: Version,
    params: &Params,
    sbox: Option<&Sbox>,
) {
    let lane_length = params.lane_length();
    let slice_length = params.segment_length();
    let lanes = params.p_cost();

    let data_independent = algorithm.data_independent_at(pass, slice);
    let mut address_gen = if data_independent {
        Some(AddressGenerator::new(
            pass,
            lane,
            slice,
            params.block_count(),
            params.t_cost(),
            algorithm,
        ))
    } else {
        None
    };

    let start_idx = if pass == 0 && slice == 0 { 2 } else { 0 };
    let mut curr = lane * lane_length + slice * slice_length + start_idx;
    let mut prev = if curr % lane_length == 0 {
        curr + lane_length - 1
    } else {
        curr - 1
    };

    for idx in start_idx..slice_length {
        if curr % lane_length == 1 {
            prev = curr - 1;
        }

        let pseudo_rand = match &mut address_gen {
            Some(gen) => gen.next_value(),
            None => memory.block(lane, prev % lane_length).words()[0],
        };
        let j1 = (pseudo_rand & 0xffff_ffff) as u32;
        let j2 = (pseudo_rand >> 32) as u32;

        let mut ref_lane = j2 % lanes;
        if pass == 0 && slice == 0 {
            ref_lane = lane;
        }
        let same_lane = ref_lane == lane;

        let ref_index = index_alpha(pass, slice, lane_length, idx, slice_length, j1, same_lane);

        let cur_col = curr % lane_length;
        let prev_col = prev % lane_length;
        let (dest, prev_block, ref_block) =
            memory.get3((lane, cur_col), (lane, prev_col), (ref_lane, ref_index));

        if version.xor_accumulates(pass) {
            let mut computed = crate::block::Block::zero();
            compress_with_sbox(&mut computed, prev_block, ref_block, sbox);
            *dest ^= &computed;
        } else {
            compress_with_sbox(dest, prev_block, ref_block, sbox);
        }

        curr += 1;
        prev += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;

    #[test]
    fn first_segment_of_first_lane_starts_at_index_two() {
        let params = Params::new(1, 8, 1).unwrap();
        let mut memory = Matrix::new(1, params.lane_length());
        // Seed the first two blocks so index 2 has a `prev` to read.
        memory.block_mut(0, 0).words_mut()[0] = 1;
        memory.block_mut(0, 1).words_mut()[0] = 2;

        fill_segment(
            &mut memory,
            0,
            0,
            0,
            Algorithm::Argon2d,
            Version::V0x13,
            &params,
            None,
        );

        // Every block up to the segment length must now be nonzero.
        for col in 2..params.segment_length() {
            assert_ne!(memory.block(0, col).words()[0], 0, "block {col} was not written");
        }
    }

    #[test]
    fn argon2i_and_argon2d_diverge_on_the_same_input() {
        let params = Params::new(1, 8, 1).unwrap();

        let mut d_memory = Matrix::new(1, params.lane_length());
        d_memory.block_mut(0, 0).words_mut()[0] = 1;
        d_memory.block_mut(0, 1).words_mut()[0] = 2;
        fill_segment(&mut d_memory, 0, 0, 0, Algorithm::Argon2d, Version::V0x13, &params, None);

        let mut i_memory = Matrix::new(1, params.lane_length());
        i_memory.block_mut(0, 0).words_mut()[0] = 1;
        i_memory.block_mut(0, 1).words_mut()[0] = 2;
        fill_segment(&mut i_memory, 0, 0, 0, Algorithm::Argon2i, Version::V0x13, &params, None);

        assert_ne!(d_memory.block(0, 2).words(), i_memory.block(0, 2).words());
    }
}
