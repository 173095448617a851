//! The compression function `G`: a 1024-byte permutation built from
//! BLAKE2b's round function applied row-then-column over the 128-word
//! block, plus the double-application `g_two` used for data-independent
//! addressing.

use crate::block::Block;
use crate::sbox::Sbox;

macro_rules! blake2b_round {
    ($a:expr, $b:expr, $c:expr, $d:expr) => {{
        $a = $a.wrapping_add($b).wrapping_add(lower_mult($a, $b));
        $d = ($d ^ $a).rotate_right(32);
        $c = $c.wrapping_add($d).wrapping_add(lower_mult($c, $d));
        $b = ($b ^ $c).rotate_right(24);
        $a = $a.wrapping_add($b).wrapping_add(lower_mult($a, $b));
        $d = ($d ^ $a).rotate_right(16);
        $c = $c.wrapping_add($d).wrapping_add(lower_mult($c, $d));
        $b = ($b ^ $c).rotate_right(63);
    }};
}

macro_rules! permute {
    ($v0:expr, $v1:expr, $v2:expr, $v3:expr, $v4:expr, $v5:expr, $v6:expr, $v7:expr,
     $v8:expr, $v9:expr, $v10:expr, $v11:expr, $v12:expr, $v13:expr, $v14:expr, $v15:expr) => {
        blake2b_round!($v0, $v4, $v8, $v12);
        blake2b_round!($v1, $v5, $v9, $v13);
        blake2b_round!($v2, $v6, $v10, $v14);
        blake2b_round!($v3, $v7, $v11, $v15);
        blake2b_round!($v0, $v5, $v10, $v15);
        blake2b_round!($v1, $v6, $v11, $v12);
        blake2b_round!($v2, $v7, $v8, $v13);
        blake2b_round!($v3, $v4, $v9, $v14);
    };
}

#[inline(always)]
fn lower_mult(a: u64, b: u64) -> u64 {
    fn lo(x: u64) -> u64 {
        x & 0xffff_ffff
    }
    lo(a).wrapping_mul(lo(b)).wrapping_mul(2)
}

fn permute_row(row: usize, b: &mut Block) {
    let w = b.words_mut();
    permute!(
        w[16 * row], w[16 * row + 1], w[16 * row + 2], w[16 * row + 3],
        w[16 * row + 4], w[16 * row + 5], w[16 * row + 6], w[16 * row + 7],
        w[16 * row + 8], w[16 * row + 9], w[16 * row + 10], w[16 * row + 11],
        w[16 * row + 12], w[16 * row + 13], w[16 * row + 14], w[16 * row + 15]
    );
}

fn permute_col(col: usize, b: &mut Block) {
    let w = b.words_mut();
    permute!(
        w[16 * 0 + col], w[16 * 0 + col + 1], w[16 * 1 + col], w[16 * 1 + col + 1],
        w[16 * 2 + col], w[16 * 2 + col + 1], w[16 * 3 + col], w[16 * 3 + col + 1],
        w[16 * 4 + col], w[16 * 4 + col + 1], w[16 * 5 + col], w[16 * 5 + col + 1],
        w[16 * 6 + col], w[16 * 6 + col + 1], w[16 * 7 + col], w[16 * 7 + col + 1]
    );
}

fn permute_block(b: &mut Block) {
    for row in 0..8 {
        permute_row(row, b);
    }
    for col in (0..16).step_by(2) {
        permute_col(col, b);
    }
}

/// `G(X, Y) = P(X xor Y) xor (X xor Y)`, the plain (non-hardened) form
/// used by Argon2d/i/id. Writes the result into `dest`; `dest` may alias
/// neither `lhs` nor `rhs`.
pub fn compress(dest: &mut Block, lhs: &Block, rhs: &Block) {
    compress_with_sbox(dest, lhs, rhs, None)
}

/// As [`compress`], but additionally perturbs the permutation input using
/// the Argon2ds Sbox, when one is supplied.
pub fn compress_with_sbox(dest: &mut Block, lhs: &Block, rhs: &Block, sbox: Option<&Sbox>) {
    for i in 0..crate::block::BLOCK_WORDS {
        dest.words_mut()[i] = lhs.words()[i] ^ rhs.words()[i];
    }
    let r = *dest;

    let accum = sbox.map(|sbox| sbox.perturb(r.words()[0] ^ r.words()[127]));

    permute_block(dest);

    if let Some(x) = accum {
        dest.words_mut()[0] = dest.words()[0].wrapping_add(x);
        dest.words_mut()[127] = dest.words()[127].wrapping_add(x);
    }

    for i in 0..crate::block::BLOCK_WORDS {
        dest.words_mut()[i] ^= r.words()[i];
    }
}

/// `g_two(Y) = G(0, G(0, Y))`, used by the data-independent address
/// generator. `dest` must not alias `src`.
pub fn compress_twice(dest: &mut Block, src: &Block) {
    let zero = Block::zero();
    let mut mid = Block::zero();
    compress(&mut mid, &zero, src);
    compress(dest, &zero, &mid);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_of_zero_blocks_is_zero() {
        let zero = Block::zero();
        let mut out = Block::zero();
        compress(&mut out, &zero, &zero);
        assert!(out.words().iter().all(|&w| w == 0));
    }

    #[test]
    fn compress_is_deterministic() {
        let mut a = Block::zero();
        a.words_mut()[0] = 0x0123_4567_89ab_cdef;
        let mut b = Block::zero();
        b.words_mut()[5] = 0xdead_beef_f00d_cafe;

        let mut out1 = Block::zero();
        let mut out2 = Block::zero();
        compress(&mut out1, &a, &b);
        compress(&mut out2, &a, &b);
        assert_eq!(out1.words(), out2.words());
    }

    #[test]
    fn compress_twice_differs_from_single_compress() {
        let mut input = Block::zero();
        input.words_mut()[0] = 7;
        let mut once = Block::zero();
        compress(&mut once, &Block::zero(), &input);
        let mut twice = Block::zero();
        compress_twice(&mut twice, &input);
        assert_ne!(once.words(), twice.words());
    }
}
