//! `H'`, the variable-length hash built over BLAKE2b. Any requested output
//! length is produced from a chain of keyed/unkeyed BLAKE2b calls; the
//! BLAKE2b primitive itself is treated as an external collaborator, via
//! the `blake2` crate.

use blake2::digest::{Update, VariableOutput};
use blake2::{Blake2b512, Blake2bVar, Digest};

const FULL_HASH_LEN: usize = 64;

fn len_prefix(len: usize) -> [u8; 4] {
    (len as u32).to_le_bytes()
}

/// `H'(out.len(), input)`, written into `out`.
pub fn h_prime(out: &mut [u8], input: &[u8]) {
    if out.len() <= FULL_HASH_LEN {
        let mut hasher = Blake2bVar::new(out.len()).expect("1..=64 is always a valid digest size");
        hasher.update(&len_prefix(out.len()));
        hasher.update(input);
        hasher
            .finalize_variable(out)
            .expect("output slice length matches the hasher's configured size");
        return;
    }

    let mut v = {
        let mut hasher = Blake2b512::new();
        Digest::update(&mut hasher, len_prefix(out.len()));
        Digest::update(&mut hasher, input);
        hasher.finalize()
    };

    let mut written = 0;
    // Each full-length block after the first contributes only its first
    // 32 bytes to the output, keeping the other 32 bytes as the seed for
    // the next block in the chain.
    while out.len() - written > FULL_HASH_LEN {
        out[written..written + 32].copy_from_slice(&v[..32]);
        written += 32;
        v = Blake2b512::digest(v);
    }

    let remaining = out.len() - written;
    out[written..].copy_from_slice(&v[..remaining]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_output_matches_length() {
        let mut out = [0u8; 32];
        h_prime(&mut out, b"hello");
        assert!(out.iter().any(|&b| b != 0));
    }

    #[test]
    fn long_output_is_deterministic() {
        let mut a = [0u8; 256];
        let mut b = [0u8; 256];
        h_prime(&mut a, b"some input");
        h_prime(&mut b, b"some input");
        assert_eq!(a, b);
    }

    #[test]
    fn different_lengths_do_not_share_a_prefix() {
        // H' mixes the requested length into the hash, so truncating a
        // longer output must not equal a shorter request.
        let mut short = [0u8; 32];
        let mut long = [0u8; 64];
        h_prime(&mut short, b"x");
        h_prime(&mut long, b"x");
        assert_ne!(&long[..32], &short[..]);
    }
}
