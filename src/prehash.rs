//! The pre-hash `H₀` and the seeding of each lane's first two blocks.

use blake2::digest::Update;
use blake2::{Blake2b512, Digest};

use crate::algorithm::Algorithm;
use crate::block::{Block, Matrix};
use crate::error::{Error, Result};
use crate::params::Params;
use crate::variable_hash::h_prime;
use crate::version::Version;

pub const H0_LEN: usize = 64;

fn le32(v: u32) -> [u8; 4] {
    v.to_le_bytes()
}

/// Computes `H₀` over every input field, version-gating the `v` tag for
/// the legacy branch.
#[allow(clippy::too_many_arguments)]
pub fn initial_hash(
    algorithm: Algorithm,
    version: Version,
    params: &Params,
    pwd: &[u8],
    salt: &[u8],
    secret: &[u8],
    ad: &[u8],
) -> [u8; H0_LEN] {
    let mut hasher = Blake2b512::new();
    let mut feed = |bytes: &[u8]| Update::update(&mut hasher, bytes);

    feed(&le32(params.p_cost()));
    feed(&le32(params.output_len() as u32));
    feed(&le32(params.block_count()));
    feed(&le32(params.t_cost()));
    if version.tags_prehash() {
        feed(&le32(version.as_u32()));
    }
    feed(&le32(algorithm.h0_tag()));

    feed(&le32(pwd.len() as u32));
    feed(pwd);
    feed(&le32(salt.len() as u32));
    feed(salt);
    feed(&le32(secret.len() as u32));
    feed(secret);
    feed(&le32(ad.len() as u32));
    feed(ad);

    let digest = hasher.finalize();
    let mut out = [0u8; H0_LEN];
    out.copy_from_slice(&digest[..]);
    out
}

/// Validates every input's length constraints before any allocation.
pub fn validate_inputs(pwd: &[u8], salt: &[u8], secret: &[u8], ad: &[u8]) -> Result<()> {
    use crate::params::{MAX_AD_LEN, MAX_PWD_LEN, MAX_SALT_LEN, MAX_SECRET_LEN, MIN_SALT_LEN};

    if pwd.len() > MAX_PWD_LEN {
        return Err(Error::PwdTooLong);
    }
    if salt.len() < MIN_SALT_LEN {
        return Err(Error::SaltTooShort);
    }
    if salt.len() > MAX_SALT_LEN {
        return Err(Error::SaltTooLong);
    }
    if secret.len() > MAX_SECRET_LEN {
        return Err(Error::SecretTooLong);
    }
    if ad.len() > MAX_AD_LEN {
        return Err(Error::AdTooLong);
    }
    Ok(())
}

/// Writes the seed pair `B[ℓ·L+0]`, `B[ℓ·L+1]` for every lane.
pub fn seed_lanes(memory: &mut Matrix, h0: &[u8; H0_LEN]) {
    let lanes = memory.lanes();
    let mut buf = [0u8; H0_LEN + 8];
    buf[..H0_LEN].copy_from_slice(h0);

    for lane in 0..lanes {
        buf[H0_LEN + 4..].copy_from_slice(&le32(lane));

        buf[H0_LEN..H0_LEN + 4].copy_from_slice(&le32(0));
        let mut block0 = Block::zero();
        h_prime(block0.as_bytes_mut(), &buf);
        *memory.block_mut(lane, 0) = block0;

        buf[H0_LEN..H0_LEN + 4].copy_from_slice(&le32(1));
        let mut block1 = Block::zero();
        h_prime(block1.as_bytes_mut(), &buf);
        *memory.block_mut(lane, 1) = block1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;

    #[test]
    fn initial_hash_is_deterministic() {
        let params = Params::new(2, 16, 1).unwrap();
        let a = initial_hash(Algorithm::Argon2i, Version::V0x13, &params, b"password", b"somesalt", b"", b"");
        let b = initial_hash(Algorithm::Argon2i, Version::V0x13, &params, b"password", b"somesalt", b"", b"");
        assert_eq!(a, b);
    }

    #[test]
    fn legacy_version_omits_version_tag() {
        let params = Params::new(2, 16, 1).unwrap();
        let a = initial_hash(Algorithm::Argon2i, Version::V0x10, &params, b"password", b"somesalt", b"", b"");
        let b = initial_hash(Algorithm::Argon2i, Version::V0x13, &params, b"password", b"somesalt", b"", b"");
        assert_ne!(a, b);
    }

    #[test]
    fn different_algorithm_tag_changes_the_prehash() {
        let params = Params::new(2, 16, 1).unwrap();
        let d = initial_hash(Algorithm::Argon2d, Version::V0x13, &params, b"password", b"somesalt", b"", b"");
        let i = initial_hash(Algorithm::Argon2i, Version::V0x13, &params, b"password", b"somesalt", b"", b"");
        assert_ne!(d, i);
    }

    #[test]
    fn seed_lanes_writes_distinct_blocks_per_lane() {
        let params = Params::new(2, 32, 2).unwrap();
        let mut memory = Matrix::new(2, params.lane_length());
        let h0 = initial_hash(Algorithm::Argon2i, Version::V0x13, &params, b"password", b"somesalt", b"", b"");
        seed_lanes(&mut memory, &h0);
        assert_ne!(memory.block(0, 0).words(), memory.block(1, 0).words());
        assert_ne!(memory.block(0, 0).words(), memory.block(0, 1).words());
    }

    #[test]
    fn salt_too_short_is_rejected() {
        assert_eq!(validate_inputs(b"password", b"short", b"", b""), Err(Error::SaltTooShort));
    }
}
