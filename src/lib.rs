//! Memory-hard password hashing in the Argon2 family (Argon2d/i/id/ds).
//!
//! The core pipeline — pre-hash, memory fill across passes/lanes/slices,
//! finalization — lives in [`driver::hash_into`]. [`Argon2`] is the small
//! public facade most callers want; [`Context`] exposes every input for
//! callers that need an observer or a custom allocator.

pub mod address;
pub mod algorithm;
pub mod allocator;
pub mod block;
pub mod compress;
pub mod context;
mod driver;
pub mod encoding;
pub mod error;
pub mod observer;
pub mod params;
mod prehash;
mod sbox;
mod segment;
pub mod variable_hash;
pub mod version;
mod workers;

pub use algorithm::Algorithm;
pub use context::{Context, Flags};
pub use error::{Error, Result};
pub use params::{Params, ParamsBuilder};
pub use version::Version;

use subtle::ConstantTimeEq;

/// The public facade: an algorithm/version/params triple, plus an optional
/// secret key, bound once and reused across calls.
pub struct Argon2<'key> {
    algorithm: Algorithm,
    version: Version,
    params: Params,
    secret: &'key [u8],
}

impl<'key> Argon2<'key> {
    pub fn new(algorithm: Algorithm, version: Version, params: Params) -> Self {
        Argon2 { algorithm, version, params, secret: &[] }
    }

    pub fn new_with_secret(algorithm: Algorithm, version: Version, params: Params, secret: &'key [u8]) -> Self {
        Argon2 { algorithm, version, params, secret }
    }

    /// Hashes `pwd` under `salt`, writing `out.len()` bytes into `out`.
    pub fn hash_into(&self, pwd: &[u8], salt: &[u8], out: &mut [u8]) -> Result<()> {
        let params = ParamsBuilder::new(self.params.t_cost(), self.params.m_cost(), self.params.p_cost())
            .threads(self.params.threads())
            .output_len(out.len())
            .build()?;
        let mut ctx = Context::new(pwd, salt, params)
            .secret(self.secret)
            .algorithm(self.algorithm)
            .version(self.version)
            .build();
        driver::hash_into(&mut ctx, out)
    }

    /// As [`Argon2::hash_into`], allocating the output buffer.
    pub fn hash(&self, pwd: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.params.output_len()];
        self.hash_into(pwd, salt, &mut out)?;
        Ok(out)
    }
}

/// Runs the full pipeline against an explicit [`Context`], for callers that
/// need an [`observer::Observer`] or a custom [`allocator::AllocatorHook`].
pub fn hash_with_context(ctx: &mut Context, out: &mut [u8]) -> Result<()> {
    driver::hash_into(ctx, out)
}

/// Free-function form of [`Argon2::hash`].
#[allow(clippy::too_many_arguments)]
pub fn hash(
    algorithm: Algorithm,
    version: Version,
    params: Params,
    pwd: &[u8],
    salt: &[u8],
    secret: &[u8],
) -> Result<Vec<u8>> {
    Argon2::new_with_secret(algorithm, version, params, secret).hash(pwd, salt)
}

/// Verifies `pwd` against a `$argon2X$v=..$m=..,t=..,p=..$salt$tag` string
/// produced by [`encoding::encode`], in constant time over the tag length.
pub fn verify(encoded: &str, pwd: &[u8]) -> Result<()> {
    let decoded = encoding::decode(encoded)?;
    let mut computed = vec![0u8; decoded.tag.len()];
    let argon2 = Argon2::new(
        decoded.algorithm,
        decoded.version,
        ParamsBuilder::new(decoded.params.t_cost(), decoded.params.m_cost(), decoded.params.p_cost())
            .output_len(decoded.tag.len())
            .build()?,
    );
    argon2.hash_into(pwd, &decoded.salt, &mut computed)?;

    if computed.ct_eq(&decoded.tag).into() {
        Ok(())
    } else {
        Err(Error::VerifyMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(algorithm: Algorithm, version: Version, t: u32, m: u32, p: u32, pwd: &[u8], salt: &[u8]) -> Vec<u8> {
        let params = ParamsBuilder::new(t, m, p).output_len(32).build().unwrap();
        hash(algorithm, version, params, pwd, salt, &[]).unwrap()
    }

    #[test]
    fn kat_v0x13_argon2i_row1() {
        let out = run(Algorithm::Argon2i, Version::V0x13, 2, 1 << 16, 1, b"password", b"somesalt");
        assert_eq!(hex::encode(out), "c1628832147d9720c5bd1cfd61367078729f6dfb6f8fea9ff98158e0d7816ed0");
    }

    #[test]
    fn round_trip_encode_decode_verify() {
        let params = ParamsBuilder::new(2, 1 << 14, 1).output_len(32).build().unwrap();
        let tag = hash(Algorithm::Argon2id, Version::V0x13, params, b"correct horse", b"saltsalt", &[]).unwrap();
        let encoded = encoding::encode(Algorithm::Argon2id, Version::V0x13, &params, b"saltsalt", &tag);

        verify(&encoded, b"correct horse").unwrap();
        assert_eq!(verify(&encoded, b"wrong horse"), Err(Error::VerifyMismatch));
    }

    #[test]
    fn same_inputs_different_thread_counts_agree() {
        let params_a = ParamsBuilder::new(2, 1 << 14, 2).threads(2).output_len(32).build().unwrap();
        let params_b = ParamsBuilder::new(2, 1 << 14, 2).threads(1).output_len(32).build().unwrap();
        let a = hash(Algorithm::Argon2d, Version::V0x13, params_a, b"password", b"somesalt", &[]).unwrap();
        let b = hash(Algorithm::Argon2d, Version::V0x13, params_b, b"password", b"somesalt", &[]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn memory_too_little_is_rejected_before_hashing() {
        let err = ParamsBuilder::new(2, 1, 1).output_len(32).build().unwrap_err();
        assert_eq!(err, Error::MemoryTooLittle);
    }
}
