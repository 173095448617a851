//! The pipeline driver: validates, derives `H₀`, seeds every lane,
//! dispatches segments across passes/slices with a barrier at every slice,
//! builds the Sbox for Argon2ds, and finalizes into the output tag.

use log::{debug, trace};

use crate::algorithm::Algorithm;
use crate::block::Matrix;
use crate::context::Context;
use crate::error::Result;
use crate::params::SYNC_POINTS;
use crate::prehash::{initial_hash, seed_lanes, validate_inputs};
use crate::sbox::Sbox;
use crate::segment::fill_segment;
use crate::variable_hash::h_prime;
use crate::workers::Workers;

/// Runs the full three-stage pipeline and writes the tag into `out`.
pub fn hash_into(ctx: &mut Context, out: &mut [u8]) -> Result<()> {
    validate_inputs(ctx.pwd, ctx.salt, ctx.secret, ctx.ad)?;
    if out.len() < crate::params::MIN_OUTLEN {
        return Err(crate::error::Error::OutputTooShort);
    }
    if out.len() > crate::params::MAX_OUTLEN {
        return Err(crate::error::Error::OutputTooLong);
    }

    let params = ctx.params;
    let algorithm = ctx.algorithm;
    let version = ctx.version;

    let h0 = initial_hash(algorithm, version, &params, ctx.pwd, ctx.salt, ctx.secret, ctx.ad);
    trace!("computed H0 for {:?}/{:?}, m'={}", algorithm, version, params.block_count());
    ctx.notify_prehash(&h0);

    // `clear_password`/`clear_secret` zero the caller's owned copy once
    // hashing no longer needs it; `Context` only borrows `pwd`/`secret`, so
    // there is nothing here for the core to zero itself.

    let blocks = ctx.allocator.allocate(params.block_count() as usize)?;
    let mut memory = Matrix::from_blocks(blocks, params.p_cost(), params.lane_length());

    seed_lanes(&mut memory, &h0);

    let sbox = if algorithm.uses_sbox() {
        Some(Sbox::generate(memory.block(0, 0)))
    } else {
        None
    };

    let mut workers = Workers::new(ctx.params.threads());
    for pass in 0..params.t_cost() {
        for slice in 0..SYNC_POINTS {
            debug!("pass {pass} slice {slice}: dispatching {} lane(s)", params.p_cost());
            workers.run_slice(&mut memory, params.p_cost(), |mem, lane| {
                fill_segment(mem, pass, lane, slice, algorithm, version, &params, sbox.as_ref());
            })?;
            ctx.notify_slice_complete(pass, slice);
        }
    }

    let xored = memory.xor_last_blocks();
    ctx.notify_finalize(&xored);
    h_prime(out, xored.as_bytes());

    if ctx.flags.clear_memory {
        memory.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::params::Params;

    #[test]
    fn hash_into_is_deterministic() {
        let params = Params::new(2, 16, 1).unwrap();

        let mut out_a = [0u8; 32];
        let mut ctx_a = Context::new(b"password", b"somesalt", params)
            .algorithm(Algorithm::Argon2i)
            .build();
        hash_into(&mut ctx_a, &mut out_a).unwrap();

        let mut out_b = [0u8; 32];
        let mut ctx_b = Context::new(b"password", b"somesalt", params)
            .algorithm(Algorithm::Argon2i)
            .build();
        hash_into(&mut ctx_b, &mut out_b).unwrap();

        assert_eq!(out_a, out_b);
    }

    #[test]
    fn different_passwords_produce_different_tags() {
        let params = Params::new(2, 16, 1).unwrap();

        let mut out_a = [0u8; 32];
        let mut ctx_a = Context::new(b"password", b"somesalt", params)
            .algorithm(Algorithm::Argon2i)
            .build();
        hash_into(&mut ctx_a, &mut out_a).unwrap();

        let mut out_b = [0u8; 32];
        let mut ctx_b = Context::new(b"passw0rd", b"somesalt", params)
            .algorithm(Algorithm::Argon2i)
            .build();
        hash_into(&mut ctx_b, &mut out_b).unwrap();

        assert_ne!(out_a, out_b);
    }

    #[test]
    fn worker_count_does_not_change_the_tag() {
        let params_serial = Params::new(2, 32, 2).unwrap();
        let params_parallel = crate::params::ParamsBuilder::new(2, 32, 2).threads(1).build().unwrap();

        let mut out_serial = [0u8; 32];
        let mut ctx_serial = Context::new(b"password", b"somesalt", params_serial)
            .algorithm(Algorithm::Argon2d)
            .build();
        hash_into(&mut ctx_serial, &mut out_serial).unwrap();

        let mut out_parallel = [0u8; 32];
        let mut ctx_parallel = Context::new(b"password", b"somesalt", params_parallel)
            .algorithm(Algorithm::Argon2d)
            .build();
        hash_into(&mut ctx_parallel, &mut out_parallel).unwrap();

        assert_eq!(out_serial, out_parallel);
    }

    #[test]
    fn argon2ds_runs_end_to_end() {
        let params = Params::new(2, 16, 1).unwrap();
        let mut out = [0u8; 32];
        let mut ctx = Context::new(b"password", b"somesalt", params)
            .algorithm(Algorithm::Argon2ds)
            .build();
        hash_into(&mut ctx, &mut out).unwrap();
        assert!(out.iter().any(|&b| b != 0));
    }
}
