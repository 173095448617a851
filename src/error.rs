//! Error taxonomy. Every distinct validation failure is its own variant,
//! built on `thiserror` so the crate can sit behind
//! `std::error::Error`-aware callers.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    #[error("output buffer is shorter than the minimum tag length")]
    OutputTooShort,
    #[error("output buffer is longer than the maximum tag length")]
    OutputTooLong,

    #[error("password is longer than the maximum allowed length")]
    PwdTooLong,
    #[error("password pointer is null but its length is nonzero")]
    PwdPtrMismatch,

    #[error("salt is shorter than the minimum allowed length")]
    SaltTooShort,
    #[error("salt is longer than the maximum allowed length")]
    SaltTooLong,

    #[error("associated data is longer than the maximum allowed length")]
    AdTooLong,

    #[error("secret is longer than the maximum allowed length")]
    SecretTooLong,

    #[error("time cost is below the minimum of 1 pass")]
    TimeTooSmall,
    #[error("time cost exceeds the maximum number of passes")]
    TimeTooLarge,

    #[error("memory cost is below the absolute minimum of 8 blocks")]
    MemoryTooLittle,
    #[error("memory cost exceeds the maximum addressable block count")]
    MemoryTooMuch,

    #[error("degree of parallelism is below the minimum of 1 lane")]
    LanesTooFew,
    #[error("degree of parallelism exceeds the maximum of 2^24 - 1 lanes")]
    LanesTooMany,

    #[error("worker thread count is below the minimum of 1")]
    ThreadsTooFew,
    #[error("worker thread count exceeds the configured lane count")]
    ThreadsTooMany,

    #[error("this operation does not support the configured Argon2 variant")]
    IncorrectType,

    #[error("failed to allocate the working memory buffer")]
    AllocationError,
    #[error("a worker thread failed; the whole hash call is aborted")]
    ThreadFailure,

    #[error("failed to encode the PHC-style hash string")]
    EncodingFailure,
    #[error("failed to decode the PHC-style hash string")]
    DecodingFailure,

    #[error("the computed tag does not match the supplied hash")]
    VerifyMismatch,
}

pub type Result<T> = std::result::Result<T, Error>;
