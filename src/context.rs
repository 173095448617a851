//! `Context`: the full input bundle to a single hash call.

use crate::algorithm::Algorithm;
use crate::allocator::{AllocatorHook, DefaultAllocator};
use crate::observer::Observer;
use crate::params::Params;
use crate::version::Version;

/// Post-hash cleanup and instrumentation switches. `Context` only
/// borrows `pwd`/`secret`, so `clear_password`/`clear_secret` describe what
/// the *caller's* owning buffer should do once hashing returns — the core
/// has nothing of its own to zero there. `clear_memory` does act on the
/// core's own working buffer (see `driver::hash_into`). `print_internals`
/// is retained for fidelity with the reference flag set but performs no
/// I/O itself — attach an [`Observer`] to `Context` to receive the same
/// information through code instead of stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flags {
    pub clear_password: bool,
    pub clear_secret: bool,
    pub clear_memory: bool,
    pub print_internals: bool,
}

static DEFAULT_ALLOCATOR: DefaultAllocator = DefaultAllocator;

/// Every input to a hash call, borrowed for the duration of the call.
/// `observer` is `None` unless the caller attaches one; `allocator`
/// defaults to the heap-`Vec`-backed [`DefaultAllocator`].
pub struct Context<'a> {
    pub pwd: &'a [u8],
    pub salt: &'a [u8],
    pub secret: &'a [u8],
    pub ad: &'a [u8],
    pub params: Params,
    pub algorithm: Algorithm,
    pub version: Version,
    pub flags: Flags,
    pub observer: Option<&'a mut dyn Observer>,
    pub allocator: &'a dyn AllocatorHook,
}

impl<'a> Context<'a> {
    pub fn new(pwd: &'a [u8], salt: &'a [u8], params: Params) -> ContextBuilder<'a> {
        ContextBuilder {
            pwd,
            salt,
            secret: &[],
            ad: &[],
            params,
            algorithm: Algorithm::default(),
            version: Version::default(),
            flags: Flags::default(),
            observer: None,
            allocator: None,
        }
    }

    pub(crate) fn notify_prehash(&mut self, h0: &[u8]) {
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.on_prehash(h0);
        }
    }

    pub(crate) fn notify_slice_complete(&mut self, pass: u32, slice: u32) {
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.on_slice_complete(pass, slice);
        }
    }

    pub(crate) fn notify_finalize(&mut self, xored_last_block: &crate::block::Block) {
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.on_finalize(xored_last_block);
        }
    }
}

/// Builds a [`Context`].
pub struct ContextBuilder<'a> {
    pwd: &'a [u8],
    salt: &'a [u8],
    secret: &'a [u8],
    ad: &'a [u8],
    params: Params,
    algorithm: Algorithm,
    version: Version,
    flags: Flags,
    observer: Option<&'a mut dyn Observer>,
    allocator: Option<&'a dyn AllocatorHook>,
}

impl<'a> ContextBuilder<'a> {
    pub fn secret(mut self, secret: &'a [u8]) -> Self {
        self.secret = secret;
        self
    }

    pub fn ad(mut self, ad: &'a [u8]) -> Self {
        self.ad = ad;
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    pub fn observer(mut self, observer: &'a mut dyn Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn allocator(mut self, allocator: &'a dyn AllocatorHook) -> Self {
        self.allocator = Some(allocator);
        self
    }

    pub fn build(self) -> Context<'a> {
        Context {
            pwd: self.pwd,
            salt: self.salt,
            secret: self.secret,
            ad: self.ad,
            params: self.params,
            algorithm: self.algorithm,
            version: self.version,
            flags: self.flags,
            observer: self.observer,
            allocator: self.allocator.unwrap_or(&DEFAULT_ALLOCATOR),
        }
    }
}
