//! Lane-parallel execution of one slice's worth of segments.
//!
//! The pool is sized to the worker count and held across the whole hash
//! call rather than rebuilt per slice; spawning fresh threads per slice
//! would be just as correct, since the only synchronization requirement is
//! the barrier at the end of each slice.

use crate::block::Matrix;
use crate::error::{Error, Result};

#[cfg(feature = "threaded")]
pub struct Workers {
    worker_count: u32,
    pool: Option<scoped_threadpool::Pool>,
}

#[cfg(feature = "threaded")]
impl Workers {
    pub fn new(worker_count: u32) -> Self {
        match worker_count {
            1 => Workers { worker_count, pool: None },
            n => Workers {
                worker_count,
                pool: Some(scoped_threadpool::Pool::new(n)),
            },
        }
    }

    /// Runs `segment(memory, lane)` for every `lane in 0..lanes`, waiting
    /// for all of them to finish before returning. That barrier is the
    /// entire synchronization contract between lanes.
    ///
    /// Each lane is handed its own aliased `&mut Matrix` obtained from
    /// `memory.alias_mut()` right before it is dispatched and moved into a
    /// `FnOnce`. This is the only sound way to give `p` concurrently
    /// running closures what each one needs to believe is exclusive
    /// access: a single `Fn` closure capturing one shared `&mut Matrix`
    /// cannot be called from multiple threads at once without violating
    /// `&mut`'s aliasing rules, even though the segments it touches never
    /// overlap.
    ///
    /// A panicking worker is treated as a fatal `ThreadFailure` for the
    /// whole hash call: the scope still joins every spawned thread before
    /// `scoped` returns, so no sibling is left dangling.
    pub fn run_slice<F>(&mut self, memory: &mut Matrix, lanes: u32, segment: F) -> Result<()>
    where
        F: Fn(&mut Matrix, u32) + Sync,
    {
        match &mut self.pool {
            None => {
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    for lane in 0..lanes {
                        segment(memory, lane);
                    }
                }))
                .map_err(|_| Error::ThreadFailure)?;
                Ok(())
            }
            Some(pool) => {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    pool.scoped(|scope| {
                        for lane in 0..lanes {
                            // SAFETY: `fill_segment`'s addressing invariant
                            // guarantees this lane's writes never overlap
                            // any sibling's reads or writes within the
                            // slice.
                            let aliased = unsafe { memory.alias_mut() };
                            let segment = &segment;
                            scope.execute(move || segment(aliased, lane));
                        }
                    });
                }));
                result.map_err(|_| Error::ThreadFailure)
            }
        }
    }

    pub fn worker_count(&self) -> u32 {
        self.worker_count
    }
}

#[cfg(not(feature = "threaded"))]
pub struct Workers {
    worker_count: u32,
}

#[cfg(not(feature = "threaded"))]
impl Workers {
    pub fn new(worker_count: u32) -> Self {
        Workers { worker_count }
    }

    pub fn run_slice<F>(&mut self, memory: &mut Matrix, lanes: u32, segment: F) -> Result<()>
    where
        F: Fn(&mut Matrix, u32) + Sync,
    {
        for lane in 0..lanes {
            segment(memory, lane);
        }
        Ok(())
    }

    pub fn worker_count(&self) -> u32 {
        self.worker_count
    }
}
