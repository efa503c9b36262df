// Dispatch strategies for the loop nest of a kernel.
//
// A kernel is written once as a function of (row, column); the executor
// decides how the outer row loop and the inner column loop are run.

use std::fmt;

use clap::ValueEnum;
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

use crate::{DataType, KernelError};

#[cfg(any(
    all(
        feature = "simd",
        any(feature = "threads", feature = "threads-simd", feature = "offload")
    ),
    all(feature = "threads", any(feature = "threads-simd", feature = "offload")),
    all(feature = "threads-simd", feature = "offload"),
))]
compile_error!("backend features `simd`, `threads`, `threads-simd` and `offload` are mutually exclusive");

/// Width of the blocks the vectorizing backends walk a row in.
pub const LANES: usize = 8;

/// How the iteration space of a kernel is executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Backend {
    /// Plain nested loops.
    Sequential,
    /// Plain outer loop, inner loop in fixed-width blocks the compiler can vectorize.
    Simd,
    /// Outer loop split into one contiguous block of rows per worker.
    Threads,
    /// `Threads` with a blocked inner loop.
    ThreadsSimd,
    /// Every row and every cell is an independent task.
    Offload,
}

impl Backend {
    pub const ALL: [Backend; 5] = [
        Backend::Sequential,
        Backend::Simd,
        Backend::Threads,
        Backend::ThreadsSimd,
        Backend::Offload,
    ];

    /// The backend picked by the crate features at build time.
    pub const fn compiled() -> Self {
        if cfg!(feature = "simd") {
            Backend::Simd
        } else if cfg!(feature = "threads") {
            Backend::Threads
        } else if cfg!(feature = "threads-simd") {
            Backend::ThreadsSimd
        } else if cfg!(feature = "offload") {
            Backend::Offload
        } else {
            Backend::Sequential
        }
    }

    /// Whether this backend needs a worker pool.
    pub fn is_threaded(self) -> bool {
        matches!(
            self,
            Backend::Threads | Backend::ThreadsSimd | Backend::Offload
        )
    }

    fn is_blocked(self) -> bool {
        matches!(self, Backend::Simd | Backend::ThreadsSimd)
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::compiled()
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Sequential => "sequential",
            Backend::Simd => "simd",
            Backend::Threads => "threads",
            Backend::ThreadsSimd => "threads-simd",
            Backend::Offload => "offload",
        };
        f.write_str(name)
    }
}

/// Runs kernel loops with one backend. Threaded backends own a rayon pool
/// that lives as long as the executor; each call to [`Executor::rows`] is one
/// fork-join region that has fully completed when the call returns.
pub struct Executor {
    backend: Backend,
    pool: Option<ThreadPool>,
}

impl Executor {
    pub fn sequential() -> Self {
        Self {
            backend: Backend::Sequential,
            pool: None,
        }
    }

    pub fn new(backend: Backend, num_threads: usize) -> Result<Self, KernelError> {
        let pool = if backend.is_threaded() {
            let pool = ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .thread_name(|i| format!("kernel-worker-{i}"))
                .build()?;
            log::debug!(
                "started {} workers for the {backend} backend",
                pool.current_num_threads()
            );
            Some(pool)
        } else {
            None
        };

        Ok(Self { backend, pool })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn num_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or(1, ThreadPool::current_num_threads)
    }

    /// Calls `row_fn(index, row)` for every `row_len`-sized row of `out`,
    /// where `index` counts from `first_row`. The last row may be shorter.
    ///
    /// Rows are disjoint, so every output element is written by exactly one
    /// task no matter how the rows are distributed.
    pub fn rows<F>(&self, out: &mut [DataType], row_len: usize, first_row: usize, row_fn: F)
    where
        F: Fn(usize, &mut [DataType]) + Sync,
    {
        if out.is_empty() || row_len == 0 {
            return;
        }

        match (self.backend, &self.pool) {
            (Backend::Threads | Backend::ThreadsSimd, Some(pool)) => {
                // static schedule: each worker gets one contiguous block of rows
                let num_rows = out.len().div_ceil(row_len);
                let block_rows = num_rows.div_ceil(pool.current_num_threads());

                pool.install(|| {
                    out.par_chunks_mut(block_rows * row_len)
                        .enumerate()
                        .for_each(|(block, chunk)| {
                            let block_first = first_row + block * block_rows;
                            for (r, row) in chunk.chunks_mut(row_len).enumerate() {
                                row_fn(block_first + r, row);
                            }
                        })
                });
            }
            (Backend::Offload, Some(pool)) => pool.install(|| {
                out.par_chunks_mut(row_len)
                    .enumerate()
                    .for_each(|(r, row)| row_fn(first_row + r, row))
            }),
            _ => {
                for (r, row) in out.chunks_mut(row_len).enumerate() {
                    row_fn(first_row + r, row);
                }
            }
        }
    }

    /// Fills `row[j]` with `cell_fn(first_col + j)` for every `j`.
    ///
    /// Every backend evaluates `cell_fn` exactly once per cell, so the values
    /// written do not depend on the backend.
    pub fn columns<F>(&self, row: &mut [DataType], first_col: usize, cell_fn: F)
    where
        F: Fn(usize) -> DataType + Sync,
    {
        if self.backend.is_blocked() {
            let mut blocks = row.chunks_exact_mut(LANES);
            let mut col = first_col;

            for block in blocks.by_ref() {
                let lanes: [DataType; LANES] = std::array::from_fn(|l| cell_fn(col + l));
                block.copy_from_slice(&lanes);
                col += LANES;
            }

            for (t, cell) in blocks.into_remainder().iter_mut().enumerate() {
                *cell = cell_fn(col + t);
            }
        } else if self.backend == Backend::Offload {
            row.par_iter_mut()
                .enumerate()
                .with_min_len(LANES)
                .for_each(|(j, cell)| *cell = cell_fn(first_col + j));
        } else {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = cell_fn(first_col + j);
            }
        }
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("backend", &self.backend)
            .field("num_threads", &self.num_threads())
            .finish()
    }
}
