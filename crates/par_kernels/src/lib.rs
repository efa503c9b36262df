#[cfg(test)]
mod tests;

// Home of the benchmark kernels and the strategies that dispatch them.

mod backend;
mod error;
mod matrix_mult;
mod stencil;
mod vector_add;

pub use backend::{Backend, Executor, LANES};
pub use error::KernelError;
pub use matrix_mult::{Product, matrix_mult};
pub use stencil::{stencil, stencil_divisor};
pub use vector_add::{VECTOR_TILE, vector_add};

use ndarray::ArrayView2;

/// Element type every kernel computes in.
pub type DataType = f32;

/// Number of elements in an `n` x `n` grid, or an error naming the buffer
/// if that does not fit in memory at all.
pub fn grid_len(name: &'static str, n: usize) -> Result<usize, KernelError> {
    n.checked_mul(n).ok_or(KernelError::Overflow { name, n })
}

fn check_len(name: &'static str, expected: usize, actual: usize) -> Result<(), KernelError> {
    if expected == actual {
        Ok(())
    } else {
        Err(KernelError::Length {
            name,
            expected,
            actual,
        })
    }
}

/// Row-major `n` x `n` view of a flat buffer. The buffer must hold exactly
/// `n * n` elements.
fn grid_view<'a>(
    name: &'static str,
    n: usize,
    data: &'a [DataType],
) -> Result<ArrayView2<'a, DataType>, KernelError> {
    check_len(name, grid_len(name, n)?, data.len())?;
    ArrayView2::from_shape((n, n), data).map_err(|source| KernelError::Shape { name, n, source })
}
