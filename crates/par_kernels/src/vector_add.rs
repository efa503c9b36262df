// Elementwise vector addition.

use crate::{DataType, Executor, KernelError, check_len};

/// Length of the tiles the vector is cut into for dispatch.
pub const VECTOR_TILE: usize = 4096;

/// `c[i] = a[i] + b[i]` for every `i`.
///
/// The vector is dispatched as consecutive tiles of [`VECTOR_TILE`] elements;
/// tiling only changes which task writes an element, never its value.
pub fn vector_add(
    exec: &Executor,
    a: &[DataType],
    b: &[DataType],
    c: &mut [DataType],
) -> Result<(), KernelError> {
    check_len("b", a.len(), b.len())?;
    check_len("c", a.len(), c.len())?;

    exec.rows(c, VECTOR_TILE, 0, |tile, out| {
        exec.columns(out, tile * VECTOR_TILE, |i| a[i] + b[i]);
    });

    Ok(())
}
