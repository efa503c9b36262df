// Two-pass 3x3 weighted smoothing.
//
// Each interior cell becomes
//
//   A(i,j) / 4
//     + (A(i+1,j) + A(i-1,j) + A(i,j+1) + A(i,j-1)) / 8
//     + (A(i+1,j+1) + A(i-1,j-1) + A(i-1,j+1) + A(i+1,j-1)) / 16
//
// and the outermost ring of cells is never written.

use ndarray::ArrayView2;

use crate::{DataType, Executor, KernelError, check_len, grid_len, grid_view};

/// Divisor applied to the neighbour at row distance `di` and column
/// distance `dj` from the centre: `1 << (2 + di + dj)`.
pub fn stencil_divisor(di: usize, dj: usize) -> DataType {
    (1u32 << (2 + di + dj)) as DataType
}

fn smooth(src: &ArrayView2<DataType>, i: usize, j: usize) -> DataType {
    let mut res: DataType = 0.0;
    for r in i - 1..=i + 1 {
        for s in j - 1..=j + 1 {
            res += src[[r, s]] / stencil_divisor(r.abs_diff(i), s.abs_diff(j));
        }
    }
    res
}

/// One smoothing pass over the interior of `dst`, reading from `src`.
fn smooth_pass(
    exec: &Executor,
    n: usize,
    src: &[DataType],
    dst: &mut [DataType],
) -> Result<(), KernelError> {
    let src = grid_view("source", n, src)?;
    let interior_rows = &mut dst[n..n * (n - 1)];

    exec.rows(interior_rows, n, 1, |i, row| {
        exec.columns(&mut row[1..n - 1], 1, |j| smooth(&src, i, j));
    });

    Ok(())
}

/// Smooths the interior of `a` twice, going through the scratch grid `b`:
/// the first pass writes `b` from `a`, the second writes `a` from `b`.
///
/// The second pass starts only after the first has finished on every row.
/// The border of `a` is left untouched. Grids smaller than 3x3 have no
/// interior and are returned unchanged.
pub fn stencil(
    exec: &Executor,
    n: usize,
    a: &mut [DataType],
    b: &mut [DataType],
) -> Result<(), KernelError> {
    check_len("a", grid_len("a", n)?, a.len())?;
    check_len("b", grid_len("b", n)?, b.len())?;

    if n < 3 {
        return Ok(());
    }

    smooth_pass(exec, n, a, b)?;
    log::debug!("stencil: first pass complete");
    smooth_pass(exec, n, b, a)?;

    Ok(())
}
