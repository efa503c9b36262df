// Naive dense matrix multiplication.

use crate::{DataType, Executor, KernelError, check_len, grid_len, grid_view};

/// Which product [`matrix_mult`] computes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Product {
    /// `C(i,j) = sum_k A(i,k) * B(k,i)`.
    ///
    /// The column of `B` is chosen by the row of `C`, so every cell of a row
    /// of `C` holds the same value. This is the access pattern the benchmark
    /// has always timed.
    #[default]
    Transposed,
    /// `C(i,j) = sum_k A(i,k) * B(k,j)`.
    Standard,
}

/// Multiplies the row-major `n` x `n` matrices `a` and `b` into `c`.
///
/// The outer loop runs over the rows of `c` and the inner loop over its
/// columns; each cell is a k-ordered sum, so its value does not depend on how
/// the rows and columns are distributed.
pub fn matrix_mult(
    exec: &Executor,
    n: usize,
    a: &[DataType],
    b: &[DataType],
    c: &mut [DataType],
    product: Product,
) -> Result<(), KernelError> {
    let a = grid_view("a", n, a)?;
    let b = grid_view("b", n, b)?;
    check_len("c", grid_len("c", n)?, c.len())?;

    exec.rows(c, n, 0, |i, row| {
        let a_row = a.row(i);

        exec.columns(row, 0, |j| {
            let col = match product {
                Product::Transposed => i,
                Product::Standard => j,
            };

            a_row
                .iter()
                .zip(b.column(col))
                .fold(0.0, |sum, (&x, &y)| sum + x * y)
        });
    });

    Ok(())
}
