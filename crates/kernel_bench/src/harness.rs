// One harness per kernel: allocate, fill with random values, time a single
// kernel call, summarize the output.

use std::process::ExitCode;

use par_kernels::{DataType, Executor, Product, grid_len, matrix_mult, stencil, vector_add};

use crate::BenchError;
use crate::buffer::AlignedBuffer;
use crate::cli::BenchArgs;
use crate::counting::CountingRange;
use crate::random::{fill_uniform, seeded_rng};
use crate::report::{Outcome, Report, checksum};
use crate::stopwatch::Stopwatch;

/// Bounds of the random input values.
pub const INPUT_LOW: DataType = -1.0;
pub const INPUT_HIGH: DataType = 1.0;

fn allocate(len: usize) -> Result<AlignedBuffer<DataType>, BenchError> {
    log::debug!("allocating {len} elements");
    AlignedBuffer::zeroed(len)
}

/// Times `c = a + b` on random vectors of length `n`, then checks every
/// element of `c` against its definition.
pub fn run_vector_add(exec: &Executor, n: usize, seed: i64) -> Result<Report, BenchError> {
    let mut a = allocate(n)?;
    let mut b = allocate(n)?;
    let mut c = allocate(n)?;

    let mut rng = seeded_rng(seed);
    fill_uniform(&mut a, &mut rng, INPUT_LOW, INPUT_HIGH);
    fill_uniform(&mut b, &mut rng, INPUT_LOW, INPUT_HIGH);

    let mut watch = Stopwatch::started();
    vector_add(exec, &a, &b, &mut c)?;
    watch.stop();

    let valid = CountingRange::new(n)
        .iter()
        .all(|i| c[i] == a[i] + b[i]);

    Ok(Report::new(watch.elapsed_ms(), Outcome::Valid(valid)))
}

/// Times the product of two random `n` x `n` matrices and sums the result.
pub fn run_matrix_mult(
    exec: &Executor,
    n: usize,
    seed: i64,
    product: Product,
) -> Result<Report, BenchError> {
    let len = grid_len("matrix", n)?;
    let mut a = allocate(len)?;
    let mut b = allocate(len)?;
    let mut c = allocate(len)?;

    let mut rng = seeded_rng(seed);
    fill_uniform(&mut a, &mut rng, INPUT_LOW, INPUT_HIGH);
    fill_uniform(&mut b, &mut rng, INPUT_LOW, INPUT_HIGH);

    let mut watch = Stopwatch::started();
    matrix_mult(exec, n, &a, &b, &mut c, product)?;
    watch.stop();

    Ok(Report::new(watch.elapsed_ms(), Outcome::Checksum(checksum(&c))))
}

/// Times two smoothing passes over a random `n` x `n` grid and sums the
/// smoothed grid. The scratch grid starts out zeroed.
pub fn run_stencil(exec: &Executor, n: usize, seed: i64) -> Result<Report, BenchError> {
    let len = grid_len("grid", n)?;
    let mut a = allocate(len)?;
    let mut b = allocate(len)?;

    let mut rng = seeded_rng(seed);
    fill_uniform(&mut a, &mut rng, INPUT_LOW, INPUT_HIGH);

    let mut watch = Stopwatch::started();
    stencil(exec, n, &mut a, &mut b)?;
    watch.stop();

    Ok(Report::new(watch.elapsed_ms(), Outcome::Checksum(checksum(&a))))
}

/// Body shared by the benchmark binaries: builds the executor, runs the
/// benchmark and prints its report.
pub fn bench_main<F>(name: &str, args: &BenchArgs, run: F) -> ExitCode
where
    F: FnOnce(&Executor) -> Result<Report, BenchError>,
{
    log::info!(
        "{name}: n={} seed={} backend={} threads={}",
        args.size,
        args.seed,
        args.backend,
        args.threads
    );

    let result = Executor::new(args.backend, args.threads)
        .map_err(BenchError::from)
        .and_then(|exec| run(&exec));

    match result {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{name}: {err}");
            ExitCode::FAILURE
        }
    }
}
