//! Times a naive product of two random NxN matrices.
//!
//!  matrix_mult <N> <seed> [--standard-product] [--backend <backend>] [--threads <T>]

use std::process::ExitCode;

use kernel_bench::cli::{MatrixMultArgs, parse_or_fail};
use kernel_bench::harness::{bench_main, run_matrix_mult};

fn main() -> ExitCode {
    env_logger::init();

    let Some(args) = parse_or_fail::<MatrixMultArgs>() else {
        return ExitCode::FAILURE;
    };
    let bench = &args.bench;
    let product = args.product();

    bench_main("matrix_mult", bench, |exec| {
        run_matrix_mult(exec, bench.size, bench.seed, product)
    })
}
