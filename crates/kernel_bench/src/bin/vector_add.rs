//! Times elementwise addition of two random vectors and validates the sum.
//!
//!  vector_add <N> <seed> [--backend <backend>] [--threads <T>]

use std::process::ExitCode;

use kernel_bench::cli::{VectorAddArgs, parse_or_fail};
use kernel_bench::harness::{bench_main, run_vector_add};

fn main() -> ExitCode {
    env_logger::init();

    let Some(args) = parse_or_fail::<VectorAddArgs>() else {
        return ExitCode::FAILURE;
    };
    let bench = &args.bench;

    bench_main("vector_add", bench, |exec| {
        run_vector_add(exec, bench.size, bench.seed)
    })
}
