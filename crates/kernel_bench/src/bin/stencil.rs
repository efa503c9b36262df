//! Times two weighted 3x3 smoothing passes over a random NxN grid.
//!
//!  stencil <N> <seed> [--backend <backend>] [--threads <T>]

use std::process::ExitCode;

use kernel_bench::cli::{StencilArgs, parse_or_fail};
use kernel_bench::harness::{bench_main, run_stencil};

fn main() -> ExitCode {
    env_logger::init();

    let Some(args) = parse_or_fail::<StencilArgs>() else {
        return ExitCode::FAILURE;
    };
    let bench = &args.bench;

    bench_main("stencil", bench, |exec| run_stencil(exec, bench.size, bench.seed))
}
