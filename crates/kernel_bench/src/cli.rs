// Command line arguments shared by the benchmark binaries.

use std::ffi::OsString;

use clap::{Args, Parser};
use par_kernels::{Backend, Product};

#[derive(Debug, Args)]
pub struct BenchArgs {
    /// Problem size N
    pub size: usize,

    /// Seed for the random input values
    #[arg(allow_negative_numbers = true)]
    pub seed: i64,

    /// How the kernel loops are executed; defaults to the backend chosen at build time
    #[arg(long, value_enum, default_value_t = Backend::compiled())]
    pub backend: Backend,

    /// Worker threads for the threaded backends
    #[arg(long, default_value_t = num_cpus::get())]
    pub threads: usize,

    /// Anything after the seed is accepted and ignored
    #[arg(num_args = 0.., allow_negative_numbers = true, hide = true)]
    pub rest: Vec<OsString>,
}

#[derive(Debug, Parser)]
#[command(
    about = "Times c = a + b on two random vectors of length N",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct VectorAddArgs {
    #[command(flatten)]
    pub bench: BenchArgs,
}

#[derive(Debug, Parser)]
#[command(
    about = "Times a naive product of two random NxN matrices",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct MatrixMultArgs {
    #[command(flatten)]
    pub bench: BenchArgs,

    /// Compute C(i,j) = sum_k A(i,k) B(k,j) instead of the benchmark's
    /// traditional C(i,j) = sum_k A(i,k) B(k,i)
    #[arg(long)]
    pub standard_product: bool,
}

impl MatrixMultArgs {
    pub fn product(&self) -> Product {
        if self.standard_product {
            Product::Standard
        } else {
            Product::Transposed
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    about = "Times two 3x3 smoothing passes over a random NxN grid",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct StencilArgs {
    #[command(flatten)]
    pub bench: BenchArgs,
}

/// Parses the process arguments. Missing or malformed arguments give `None`
/// without printing anything; extra trailing arguments are ignored.
pub fn parse_or_fail<P: Parser>() -> Option<P> {
    match P::try_parse() {
        Ok(args) => Some(args),
        Err(err) => {
            log::debug!("rejected arguments: {err}");
            None
        }
    }
}
