
// Shared pieces of the benchmark programs: buffers, random input, timing,
// reporting, and one harness per kernel.

pub mod buffer;
pub mod cli;
pub mod counting;
mod error;
pub mod harness;
pub mod random;
pub mod report;
pub mod stopwatch;

pub use error::BenchError;
