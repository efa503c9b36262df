use par_kernels::KernelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("a buffer of {elements} elements exceeds the maximum allocation size")]
    SizeOverflow { elements: usize },

    #[error("failed to allocate {bytes} bytes")]
    Allocation { bytes: usize },

    #[error(transparent)]
    Kernel(#[from] KernelError),
}
