use ndarray::ShapeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("buffer `{name}` holds {actual} elements, expected {expected}")]
    Length {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("a {n}x{n} grid for `{name}` does not fit in usize")]
    Overflow { name: &'static str, n: usize },

    #[error("buffer `{name}` cannot be viewed as a {n}x{n} grid")]
    Shape {
        name: &'static str,
        n: usize,
        #[source]
        source: ShapeError,
    },

    #[error("failed to build the worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
