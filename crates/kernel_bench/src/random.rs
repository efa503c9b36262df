// Random input generation.

use rand::distributions::{Distribution, Uniform, uniform::SampleUniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Element types with a natural uniform distribution: continuous over
/// `[low, high)` for floating point types, discrete over `[low, high]` for
/// integers.
pub trait UniformElement: SampleUniform + Copy {
    /// # Panics
    ///
    /// If the range is empty.
    fn uniform(low: Self, high: Self) -> Uniform<Self>;
}

macro_rules! impl_uniform_real {
    ($($t:ty),*) => {
        $(impl UniformElement for $t {
            fn uniform(low: Self, high: Self) -> Uniform<Self> {
                Uniform::new(low, high)
            }
        })*
    };
}

macro_rules! impl_uniform_int {
    ($($t:ty),*) => {
        $(impl UniformElement for $t {
            fn uniform(low: Self, high: Self) -> Uniform<Self> {
                Uniform::new_inclusive(low, high)
            }
        })*
    };
}

impl_uniform_real!(f32, f64);
impl_uniform_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// A fresh generator for one run; the same seed always yields the same
/// sequence.
pub fn seeded_rng(seed: i64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed as u64)
}

/// Overwrites `out` with independent draws from `T::uniform(low, high)`.
pub fn fill_uniform<T, R>(out: &mut [T], rng: &mut R, low: T, high: T)
where
    T: UniformElement,
    R: Rng + ?Sized,
{
    let dist = T::uniform(low, high);
    for value in out.iter_mut() {
        *value = dist.sample(rng);
    }
}
