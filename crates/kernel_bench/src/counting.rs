// A lazy half-open range of integers with navigable positions.

use std::fmt;
use std::iter::FusedIterator;

/// Integer types a [`CountingRange`] can count over.
pub trait Counting: Copy + Ord + fmt::Debug {
    const ZERO: Self;

    fn successor(self) -> Self;
    fn predecessor(self) -> Self;
    fn offset(self, by: isize) -> Self;
    /// `self - origin`
    fn distance(self, origin: Self) -> isize;
    /// The value widened so that any difference of two values is exact.
    fn widen(self) -> i128;
    fn advance(self, steps: usize) -> Self;
}

/// Number of values in `low..high`, saturated to `usize`.
fn span<T: Counting>(low: T, high: T) -> usize {
    (high.widen() - low.widen()).clamp(0, usize::MAX as i128) as usize
}

macro_rules! impl_counting {
    ($($t:ty),*) => {
        $(impl Counting for $t {
            const ZERO: Self = 0;

            fn successor(self) -> Self {
                self + 1
            }

            fn predecessor(self) -> Self {
                self - 1
            }

            fn offset(self, by: isize) -> Self {
                (self as i128 + by as i128) as $t
            }

            fn distance(self, origin: Self) -> isize {
                (self as i128 - origin as i128) as isize
            }

            fn widen(self) -> i128 {
                self as i128
            }

            fn advance(self, steps: usize) -> Self {
                (self as i128 + steps as i128) as $t
            }
        })*
    };
}

impl_counting!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// A position inside a [`CountingRange`]; dereferences to the value it
/// stands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Counter<T>(T);

impl<T: Counting> Counter<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn get(self) -> T {
        self.0
    }

    pub fn step_forward(&mut self) {
        self.0 = self.0.successor();
    }

    pub fn step_back(&mut self) {
        self.0 = self.0.predecessor();
    }

    pub fn offset(self, by: isize) -> Self {
        Self(self.0.offset(by))
    }

    /// Number of steps from `origin` to `self`, negative if `origin` is
    /// ahead.
    pub fn distance(self, origin: Self) -> isize {
        self.0.distance(origin.0)
    }
}

/// The integers `low..high`, produced on demand.
///
/// The range is `Copy` and can be iterated any number of times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountingRange<T> {
    low: T,
    high: T,
}

impl<T: Counting> CountingRange<T> {
    /// `0..high`
    pub fn new(high: T) -> Self {
        Self::with_bounds(T::ZERO, high)
    }

    pub fn with_bounds(low: T, high: T) -> Self {
        Self { low, high }
    }

    pub fn begin(&self) -> Counter<T> {
        Counter(self.low)
    }

    pub fn end(&self) -> Counter<T> {
        Counter(self.high)
    }

    /// Number of values in the range; a range whose end lies before its
    /// start is empty.
    pub fn len(&self) -> usize {
        span(self.low, self.high)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, value: T) -> bool {
        self.low <= value && value < self.high
    }

    pub fn iter(&self) -> CountingIter<T> {
        CountingIter {
            front: self.begin(),
            back: self.end().max(self.begin()),
        }
    }
}

impl<T: Counting> IntoIterator for CountingRange<T> {
    type Item = T;
    type IntoIter = CountingIter<T>;

    fn into_iter(self) -> CountingIter<T> {
        self.iter()
    }
}

impl<T: Counting> IntoIterator for &CountingRange<T> {
    type Item = T;
    type IntoIter = CountingIter<T>;

    fn into_iter(self) -> CountingIter<T> {
        self.iter()
    }
}

/// Iterator over a [`CountingRange`], from both ends.
#[derive(Clone, Debug)]
pub struct CountingIter<T> {
    front: Counter<T>,
    back: Counter<T>,
}

impl<T: Counting> Iterator for CountingIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front < self.back {
            let value = self.front.get();
            self.front.step_forward();
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = span(self.front.get(), self.back.get());
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        if n >= self.len() {
            self.front = self.back;
            return None;
        }
        self.front = Counter(self.front.get().advance(n));
        self.next()
    }
}

impl<T: Counting> DoubleEndedIterator for CountingIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front < self.back {
            self.back.step_back();
            Some(self.back.get())
        } else {
            None
        }
    }
}

impl<T: Counting> ExactSizeIterator for CountingIter<T> {}

impl<T: Counting> FusedIterator for CountingIter<T> {}
