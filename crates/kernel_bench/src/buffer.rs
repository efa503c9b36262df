// Owned heap buffers aligned for vector loads.

use std::alloc::{self, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::slice;

use crate::BenchError;

/// Alignment of every [`AlignedBuffer`] allocation, one cache line.
pub const BUFFER_ALIGN: usize = 64;

/// Plain numeric types that can live in an [`AlignedBuffer`].
///
/// # Safety
///
/// The all-zero bit pattern must be a valid value of the type, and the type
/// must not need dropping.
pub unsafe trait Element: Copy + Send + Sync + 'static {}

macro_rules! impl_element {
    ($($t:ty),*) => {
        $(unsafe impl Element for $t {})*
    };
}

impl_element!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64
);

/// A fixed-length, zero-initialized, [`BUFFER_ALIGN`]-aligned array of `T`.
///
/// The allocation is released in `Drop` with the same layout it was made
/// with. Empty buffers do not allocate.
pub struct AlignedBuffer<T: Element> {
    ptr: NonNull<T>,
    len: usize,
}

// SAFETY: the buffer uniquely owns its allocation, as a Vec<T> does.
unsafe impl<T: Element> Send for AlignedBuffer<T> {}
unsafe impl<T: Element> Sync for AlignedBuffer<T> {}

impl<T: Element> AlignedBuffer<T> {
    pub fn zeroed(len: usize) -> Result<Self, BenchError> {
        let layout = Self::layout(len)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len,
            });
        }

        // SAFETY: the layout has a non-zero size
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(BenchError::Allocation {
            bytes: layout.size(),
        })?;

        Ok(Self { ptr, len })
    }

    fn layout(len: usize) -> Result<Layout, BenchError> {
        Layout::array::<T>(len)
            .and_then(|layout| layout.align_to(BUFFER_ALIGN))
            .map_err(|_| BenchError::SizeOverflow { elements: len })
    }

    pub fn as_slice(&self) -> &[T] {
        self
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Element> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        if let Ok(layout) = Self::layout(self.len)
            && layout.size() != 0
        {
            // SAFETY: allocated in `zeroed` with this same layout
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) };
        }
    }
}

impl<T: Element> Deref for AlignedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // SAFETY: ptr is valid for len initialized elements, or dangling and
        // aligned when len is 0
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Element> DerefMut for AlignedBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: as in `deref`, and `&mut self` guarantees exclusive access
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Element> fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("align", &BUFFER_ALIGN)
            .finish()
    }
}
