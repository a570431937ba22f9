//! Sector-aligned heap buffers for unbuffered device reads.
//!
//! Reads issued against a device opened with `O_DIRECT` (Linux) or
//! `FILE_FLAG_NO_BUFFERING` (Windows) require the destination memory to be
//! aligned to the sector size; a plain `Vec<u8>` gives no such guarantee.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ops::{Deref, DerefMut};

/// Satisfies both 512-byte and 4K-sector devices.
pub const DEFAULT_ALIGNMENT: usize = 4096;

pub struct AlignedBuffer {
    ptr: *mut u8,
    size: usize,
    layout: Layout,
}

impl AlignedBuffer {
    /// Allocates a zeroed buffer of `size` bytes aligned to `alignment`.
    /// The allocation is rounded up to a multiple of the alignment, but the
    /// buffer's visible length stays `size`.
    pub fn new(size: usize, alignment: usize) -> Self {
        assert!(size > 0, "buffer size must be greater than 0");
        assert!(alignment.is_power_of_two(), "alignment must be a power of 2");

        let padded = (size + alignment - 1) & !(alignment - 1);
        let layout =
            Layout::from_size_align(padded, alignment).expect("invalid layout for aligned buffer");

        let ptr = unsafe { alloc_zeroed(layout) };
        if ptr.is_null() {
            std::alloc::handle_alloc_error(layout);
        }

        Self { ptr, size, layout }
    }

    #[inline]
    pub fn new_default(size: usize) -> Self {
        Self::new(size, DEFAULT_ALIGNMENT)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.ptr, self.size) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.size) }
    }

    #[inline]
    pub fn is_aligned(&self) -> bool {
        (self.ptr as usize) % self.layout.align() == 0
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        unsafe {
            dealloc(self.ptr, self.layout);
        }
    }
}

impl Deref for AlignedBuffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl DerefMut for AlignedBuffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}
