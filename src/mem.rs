//! Dynamic memory buffers for native table queries
//!
//! A [`DynamicMemory`] region keeps a stable base address for as long as the
//! value lives, which is what a native call that writes through a raw pointer
//! requires. Growing never happens in place: a too-small region is discarded
//! and a fresh one is allocated, then the native call is reissued.

use std::slice;

/// Byte region with a stable base address.
///
/// The backing storage is allocated as `u32` words so the base address is
/// 4-byte aligned, matching the alignment of the record layouts that native
/// calls write into it.
pub struct DynamicMemory {
    words: Vec<u32>,
    len: usize,
}

impl DynamicMemory {
    /// Allocate a zeroed region of at least `bytes` bytes.
    pub fn new(bytes: usize) -> Self {
        Self {
            words: vec![0u32; bytes.div_ceil(4)],
            len: bytes,
        }
    }

    /// Length of the region in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Base address of the region; valid and unchanged for the value's
    /// lifetime.
    pub fn as_ptr(&self) -> *const u8 {
        self.words.as_ptr() as *const u8
    }

    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.words.as_mut_ptr() as *mut u8
    }

    /// View the region as bytes.
    pub fn bytes(&self) -> &[u8] {
        // The words vector always covers at least `len` bytes.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// View the region as mutable bytes.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        let ptr = self.as_mut_ptr();
        unsafe { slice::from_raw_parts_mut(ptr, self.len) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_length() {
        let buf = DynamicMemory::new(100);
        assert_eq!(buf.len(), 100);
        assert_eq!(buf.bytes().len(), 100);
        assert!(!buf.is_empty());

        // Length is preserved even when it is not a multiple of the word size
        let buf = DynamicMemory::new(7);
        assert_eq!(buf.len(), 7);
        assert_eq!(buf.bytes().len(), 7);
    }

    #[test]
    fn test_base_address_aligned_and_stable() {
        let mut buf = DynamicMemory::new(64);
        let base = buf.as_ptr();
        assert!(!base.is_null());
        assert_eq!(base as usize % 4, 0);

        buf.bytes_mut()[0] = 0xAB;
        buf.bytes_mut()[63] = 0xCD;
        assert_eq!(buf.as_ptr(), base);
        assert_eq!(buf.bytes()[0], 0xAB);
        assert_eq!(buf.bytes()[63], 0xCD);
    }

    #[test]
    fn test_zeroed_on_allocation() {
        let buf = DynamicMemory::new(32);
        assert!(buf.bytes().iter().all(|&b| b == 0));
    }
}
