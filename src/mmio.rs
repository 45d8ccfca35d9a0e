use core::ptr::NonNull;

use crate::regmap::address;
use crate::utils::{perform_mmio_read, perform_mmio_write};

/// Word-wide access to the PLIC register window.
///
/// Offsets are relative to the PLIC base. Implementations must not cache,
/// merge or reorder accesses: reading the claim register has side effects.
pub trait RegisterIo {
    fn read32(&self, offset: usize) -> u32;
    fn write32(&self, offset: usize, value: u32);
}

impl<T: RegisterIo + ?Sized> RegisterIo for &T {
    #[inline]
    fn read32(&self, offset: usize) -> u32 {
        (**self).read32(offset)
    }

    #[inline]
    fn write32(&self, offset: usize, value: u32) {
        (**self).write32(offset, value)
    }
}

/// Memory-mapped PLIC registers.
#[derive(Debug)]
pub struct MmioRegisters {
    base: NonNull<u32>,
}

unsafe impl Send for MmioRegisters {}
unsafe impl Sync for MmioRegisters {}

impl MmioRegisters {
    /// Creates an accessor for a PLIC mapped at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the non-null, mapped base address of a PLIC register
    /// window, and no other code may access that window concurrently.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            base: NonNull::new_unchecked(base as *mut u32),
        }
    }

    pub fn base(&self) -> usize {
        self.base.as_ptr() as usize
    }
}

impl RegisterIo for MmioRegisters {
    #[inline]
    fn read32(&self, offset: usize) -> u32 {
        unsafe { perform_mmio_read(address(self.base(), offset)) }
    }

    #[inline]
    fn write32(&self, offset: usize, value: u32) {
        unsafe { perform_mmio_write(address(self.base(), offset), value) }
    }
}
