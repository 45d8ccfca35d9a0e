use bitmaps::Bitmap;

use crate::consts::{PLIC_NUM_SOURCES, SOURCES_PER_WORD};

/// Splits a source id into its pending/enable word index and the bit within that word.
#[inline]
pub const fn word_and_bit(srcno: usize) -> (usize, u32) {
    (srcno / SOURCES_PER_WORD, (srcno % SOURCES_PER_WORD) as u32)
}

/// Reads the 32-bit register at `addr`.
///
/// # Safety
///
/// `addr` must be a mapped, 4-byte aligned device register.
#[inline]
pub(crate) unsafe fn perform_mmio_read(addr: usize) -> u32 {
    (addr as *const u32).read_volatile()
}

/// Writes `val` to the 32-bit register at `addr`.
///
/// # Safety
///
/// `addr` must be a mapped, 4-byte aligned device register.
#[inline]
pub(crate) unsafe fn perform_mmio_write(addr: usize, val: u32) {
    (addr as *mut u32).write_volatile(val)
}

/// Packs the 32 bits of `bitmap` starting at `word * 32` into a register value.
pub(crate) fn bitmap_word(bitmap: &Bitmap<PLIC_NUM_SOURCES>, word: usize) -> u32 {
    let bit_index_start = word * SOURCES_PER_WORD;
    let mut val: u32 = 0;
    let mut bit_mask: u32 = 1;
    for i in 0..SOURCES_PER_WORD {
        if bitmap.get(bit_index_start + i) {
            val |= bit_mask;
        }
        bit_mask <<= 1;
    }
    val
}

/// Overwrites the 32 bits of `bitmap` starting at `word * 32` with `val`.
pub(crate) fn set_bitmap_word(bitmap: &mut Bitmap<PLIC_NUM_SOURCES>, word: usize, val: u32) {
    let bit_index_start = word * SOURCES_PER_WORD;
    let mut bit_mask: u32 = 1;
    for i in 0..SOURCES_PER_WORD {
        bitmap.set(bit_index_start + i, (val & bit_mask) != 0);
        bit_mask <<= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_and_bit_splits_on_32() {
        assert_eq!(word_and_bit(0), (0, 0));
        assert_eq!(word_and_bit(31), (0, 31));
        assert_eq!(word_and_bit(32), (1, 0));
        assert_eq!(word_and_bit(1023), (31, 31));
    }

    #[test]
    fn bitmap_word_packs_only_its_word() {
        let mut bitmap = Bitmap::<PLIC_NUM_SOURCES>::new();
        bitmap.set(31, true);
        bitmap.set(32, true);
        bitmap.set(63, true);
        assert_eq!(bitmap_word(&bitmap, 0), 1 << 31);
        assert_eq!(bitmap_word(&bitmap, 1), (1 << 31) | 1);
        assert_eq!(bitmap_word(&bitmap, 2), 0);
    }

    #[test]
    fn set_bitmap_word_replaces_word() {
        let mut bitmap = Bitmap::<PLIC_NUM_SOURCES>::new();
        bitmap.set(40, true);
        bitmap.set(64, true);
        set_bitmap_word(&mut bitmap, 1, 0xA);
        assert!(!bitmap.get(40));
        assert!(bitmap.get(33));
        assert!(bitmap.get(35));
        assert!(bitmap.get(64));
        assert_eq!(bitmap_word(&bitmap, 1), 0xA);
    }
}
