//! Address arithmetic for the PLIC register window.
//!
//! Every method returns an offset relative to the PLIC base, or `None` when
//! the source or context id does not exist on this device.

use crate::consts::*;
use crate::utils::word_and_bit;

/// Absolute address of the register at `offset` for a PLIC mapped at `base`.
#[inline]
pub const fn address(base: usize, offset: usize) -> usize {
    base + offset
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterMap {
    num_sources: usize,
}

impl RegisterMap {
    pub const fn new(num_sources: usize) -> Self {
        Self { num_sources }
    }

    pub const fn num_sources(&self) -> usize {
        self.num_sources
    }

    #[inline]
    pub const fn source_exists(&self, srcno: usize) -> bool {
        srcno < self.num_sources
    }

    #[inline]
    pub const fn context_exists(&self, ctxno: usize) -> bool {
        ctxno < PLIC_NUM_CONTEXTS
    }

    /// Priority register of `srcno`.
    pub const fn priority(&self, srcno: usize) -> Option<usize> {
        if !self.source_exists(srcno) {
            return None;
        }
        Some(PLIC_PRIORITY_OFFSET + 4 * srcno)
    }

    /// Pending word covering `srcno`, with the mask selecting its bit.
    pub const fn pending(&self, srcno: usize) -> Option<(usize, u32)> {
        if !self.source_exists(srcno) {
            return None;
        }
        let (word, bit) = word_and_bit(srcno);
        Some((PLIC_PENDING_OFFSET + 4 * word, 1 << bit))
    }

    /// Enable word of context `ctxno` covering `srcno`, with the mask selecting its bit.
    pub const fn enable(&self, ctxno: usize, srcno: usize) -> Option<(usize, u32)> {
        if !self.context_exists(ctxno) || !self.source_exists(srcno) {
            return None;
        }
        let (word, bit) = word_and_bit(srcno);
        Some((
            PLIC_ENABLE_OFFSET + ctxno * PLIC_ENABLE_STRIDE + 4 * word,
            1 << bit,
        ))
    }

    /// Priority threshold register of `ctxno`.
    pub const fn threshold(&self, ctxno: usize) -> Option<usize> {
        if !self.context_exists(ctxno) {
            return None;
        }
        Some(PLIC_CONTEXT_CTRL_OFFSET + ctxno * PLIC_CONTEXT_STRIDE + PLIC_CONTEXT_THRESHOLD_OFFSET)
    }

    /// Claim/complete register of `ctxno`.
    pub const fn claim_complete(&self, ctxno: usize) -> Option<usize> {
        if !self.context_exists(ctxno) {
            return None;
        }
        Some(
            PLIC_CONTEXT_CTRL_OFFSET
                + ctxno * PLIC_CONTEXT_STRIDE
                + PLIC_CONTEXT_CLAIM_COMPLETE_OFFSET,
        )
    }
}

impl Default for RegisterMap {
    fn default() -> Self {
        Self::new(PLIC_NUM_SOURCES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: usize = PLIC_DEFAULT_BASE;

    #[test]
    fn architectural_addresses() {
        let map = RegisterMap::default();
        assert_eq!(address(BASE, map.priority(3).unwrap()), 0x0C00_000C);
        assert_eq!(map.pending(33), Some((0x1004, 1 << 1)));
        assert_eq!(address(BASE, map.pending(5).unwrap().0), 0x0C00_1000);
        assert_eq!(map.enable(0, 64), Some((0x2008, 1)));
        assert_eq!(address(BASE, map.enable(0, 1023).unwrap().0), 0x0C00_207C);
        assert_eq!(address(BASE, map.threshold(0).unwrap()), 0x0C20_0000);
        assert_eq!(address(BASE, map.claim_complete(0).unwrap()), 0x0C20_0004);
    }

    #[test]
    fn rejects_missing_sources_and_contexts() {
        let map = RegisterMap::new(64);
        assert_eq!(map.priority(64), None);
        assert_eq!(map.pending(100), None);
        assert_eq!(map.enable(0, 64), None);
        assert_eq!(map.enable(1, 3), None);
        assert_eq!(map.threshold(1), None);
        assert_eq!(map.claim_complete(PLIC_NUM_CONTEXTS), None);
        assert!(map.priority(63).is_some());
    }
}
