//! Register-level PLIC operations.
//!
//! Every operation here is a short sequence of 32-bit register accesses.
//! Misuse (a missing source, a foreign context, a priority below the
//! configured minimum) is a silent no-op: the hardware carries no status
//! codes, so neither does this layer.
//!
//! Only one context exists. The enable read-modify-write sequences are not
//! locked; supporting more harts means guarding each enable word (for
//! example with interrupts disabled or a spinlock) around the sequence.

use axerrno::AxResult;

use crate::config::PlicConfig;
use crate::mmio::RegisterIo;
use crate::regmap::RegisterMap;

pub struct Plic<R: RegisterIo> {
    regs: R,
    map: RegisterMap,
    config: PlicConfig,
}

impl<R: RegisterIo> Plic<R> {
    pub fn new(regs: R, config: PlicConfig) -> AxResult<Self> {
        config.validate()?;
        Ok(Self {
            regs,
            map: RegisterMap::new(config.num_sources),
            config,
        })
    }

    pub fn config(&self) -> &PlicConfig {
        &self.config
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Source 0 is reserved and never armed, enabled or completed.
    #[inline]
    fn is_valid_source(&self, srcno: usize) -> bool {
        srcno != 0 && self.map.source_exists(srcno)
    }

    // --- Source priority ---

    /// Sets the priority of `srcno`.
    ///
    /// Levels above the configured maximum are clamped to it. A non-zero
    /// level below the minimum is rejected. Level 0 masks the source and is
    /// always accepted.
    pub fn set_source_priority(&self, srcno: usize, level: u32) {
        if !self.is_valid_source(srcno) {
            return;
        }
        let level = level.min(self.config.prio_max);
        if level != 0 && level < self.config.prio_min {
            return;
        }
        if let Some(offset) = self.map.priority(srcno) {
            self.regs.write32(offset, level);
        }
    }

    pub fn source_priority(&self, srcno: usize) -> u32 {
        if !self.is_valid_source(srcno) {
            return 0;
        }
        self.map
            .priority(srcno)
            .map_or(0, |offset| self.regs.read32(offset))
    }

    // --- Pending ---

    /// Returns whether the pending bit of `srcno` is set. Never consumes it.
    pub fn source_pending(&self, srcno: usize) -> bool {
        match self.map.pending(srcno) {
            Some((offset, mask)) => self.regs.read32(offset) & mask != 0,
            None => false,
        }
    }

    // --- Context enable ---

    pub fn enable_source_for_context(&self, ctxno: usize, srcno: usize) {
        if !self.is_valid_source(srcno) {
            return;
        }
        if let Some((offset, mask)) = self.map.enable(ctxno, srcno) {
            let word = self.regs.read32(offset);
            self.regs.write32(offset, word | mask);
        }
    }

    pub fn disable_source_for_context(&self, ctxno: usize, srcno: usize) {
        if !self.is_valid_source(srcno) {
            return;
        }
        if let Some((offset, mask)) = self.map.enable(ctxno, srcno) {
            let word = self.regs.read32(offset);
            self.regs.write32(offset, word & !mask);
        }
    }

    pub fn source_enabled_for_context(&self, ctxno: usize, srcno: usize) -> bool {
        if !self.is_valid_source(srcno) {
            return false;
        }
        match self.map.enable(ctxno, srcno) {
            Some((offset, mask)) => self.regs.read32(offset) & mask != 0,
            None => false,
        }
    }

    // --- Context threshold ---

    /// Writes `level` unchanged; the device decides which thresholds it honors.
    pub fn set_context_threshold(&self, ctxno: usize, level: u32) {
        if let Some(offset) = self.map.threshold(ctxno) {
            self.regs.write32(offset, level);
        }
    }

    pub fn context_threshold(&self, ctxno: usize) -> u32 {
        self.map
            .threshold(ctxno)
            .map_or(0, |offset| self.regs.read32(offset))
    }

    // --- Claim / complete ---

    /// Claims the highest-priority eligible interrupt of `ctxno`, or 0 if none.
    ///
    /// The read hands the source to this context and clears its pending bit.
    /// The caller owns the source until it passes the same id to
    /// [`Plic::complete_context_interrupt`], exactly once.
    pub fn claim_context_interrupt(&self, ctxno: usize) -> usize {
        self.map
            .claim_complete(ctxno)
            .map_or(0, |offset| self.regs.read32(offset) as usize)
    }

    /// Signals that the service of `srcno` on `ctxno` is finished.
    ///
    /// Completing a source that was not claimed, or completing it twice, is
    /// undefined at the device level and is not detected here.
    pub fn complete_context_interrupt(&self, ctxno: usize, srcno: usize) {
        if !self.is_valid_source(srcno) {
            return;
        }
        if let Some(offset) = self.map.claim_complete(ctxno) {
            self.regs.write32(offset, srcno as u32);
        }
    }
}
