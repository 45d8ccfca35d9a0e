//! A software PLIC: the register window backed by plain memory plus the
//! gateway/arbitration logic real hardware applies behind it.
//!
//! [`VPlic`] is what the driver tests run against; it can stand in for the
//! device anywhere a [`RegisterIo`] is accepted.

use bitmaps::Bitmap;
use log::trace;
use spin::Mutex;

use crate::consts::*;
use crate::mmio::RegisterIo;
use crate::utils::{bitmap_word, set_bitmap_word};

struct VPlicInner {
    priority: [u32; PLIC_NUM_SOURCES],
    /// Interrupts forwarded by the gateway and not yet claimed.
    pending_irqs: Bitmap<PLIC_NUM_SOURCES>,
    enabled_irqs: [Bitmap<PLIC_NUM_SOURCES>; PLIC_NUM_CONTEXTS],
    threshold: [u32; PLIC_NUM_CONTEXTS],
    /// Claimed and not yet completed.
    active_irqs: Bitmap<PLIC_NUM_SOURCES>,
    /// Raised while active; forwarded once the active request completes.
    held_irqs: Bitmap<PLIC_NUM_SOURCES>,
    writes: usize,
}

impl VPlicInner {
    fn new() -> Self {
        Self {
            priority: [0; PLIC_NUM_SOURCES],
            pending_irqs: Bitmap::new(),
            enabled_irqs: core::array::from_fn(|_| Bitmap::new()),
            threshold: [0; PLIC_NUM_CONTEXTS],
            active_irqs: Bitmap::new(),
            held_irqs: Bitmap::new(),
            writes: 0,
        }
    }

    /// Picks the highest-priority claimable source of `context`; lowest id wins ties.
    fn arbitrate(&self, context: usize) -> Option<usize> {
        let threshold = self.threshold[context];
        let enabled = &self.enabled_irqs[context];
        let mut best: Option<(usize, u32)> = None;
        let mut next = self.pending_irqs.first_index();
        while let Some(irq) = next {
            let prio = self.priority[irq];
            if enabled.get(irq)
                && !self.active_irqs.get(irq)
                && prio > threshold
                && best.map_or(true, |(_, best_prio)| prio > best_prio)
            {
                best = Some((irq, prio));
            }
            next = self.pending_irqs.next_index(irq);
        }
        best.map(|(irq, _)| irq)
    }

    fn claim(&mut self, context: usize) -> usize {
        match self.arbitrate(context) {
            Some(irq) => {
                // Clear the pending bit and set the active bit, means the IRQ is being handled.
                self.pending_irqs.set(irq, false);
                self.active_irqs.set(irq, true);
                irq
            }
            None => 0,
        }
    }

    fn complete(&mut self, irq: usize) {
        if irq == 0 || irq >= PLIC_NUM_SOURCES || !self.active_irqs.get(irq) {
            return;
        }
        self.active_irqs.set(irq, false);
        if self.held_irqs.set(irq, false) {
            self.pending_irqs.set(irq, true);
        }
    }
}

/// Decoded position inside the register window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reg {
    Priority(usize),
    Pending(usize),
    Enable(usize, usize),
    Threshold(usize),
    ClaimComplete(usize),
    Reserved,
}

fn decode(offset: usize) -> Reg {
    match offset {
        PLIC_PRIORITY_OFFSET..PLIC_PENDING_OFFSET => {
            let irq = (offset - PLIC_PRIORITY_OFFSET) / 4;
            if irq < PLIC_NUM_SOURCES {
                Reg::Priority(irq)
            } else {
                Reg::Reserved
            }
        }
        PLIC_PENDING_OFFSET..PLIC_ENABLE_OFFSET => {
            let word = (offset - PLIC_PENDING_OFFSET) / 4;
            if word < PLIC_NUM_WORDS {
                Reg::Pending(word)
            } else {
                Reg::Reserved
            }
        }
        PLIC_ENABLE_OFFSET..PLIC_CONTEXT_CTRL_OFFSET => {
            let context = (offset - PLIC_ENABLE_OFFSET) / PLIC_ENABLE_STRIDE;
            let word = ((offset - PLIC_ENABLE_OFFSET) % PLIC_ENABLE_STRIDE) / 4;
            if context < PLIC_NUM_CONTEXTS {
                Reg::Enable(context, word)
            } else {
                Reg::Reserved
            }
        }
        offset if offset >= PLIC_CONTEXT_CTRL_OFFSET => {
            let context = (offset - PLIC_CONTEXT_CTRL_OFFSET) / PLIC_CONTEXT_STRIDE;
            let local = (offset - PLIC_CONTEXT_CTRL_OFFSET) % PLIC_CONTEXT_STRIDE;
            match local {
                _ if context >= PLIC_NUM_CONTEXTS => Reg::Reserved,
                PLIC_CONTEXT_THRESHOLD_OFFSET => Reg::Threshold(context),
                PLIC_CONTEXT_CLAIM_COMPLETE_OFFSET => Reg::ClaimComplete(context),
                _ => Reg::Reserved,
            }
        }
        _ => Reg::Reserved,
    }
}

pub struct VPlic {
    inner: Mutex<VPlicInner>,
}

impl VPlic {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(VPlicInner::new()),
        }
    }

    /// Device side: an interrupt source asserts its line.
    ///
    /// While the source is claimed the gateway holds the request back and
    /// forwards it when the claim completes.
    pub fn raise(&self, irq: usize) {
        if irq == 0 || irq >= PLIC_NUM_SOURCES {
            return;
        }
        let mut inner = self.inner.lock();
        if inner.active_irqs.get(irq) {
            inner.held_irqs.set(irq, true);
        } else {
            inner.pending_irqs.set(irq, true);
        }
    }

    /// Device side: drops an unclaimed request of `irq`.
    pub fn clear(&self, irq: usize) {
        if irq >= PLIC_NUM_SOURCES {
            return;
        }
        let mut inner = self.inner.lock();
        inner.pending_irqs.set(irq, false);
        inner.held_irqs.set(irq, false);
    }

    pub fn priority(&self, irq: usize) -> u32 {
        self.inner.lock().priority.get(irq).copied().unwrap_or(0)
    }

    pub fn is_pending(&self, irq: usize) -> bool {
        irq < PLIC_NUM_SOURCES && self.inner.lock().pending_irqs.get(irq)
    }

    pub fn is_enabled(&self, context: usize, irq: usize) -> bool {
        if context >= PLIC_NUM_CONTEXTS || irq >= PLIC_NUM_SOURCES {
            return false;
        }
        self.inner.lock().enabled_irqs[context].get(irq)
    }

    pub fn enable_word(&self, context: usize, word: usize) -> u32 {
        if context >= PLIC_NUM_CONTEXTS || word >= PLIC_NUM_WORDS {
            return 0;
        }
        bitmap_word(&self.inner.lock().enabled_irqs[context], word)
    }

    pub fn threshold(&self, context: usize) -> u32 {
        self.inner.lock().threshold.get(context).copied().unwrap_or(0)
    }

    /// Whether `irq` has been claimed and not completed.
    pub fn is_claimed(&self, irq: usize) -> bool {
        irq < PLIC_NUM_SOURCES && self.inner.lock().active_irqs.get(irq)
    }

    /// Number of register writes performed by software so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    fn read_reg(&self, offset: usize) -> u32 {
        let reg = decode(offset);
        let mut inner = self.inner.lock();
        let val = match reg {
            Reg::Priority(irq) => inner.priority[irq],
            Reg::Pending(word) => bitmap_word(&inner.pending_irqs, word),
            Reg::Enable(context, word) => bitmap_word(&inner.enabled_irqs[context], word),
            Reg::Threshold(context) => inner.threshold[context],
            Reg::ClaimComplete(context) => inner.claim(context) as u32,
            Reg::Reserved => 0,
        };
        trace!("VPlic read {reg:?} (offset {offset:#x}) -> {val:#x}");
        val
    }

    fn write_reg(&self, offset: usize, val: u32) {
        let reg = decode(offset);
        trace!("VPlic write {reg:?} (offset {offset:#x}) <- {val:#x}");
        let mut inner = self.inner.lock();
        inner.writes += 1;
        match reg {
            // Source 0 does not exist; its priority stays hardwired to 0.
            Reg::Priority(0) => {}
            Reg::Priority(irq) => inner.priority[irq] = val,
            // Pending bits are owned by the gateways.
            Reg::Pending(_) => {}
            Reg::Enable(context, word) => {
                let val = if word == 0 { val & !1 } else { val };
                set_bitmap_word(&mut inner.enabled_irqs[context], word, val);
            }
            Reg::Threshold(context) => inner.threshold[context] = val,
            Reg::ClaimComplete(_) => inner.complete(val as usize),
            Reg::Reserved => {}
        }
    }
}

impl Default for VPlic {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterIo for VPlic {
    fn read32(&self, offset: usize) -> u32 {
        self.read_reg(offset)
    }

    fn write32(&self, offset: usize, value: u32) {
        self.write_reg(offset, value)
    }
}
