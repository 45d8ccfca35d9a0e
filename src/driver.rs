//! The interface the trap dispatcher uses.
//!
//! Every operation targets [`PLIC_CONTEXT`]. The dispatcher calls
//! [`PlicDriver::claim_irq`] once per external interrupt trap and, after the
//! device is serviced, [`PlicDriver::close_irq`] exactly once with the id it
//! was handed.

use axerrno::AxResult;
use log::{debug, info, trace};
#[cfg(feature = "claim-tracking")]
use log::warn;
#[cfg(feature = "claim-tracking")]
use spin::Mutex;

use crate::config::PlicConfig;
use crate::consts::PLIC_CONTEXT;
#[cfg(feature = "claim-tracking")]
use crate::ledger::ClaimLedger;
use crate::mmio::RegisterIo;
use crate::plic::Plic;

pub struct PlicDriver<R: RegisterIo> {
    plic: Plic<R>,
    #[cfg(feature = "claim-tracking")]
    ledger: Mutex<ClaimLedger>,
}

impl<R: RegisterIo> PlicDriver<R> {
    pub fn new(regs: R, config: PlicConfig) -> AxResult<Self> {
        Ok(Self {
            plic: Plic::new(regs, config)?,
            #[cfg(feature = "claim-tracking")]
            ledger: Mutex::new(ClaimLedger::new()),
        })
    }

    /// The register-level operations behind the facade.
    pub fn plic(&self) -> &Plic<R> {
        &self.plic
    }

    /// Masks every source by priority and wires all of them to the context,
    /// so arming a source later only takes a priority write.
    pub fn init(&self) {
        let num_sources = self.plic.config().num_sources;
        trace!("plic init: {num_sources} sources");
        for srcno in 0..num_sources {
            self.plic.set_source_priority(srcno, 0);
            self.plic.enable_source_for_context(PLIC_CONTEXT, srcno);
        }
        info!("PLIC initialized, context {PLIC_CONTEXT}");
    }

    pub fn enable_irq(&self, irqno: usize, prio: u32) {
        trace!("enable_irq(irqno={irqno},prio={prio})");
        self.plic.set_source_priority(irqno, prio);
    }

    pub fn disable_irq(&self, irqno: usize) {
        if irqno > 0 {
            self.plic.set_source_priority(irqno, 0);
        } else {
            debug!("disable_irq called with irqno = {irqno}");
        }
    }

    /// Returns the id of the claimed source, or 0 if nothing is eligible.
    pub fn claim_irq(&self) -> usize {
        trace!("claim_irq()");
        let irqno = self.plic.claim_context_interrupt(PLIC_CONTEXT);
        #[cfg(feature = "claim-tracking")]
        {
            if irqno != 0 && !self.ledger.lock().record_claim(irqno) {
                warn!("claim_irq: source {irqno} handed out while already claimed");
            }
        }
        irqno
    }

    pub fn close_irq(&self, irqno: usize) {
        trace!("close_irq(irqno={irqno})");
        #[cfg(feature = "claim-tracking")]
        {
            if !self.ledger.lock().record_complete(irqno) {
                warn!("close_irq: source {irqno} was not claimed");
            }
        }
        self.plic.complete_context_interrupt(PLIC_CONTEXT, irqno);
    }

    /// Claims not yet closed.
    #[cfg(feature = "claim-tracking")]
    pub fn outstanding_claims(&self) -> usize {
        self.ledger.lock().outstanding()
    }
}
