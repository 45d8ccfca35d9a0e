//! Driver for the RISC-V Platform-Level Interrupt Controller (PLIC).
//!
//! The driver is hardwired to a single context ([`PLIC_CONTEXT`]). All
//! device state lives in the PLIC's registers, which the driver reaches
//! through a [`RegisterIo`] capability: [`MmioRegisters`] on real hardware,
//! [`VPlic`] in tests.
//!
//! Source 0 is reserved. Priority 0 masks a source. A claimed source is not
//! offered again until it has been completed, so every nonzero
//! [`PlicDriver::claim_irq`] must be followed by exactly one
//! [`PlicDriver::close_irq`] with the same id.

#![cfg_attr(not(test), no_std)]

mod config;
mod consts;
mod driver;
pub mod global;
mod ledger;
mod mmio;
mod plic;
mod regmap;
mod utils;
mod vplic;

#[cfg(test)]
mod test_logger;

pub use config::PlicConfig;
pub use consts::*;
pub use driver::PlicDriver;
pub use ledger::ClaimLedger;
pub use mmio::{MmioRegisters, RegisterIo};
pub use plic::Plic;
pub use regmap::{address, RegisterMap};
pub use utils::word_and_bit;
pub use vplic::VPlic;
