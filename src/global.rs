//! The system-wide PLIC instance, installed once at boot.
//!
//! The free functions forward to the installed driver. Before [`init`] they
//! do nothing and [`claim_irq`] reports no interrupt.

use axerrno::AxResult;
use log::warn;
use spin::Once;

use crate::config::PlicConfig;
use crate::driver::PlicDriver;
use crate::mmio::MmioRegisters;

static PLIC: Once<PlicDriver<MmioRegisters>> = Once::new();

/// Installs the driver for the PLIC behind `regs` and runs its boot sequence.
///
/// Only the first successful call takes effect.
pub fn init(regs: MmioRegisters, config: PlicConfig) -> AxResult {
    let base = regs.base();
    let driver = PlicDriver::new(regs, config)?;
    let mut installed = false;
    let driver = PLIC.call_once(|| {
        installed = true;
        driver
    });
    if installed {
        driver.init();
    } else {
        warn!(
            "PLIC already initialized at {:#x}, ignoring init at {base:#x}",
            driver.plic().registers().base()
        );
    }
    Ok(())
}

pub fn driver() -> Option<&'static PlicDriver<MmioRegisters>> {
    PLIC.get()
}

pub fn enable_irq(irqno: usize, prio: u32) {
    if let Some(plic) = driver() {
        plic.enable_irq(irqno, prio);
    }
}

pub fn disable_irq(irqno: usize) {
    if let Some(plic) = driver() {
        plic.disable_irq(irqno);
    }
}

pub fn claim_irq() -> usize {
    driver().map_or(0, |plic| plic.claim_irq())
}

pub fn close_irq(irqno: usize) {
    if let Some(plic) = driver() {
        plic.close_irq(irqno);
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;
    use crate::consts::*;
    use crate::test_logger;

    #[test]
    fn installs_once_and_forwards() {
        assert!(driver().is_none());
        assert_eq!(claim_irq(), 0);
        enable_irq(3, 5);

        // Plain memory stands in for the device: registers simply hold what is written.
        let window: &'static mut [u32] =
            Box::leak(vec![0u32; PLIC_WINDOW_SIZE / 4].into_boxed_slice());
        let base = window.as_mut_ptr() as usize;
        let word = |offset: usize| unsafe { ((base + offset) as *const u32).read_volatile() };

        assert!(init(
            unsafe { MmioRegisters::new(base) },
            PlicConfig::new().with_priority_range(0, 7)
        )
        .is_err());
        assert!(driver().is_none());

        init(unsafe { MmioRegisters::new(base) }, PlicConfig::new()).unwrap();
        assert_eq!(word(PLIC_ENABLE_OFFSET), !1);
        assert_eq!(word(PLIC_ENABLE_OFFSET + 4 * (PLIC_NUM_WORDS - 1)), u32::MAX);

        enable_irq(3, 5);
        assert_eq!(word(PLIC_PRIORITY_OFFSET + 4 * 3), 5);
        disable_irq(3);
        assert_eq!(word(PLIC_PRIORITY_OFFSET + 4 * 3), 0);

        let claim = PLIC_CONTEXT_CTRL_OFFSET + PLIC_CONTEXT_CLAIM_COMPLETE_OFFSET;
        assert_eq!(claim_irq(), 0);
        close_irq(3);
        assert_eq!(word(claim), 3);

        // A second install keeps the first driver and names the ignored window.
        test_logger::init();
        let mut other = [0u32; 4];
        let other_base = other.as_mut_ptr() as usize;
        init(unsafe { MmioRegisters::new(other_base) }, PlicConfig::new()).unwrap();
        assert_eq!(driver().map(|plic| plic.plic().registers().base()), Some(base));
        assert_eq!(other, [0; 4]);

        let warnings: Vec<_> = test_logger::take()
            .into_iter()
            .filter(|r| r.level == Level::Warn)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0]
            .message
            .ends_with(&format!("ignoring init at {other_base:#x}")));
        assert!(warnings[0].message.contains(&format!("at {base:#x},")));
    }
}
