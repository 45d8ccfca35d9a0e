use bitmaps::Bitmap;

use crate::consts::PLIC_NUM_SOURCES;

/// Sources claimed by the driver and not yet completed.
///
/// The device already refuses to re-offer a claimed source; the ledger only
/// lets software notice when it breaks the claim/complete pairing.
#[derive(Debug, Clone)]
pub struct ClaimLedger {
    claimed: Bitmap<PLIC_NUM_SOURCES>,
}

impl ClaimLedger {
    pub fn new() -> Self {
        Self {
            claimed: Bitmap::new(),
        }
    }

    /// Records a claim of `srcno`. Returns `false` if it was already outstanding.
    pub fn record_claim(&mut self, srcno: usize) -> bool {
        if srcno == 0 || srcno >= PLIC_NUM_SOURCES {
            return false;
        }
        !self.claimed.set(srcno, true)
    }

    /// Records a completion of `srcno`. Returns `false` if it was not claimed.
    pub fn record_complete(&mut self, srcno: usize) -> bool {
        if srcno >= PLIC_NUM_SOURCES {
            return false;
        }
        self.claimed.set(srcno, false)
    }

    pub fn is_claimed(&self, srcno: usize) -> bool {
        srcno < PLIC_NUM_SOURCES && self.claimed.get(srcno)
    }

    pub fn outstanding(&self) -> usize {
        self.claimed.len()
    }
}

impl Default for ClaimLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_claims_with_completions() {
        let mut ledger = ClaimLedger::new();
        assert!(ledger.record_claim(3));
        assert!(ledger.record_claim(40));
        assert_eq!(ledger.outstanding(), 2);
        assert!(ledger.is_claimed(3));

        assert!(ledger.record_complete(3));
        assert!(!ledger.is_claimed(3));
        assert_eq!(ledger.outstanding(), 1);
    }

    #[test]
    fn flags_misuse() {
        let mut ledger = ClaimLedger::new();
        assert!(!ledger.record_complete(5));
        assert!(ledger.record_claim(5));
        assert!(!ledger.record_claim(5));
        assert!(ledger.record_complete(5));
        assert!(!ledger.record_complete(5));
        assert!(!ledger.record_claim(0));
        assert!(!ledger.record_claim(PLIC_NUM_SOURCES));
        assert_eq!(ledger.outstanding(), 0);
    }
}
