use axerrno::{AxError, AxResult};
use log::warn;

use crate::consts::{PLIC_NUM_SOURCES, PLIC_PRIO_MAX, PLIC_PRIO_MIN};

/// Static description of the PLIC instance the driver talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlicConfig {
    /// Number of source ids, including the reserved source 0.
    pub num_sources: usize,
    /// Lowest non-zero priority accepted by `set_source_priority`.
    pub prio_min: u32,
    /// Priorities above this value are clamped to it.
    pub prio_max: u32,
}

impl PlicConfig {
    pub const fn new() -> Self {
        Self {
            num_sources: PLIC_NUM_SOURCES,
            prio_min: PLIC_PRIO_MIN,
            prio_max: PLIC_PRIO_MAX,
        }
    }

    pub const fn with_num_sources(mut self, num_sources: usize) -> Self {
        self.num_sources = num_sources;
        self
    }

    pub const fn with_priority_range(mut self, prio_min: u32, prio_max: u32) -> Self {
        self.prio_min = prio_min;
        self.prio_max = prio_max;
        self
    }

    /// Checks that the configuration describes a device this driver can drive.
    pub fn validate(&self) -> AxResult {
        if self.num_sources == 0 || self.num_sources > PLIC_NUM_SOURCES {
            warn!(
                "PLIC config: source count {} outside 1..={}",
                self.num_sources, PLIC_NUM_SOURCES
            );
            return Err(AxError::InvalidInput);
        }
        // Priority 0 is reserved for "never interrupt".
        if self.prio_min == 0 || self.prio_min > self.prio_max {
            warn!(
                "PLIC config: bad priority range [{}, {}]",
                self.prio_min, self.prio_max
            );
            return Err(AxError::InvalidInput);
        }
        Ok(())
    }
}

impl Default for PlicConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PlicConfig::default();
        assert_eq!(config.num_sources, 0x400);
        assert_eq!(config.prio_max, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_source_count() {
        assert_eq!(
            PlicConfig::new().with_num_sources(0).validate(),
            Err(AxError::InvalidInput)
        );
        assert_eq!(
            PlicConfig::new().with_num_sources(PLIC_NUM_SOURCES + 1).validate(),
            Err(AxError::InvalidInput)
        );
        assert!(PlicConfig::new().with_num_sources(64).validate().is_ok());
    }

    #[test]
    fn rejects_bad_priority_range() {
        assert_eq!(
            PlicConfig::new().with_priority_range(0, 7).validate(),
            Err(AxError::InvalidInput)
        );
        assert_eq!(
            PlicConfig::new().with_priority_range(5, 4).validate(),
            Err(AxError::InvalidInput)
        );
        assert!(PlicConfig::new().with_priority_range(3, 3).validate().is_ok());
    }
}
