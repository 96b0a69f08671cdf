//! Switch-wide reset and buffer pool initialization
//!
//! Both live in the common agent. The soft reset is a pulse with no
//! completion flag; the buffer pool has a start bit and a ready bit.

use embedded_hal::delay::DelayNs;

use crate::driver::error::Result;
use crate::hal::bus::{RegisterAccess, RegisterBus};
use crate::internal::register::coma::{CABPIRM, CABPIRM_BPIOG, CABPIRM_BPR, RRC, RRC_RR, RRC_RR_CLR};

/// Reset controller for the switch common agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchReset {
    coma_base: usize,
}

impl SwitchReset {
    /// Create a reset controller for the common agent at `coma_base`
    pub const fn new(coma_base: usize) -> Self {
        Self { coma_base }
    }

    /// Pulse the switch soft reset
    ///
    /// Every agent returns to its reset mode; clock gates are unaffected.
    pub fn soft_reset<R: RegisterAccess, D: DelayNs>(&self, bus: &mut RegisterBus<R, D>) {
        #[cfg(feature = "defmt")]
        defmt::debug!("switch soft reset");

        bus.write(self.coma_base + RRC, RRC_RR);
        bus.write(self.coma_base + RRC, RRC_RR_CLR);
    }

    /// Whether the buffer pool reports ready
    pub fn is_buffer_pool_ready<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
    ) -> bool {
        bus.read(self.coma_base + CABPIRM) & CABPIRM_BPR != 0
    }

    /// Initialize the frame buffer pool
    ///
    /// Returns immediately if the pool already reports ready; otherwise
    /// starts initialization and waits for the ready bit.
    pub fn init_buffer_pool<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
    ) -> Result<()> {
        if self.is_buffer_pool_ready(bus) {
            return Ok(());
        }

        bus.write(self.coma_base + CABPIRM, CABPIRM_BPIOG);
        bus.wait(self.coma_base + CABPIRM, CABPIRM_BPR, CABPIRM_BPR)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("buffer pool ready");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::error::{Error, IoError};
    use crate::testing::{MockDelay, MockRegisters};

    const COMA: usize = 0x9000;

    fn bus() -> RegisterBus<MockRegisters, MockDelay> {
        RegisterBus::new(MockRegisters::new(), MockDelay::new()).with_timeout_ms(10)
    }

    #[test]
    fn soft_reset_asserts_then_releases() {
        let mut bus = bus();
        SwitchReset::new(COMA).soft_reset(&mut bus);
        assert_eq!(bus.regs().writes_to(COMA + RRC), [RRC_RR, RRC_RR_CLR]);
    }

    #[test]
    fn buffer_pool_already_ready_is_left_alone() {
        let mut bus = bus();
        bus.regs_mut().set(COMA + CABPIRM, CABPIRM_BPR);
        assert_eq!(SwitchReset::new(COMA).init_buffer_pool(&mut bus), Ok(()));
        assert!(bus.regs().writes_to(COMA + CABPIRM).is_empty());
    }

    #[test]
    fn buffer_pool_waits_for_ready() {
        let mut bus = bus();
        bus.regs_mut()
            .on_write(COMA + CABPIRM, |file, _| file.set(COMA + CABPIRM, CABPIRM_BPR));
        assert_eq!(SwitchReset::new(COMA).init_buffer_pool(&mut bus), Ok(()));
        assert_eq!(bus.regs().writes_to(COMA + CABPIRM), [CABPIRM_BPIOG]);
    }

    #[test]
    fn buffer_pool_timeout_propagates() {
        let mut bus = bus();
        assert_eq!(
            SwitchReset::new(COMA).init_buffer_pool(&mut bus),
            Err(Error::Io(IoError::Timeout))
        );
    }
}
