//! SGMII PHY bring-up over clause-45 MDIO
//!
//! The PHY on the MAC port must talk SGMII to the switch. After a reset it
//! may come up in another host mode; if so the mode is forced and the SERDES
//! is re-initialized with a start/poll handshake.

use crate::driver::error::{IoError, Result};
use crate::hal::mdio::Mdio45Bus;
use crate::internal::constants::{POLL_INTERVAL_MS, SERDES_TIMEOUT_MS};
use crate::phy::regs::{
    HOST_MODE, HOST_MODE_MASK, HOST_MODE_RESET, HOST_MODE_SGMII, MMD_PMA_PMD, SERDES_INIT,
    SERDES_INIT_ENABLE, SERDES_INIT_START,
};

/// What the bring-up sequence had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyBringup {
    /// PHY came out of reset in SGMII mode
    AlreadySgmii,
    /// SGMII mode was forced and the SERDES re-initialized
    ForcedSgmii,
}

/// Clause-45 PHY that is brought up into SGMII host mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SgmiiPhy {
    addr: u8,
    serdes_timeout_ms: u32,
}

impl SgmiiPhy {
    /// Create a PHY handle at MDIO address `addr`
    pub const fn new(addr: u8) -> Self {
        Self {
            addr,
            serdes_timeout_ms: SERDES_TIMEOUT_MS,
        }
    }

    /// Set the SERDES handshake timeout in milliseconds
    #[must_use]
    pub const fn with_serdes_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.serdes_timeout_ms = timeout_ms;
        self
    }

    /// MDIO address
    pub const fn addr(&self) -> u8 {
        self.addr
    }

    /// Reset the PHY and make sure it runs in SGMII host mode
    ///
    /// Any MDIO error aborts the sequence. If the SERDES start bit does not
    /// clear within the configured timeout, returns
    /// [`IoError::SerdesTimeout`].
    pub fn bring_up<M: Mdio45Bus>(&self, mdio: &mut M) -> Result<PhyBringup> {
        let mode = mdio.read(self.addr, MMD_PMA_PMD, HOST_MODE)? | HOST_MODE_RESET;
        mdio.write(self.addr, MMD_PMA_PMD, HOST_MODE, mode)?;
        mdio.write(self.addr, MMD_PMA_PMD, HOST_MODE, mode)?;

        let mode = mdio.read(self.addr, MMD_PMA_PMD, HOST_MODE)?;
        if mode & HOST_MODE_MASK == HOST_MODE_SGMII {
            #[cfg(feature = "defmt")]
            defmt::debug!("PHY {} already in SGMII mode", self.addr);
            return Ok(PhyBringup::AlreadySgmii);
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "PHY {} host mode {=u16:#x}, forcing SGMII",
            self.addr,
            mode & HOST_MODE_MASK
        );

        let forced = (mode & !HOST_MODE_MASK) | HOST_MODE_RESET | HOST_MODE_SGMII;
        mdio.write(self.addr, MMD_PMA_PMD, HOST_MODE, forced)?;

        let serdes = mdio.read(self.addr, MMD_PMA_PMD, SERDES_INIT)?
            | SERDES_INIT_START
            | SERDES_INIT_ENABLE;
        mdio.write(self.addr, MMD_PMA_PMD, SERDES_INIT, serdes)?;

        let serdes = self.wait_serdes(mdio)?;
        mdio.write(
            self.addr,
            MMD_PMA_PMD,
            SERDES_INIT,
            serdes & !SERDES_INIT_ENABLE,
        )?;

        Ok(PhyBringup::ForcedSgmii)
    }

    /// Poll until the SERDES start bit clears; returns the last value read
    fn wait_serdes<M: Mdio45Bus>(&self, mdio: &mut M) -> Result<u16> {
        let mut attempts = 0;
        loop {
            let value = mdio.read(self.addr, MMD_PMA_PMD, SERDES_INIT)?;
            if value & SERDES_INIT_START == 0 {
                return Ok(value);
            }
            attempts += 1;
            if attempts >= self.serdes_timeout_ms {
                #[cfg(feature = "defmt")]
                defmt::warn!("PHY {} SERDES handshake timed out", self.addr);
                return Err(IoError::SerdesTimeout.into());
            }
            mdio.wait_ms(POLL_INTERVAL_MS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::error::Error;
    use crate::testing::Clause45Phy;

    const PHY: u8 = 0;

    #[test]
    fn sgmii_after_reset_skips_serdes() {
        let mut mdio = Clause45Phy::new();
        mdio.set(PHY, MMD_PMA_PMD, HOST_MODE, 0x0010 | HOST_MODE_SGMII);

        let outcome = SgmiiPhy::new(PHY).bring_up(&mut mdio).unwrap();
        assert_eq!(outcome, PhyBringup::AlreadySgmii);
        assert_eq!(
            mdio.writes(),
            &[
                (PHY, MMD_PMA_PMD, HOST_MODE, 0x8014),
                (PHY, MMD_PMA_PMD, HOST_MODE, 0x8014),
            ]
        );
        assert!(mdio.reads().iter().all(|(_, _, reg)| *reg != SERDES_INIT));
    }

    #[test]
    fn other_mode_is_forced_to_sgmii() {
        let mut mdio = Clause45Phy::new();
        mdio.set(PHY, MMD_PMA_PMD, HOST_MODE, 0x0011);
        mdio.set(PHY, MMD_PMA_PMD, SERDES_INIT, 0x0001);

        let outcome = SgmiiPhy::new(PHY).bring_up(&mut mdio).unwrap();
        assert_eq!(outcome, PhyBringup::ForcedSgmii);

        let writes = mdio.writes();
        assert_eq!(writes[2], (PHY, MMD_PMA_PMD, HOST_MODE, 0x8014));
        assert_eq!(writes[3], (PHY, MMD_PMA_PMD, SERDES_INIT, 0xA001));
        assert_eq!(writes[4], (PHY, MMD_PMA_PMD, SERDES_INIT, 0x0001));
        assert_eq!(mdio.get(PHY, MMD_PMA_PMD, HOST_MODE) & HOST_MODE_MASK, HOST_MODE_SGMII);
    }

    #[test]
    fn serdes_poll_waits_between_reads() {
        let mut mdio = Clause45Phy::new();
        mdio.set_serdes_latency(3);

        SgmiiPhy::new(PHY).bring_up(&mut mdio).unwrap();
        let serdes_reads = mdio
            .reads()
            .iter()
            .filter(|(_, _, reg)| *reg == SERDES_INIT)
            .count();
        // One read-modify-write read, three busy polls, one completing poll
        assert_eq!(serdes_reads, 5);
        assert_eq!(mdio.waited_ms(), 3);
    }

    #[test]
    fn stalled_serdes_is_bounded() {
        let mut mdio = Clause45Phy::new();
        mdio.stall_serdes();

        let result = SgmiiPhy::new(PHY)
            .with_serdes_timeout_ms(50)
            .bring_up(&mut mdio);
        assert_eq!(result, Err(Error::Io(IoError::SerdesTimeout)));
        assert_eq!(mdio.waited_ms(), 49);
        // Enable bit is left set when the handshake fails
        assert_eq!(mdio.writes().len(), 4);
    }

    #[test]
    fn uses_configured_phy_address() {
        let mut mdio = Clause45Phy::new();
        mdio.set(7, MMD_PMA_PMD, HOST_MODE, HOST_MODE_SGMII);
        SgmiiPhy::new(7).bring_up(&mut mdio).unwrap();
        assert!(mdio.writes().iter().all(|(phy, ..)| *phy == 7));
    }
}
