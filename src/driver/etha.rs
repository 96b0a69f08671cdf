//! MAC-facing Ethernet agent (ETHA)
//!
//! The Ethernet agent owns the MAC of one TSN port. Besides its mode
//! transitions it carries the MII configuration, the station management
//! interface used to reach the PHY, link verification and the factory MAC
//! address registers.

use embedded_hal::delay::DelayNs;

use crate::driver::agent::{Agent, AgentKind, AgentMode, AgentModeController};
use crate::driver::config::{LinkSpeed, MacPort};
use crate::driver::error::Result;
use crate::hal::bus::{RegisterAccess, RegisterBus};
use crate::hal::mdio::Mdio45;
use crate::internal::constants::{DEFAULT_MAC_ADDRESSES, MAC_ADDR_LEN};
use crate::internal::register::etha::{
    EAVCC, EAVCC_VEM_SC_TAG, MLVC, MLVC_PLV, MPIC, MPIC_LSC_SHIFT, MPIC_PIS_GMII,
    MPIC_PSMCS_DEFAULT, MPIC_PSMCS_MASK, MPIC_PSMCS_SHIFT, MPIC_PSMHT_DEFAULT, MPIC_PSMHT_MASK,
    MPIC_PSMHT_SHIFT, MPSM, MPSM_MFF_C45, MRMAC0, MRMAC1,
};

/// Read the factory MAC address of the agent at `etha_base`
///
/// `MRMAC0` holds bytes 0-1 in its low half, `MRMAC1` bytes 2-5.
pub fn read_mac_address<R: RegisterAccess, D: DelayNs>(
    bus: &mut RegisterBus<R, D>,
    etha_base: usize,
) -> [u8; MAC_ADDR_LEN] {
    let mrmac0 = bus.read(etha_base + MRMAC0).to_be_bytes();
    let mrmac1 = bus.read(etha_base + MRMAC1).to_be_bytes();
    [mrmac0[2], mrmac0[3], mrmac1[0], mrmac1[1], mrmac1[2], mrmac1[3]]
}

/// Ethernet agent of one MAC port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAgent {
    agent: Agent,
    mac_port: MacPort,
    speed: LinkSpeed,
    mac_address: [u8; MAC_ADDR_LEN],
}

impl MacAgent {
    /// Describe the Ethernet agent of `mac_port` at `base`
    pub const fn new(mac_port: MacPort, base: usize) -> Self {
        Self {
            agent: Agent::new(AgentKind::Etha, base, mac_port.port()),
            mac_port,
            speed: LinkSpeed::Gbps1,
            mac_address: [0; MAC_ADDR_LEN],
        }
    }

    /// Mode-tracked agent
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Which MAC port this is
    pub const fn mac_port(&self) -> MacPort {
        self.mac_port
    }

    /// Register block base address
    pub const fn base(&self) -> usize {
        self.agent.base()
    }

    /// Configured link speed
    pub const fn speed(&self) -> LinkSpeed {
        self.speed
    }

    /// Set the link speed used by the next [`MacAgent::hw_init`]
    pub fn set_speed(&mut self, speed: LinkSpeed) {
        self.speed = speed;
    }

    /// MAC address in use
    pub const fn mac_address(&self) -> &[u8; MAC_ADDR_LEN] {
        &self.mac_address
    }

    /// Record `addr` as the MAC address
    pub fn set_mac_address(&mut self, addr: [u8; MAC_ADDR_LEN]) {
        self.mac_address = addr;
    }

    /// Fall back to a default MAC address if none was programmed
    ///
    /// Only an all-zero address is replaced: by `fallback` when given,
    /// otherwise by the built-in address for this port. Returns whether the
    /// address changed.
    pub fn assign_default_mac(&mut self, fallback: Option<[u8; MAC_ADDR_LEN]>) -> bool {
        if self.mac_address.iter().any(|b| *b != 0) {
            return false;
        }
        self.mac_address = match fallback {
            Some(addr) => addr,
            None => DEFAULT_MAC_ADDRESSES[self.mac_port.index()],
        };
        true
    }

    /// MII configuration value for the current speed
    pub const fn mpic_value(&self) -> u32 {
        MPIC_PIS_GMII | (self.speed.mpic_code() << MPIC_LSC_SHIFT)
    }

    /// Static configuration, ending in OPERATION
    ///
    /// DISABLE, CONFIG, VLAN tag mode, MII mode and speed, station
    /// management timing and clause-45 frames, then OPERATION.
    pub fn hw_init<R: RegisterAccess, D: DelayNs>(
        &mut self,
        bus: &mut RegisterBus<R, D>,
        modes: &AgentModeController,
    ) -> Result<()> {
        let base = self.agent.base();

        modes.enter_config(bus, &mut self.agent)?;

        bus.write(base + EAVCC, EAVCC_VEM_SC_TAG);
        bus.write(base + MPIC, self.mpic_value());
        bus.modify(
            base + MPIC,
            MPIC_PSMCS_MASK | MPIC_PSMHT_MASK,
            (MPIC_PSMCS_DEFAULT << MPIC_PSMCS_SHIFT) | (MPIC_PSMHT_DEFAULT << MPIC_PSMHT_SHIFT),
        );
        bus.set_bits(base + MPSM, MPSM_MFF_C45);

        modes.change_mode(bus, &mut self.agent, AgentMode::Operation)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "MAC port {} operational at {} Mbps",
            self.agent.port(),
            self.speed.mbps()
        );

        Ok(())
    }

    /// Request link verification and wait for it to finish
    pub fn verify_link<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
    ) -> Result<()> {
        let addr = self.agent.base() + MLVC;
        bus.write(addr, MLVC_PLV);
        bus.wait(addr, MLVC_PLV, 0)?;
        Ok(())
    }

    /// Station management interface of this agent
    pub fn mdio<'a, R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &'a mut RegisterBus<R, D>,
    ) -> Mdio45<'a, R, D> {
        Mdio45::new(bus, self.agent.base())
    }
}
