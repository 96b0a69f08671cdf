//! Static forwarding between one MAC port and one gateway chain
//!
//! The forwarding engine is set up as a fixed bidirectional bridge: frames
//! arriving on the MAC port are steered into the gateway's receive chain, and
//! frames sent by the gateway go out of the MAC port. Every other port keeps
//! the default behavior with an empty destination mask. There is no address
//! learning and no flooding.

use embedded_hal::delay::DelayNs;

use crate::driver::config::{GatewayPort, MacPort};
use crate::hal::bus::{RegisterAccess, RegisterBus};
use crate::internal::constants::TOTAL_PORT_COUNT;
use crate::internal::register::fwd::{FWPC0_DEFAULT, FWPC1_DDE, fwpbfc, fwpbfcsdc, fwpc0, fwpc1};

/// One MAC port bridged to one gateway receive chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bridge {
    /// MAC-facing port
    pub mac: MacPort,
    /// Gateway port
    pub gateway: GatewayPort,
    /// Gateway receive chain the MAC port's frames land in
    pub rx_chain: u8,
}

/// Forwarding engine configurator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardingTable {
    fwd_base: usize,
}

impl ForwardingTable {
    /// Create a configurator for the forwarding engine at `fwd_base`
    pub const fn new(fwd_base: usize) -> Self {
        Self { fwd_base }
    }

    /// Reset every port, then program `bridge`
    pub fn configure<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
        bridge: &Bridge,
    ) {
        for port in 0..TOTAL_PORT_COUNT as u8 {
            bus.write(self.fwd_base + fwpc0(port), FWPC0_DEFAULT);
            bus.write(self.fwd_base + fwpbfc(port), 0);
        }

        let mac = bridge.mac.port();
        let gateway = bridge.gateway.port();

        bus.write(
            self.fwd_base + fwpbfcsdc(bridge.gateway.index() as u8, mac),
            u32::from(bridge.rx_chain),
        );
        bus.write(self.fwd_base + fwpbfc(mac), 1 << gateway);

        bus.write(self.fwd_base + fwpc0(gateway), FWPC0_DEFAULT);
        bus.write(self.fwd_base + fwpc1(gateway), FWPC1_DDE);
        bus.write(self.fwd_base + fwpbfc(gateway), 1 << mac);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "bridge port {} <-> port {} (rx chain {})",
            mac,
            gateway,
            bridge.rx_chain
        );
    }
}
