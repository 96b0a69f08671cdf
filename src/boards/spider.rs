//! R-Car S4 Spider board configuration.
//!
//! The Spider board bridges TSN port 0 (TSNA0) to the second gateway agent
//! (GWCA1). Each TSN port is wired to a clause-45 PHY running SGMII whose
//! MDIO address equals the port number.

use crate::driver::config::{ChainConfig, GatewayPort, LinkSpeed, MacPort, SwitchConfig};
use crate::driver::interrupt::CoreInterrupts;
use crate::dma::chain::RingLayout;
use crate::internal::constants::{DEFAULT_MAC_ADDRESSES, ETHA_PORT_COUNT, MAC_ADDR_LEN};
use crate::internal::register::RSWITCH_BASE;
use crate::phy::SgmiiPhy;

/// R-Car S4 Spider board configuration constants and helpers.
pub struct Spider;

impl Spider {
    // =========================================================================
    // Switch
    // =========================================================================

    /// R-Switch register window base address.
    pub const REGISTER_BASE: usize = RSWITCH_BASE;

    /// MAC-facing agent used on the board.
    pub const MAC_PORT: MacPort = MacPort::Tsna0;

    /// Gateway agent used on the board.
    pub const GATEWAY_PORT: GatewayPort = GatewayPort::Gwca1;

    /// Link speed of the gateway and the MAC port.
    pub const SPEED: LinkSpeed = LinkSpeed::Gbps1;

    /// Receive chain: index 0, timestamped records.
    pub const RX_CHAIN: ChainConfig = ChainConfig::new(0, RingLayout::Timestamped);

    /// Transmit chain: index 1, plain records.
    pub const TX_CHAIN: ChainConfig = ChainConfig::new(1, RingLayout::Plain);

    // =========================================================================
    // Interrupts
    // =========================================================================

    /// Core interrupt line numbers.
    pub const INTERRUPTS: CoreInterrupts = CoreInterrupts::R_CAR_S4;

    // =========================================================================
    // MAC Addresses
    // =========================================================================

    /// MAC addresses used when a TSN port has no factory address.
    pub const DEFAULT_MAC_ADDRESSES: [[u8; MAC_ADDR_LEN]; ETHA_PORT_COUNT] = DEFAULT_MAC_ADDRESSES;

    // =========================================================================
    // Board Identification
    // =========================================================================

    /// Board name.
    pub const BOARD_NAME: &'static str = "Spider";

    /// SoC on board.
    pub const SOC: &'static str = "R-Car S4";

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Return the switch configuration for the Spider board.
    #[must_use]
    pub const fn config() -> SwitchConfig {
        SwitchConfig::new()
            .with_register_base(Self::REGISTER_BASE)
            .with_mac_port(Self::MAC_PORT)
            .with_gateway_port(Self::GATEWAY_PORT)
            .with_speed(Self::SPEED)
            .with_rx_chain(Self::RX_CHAIN)
            .with_tx_chain(Self::TX_CHAIN)
            .with_interrupts(Self::INTERRUPTS)
    }

    /// Return the switch configuration with a fallback MAC address.
    ///
    /// # Arguments
    ///
    /// * `mac` - 6-byte MAC address used if the factory address is unset.
    #[must_use]
    pub const fn config_with_mac(mac: [u8; MAC_ADDR_LEN]) -> SwitchConfig {
        Self::config().with_fallback_mac_address(mac)
    }

    /// Construct the PHY handle of the board's MAC port.
    #[must_use]
    pub const fn phy() -> SgmiiPhy {
        SgmiiPhy::new(Self::MAC_PORT.port())
    }
}
