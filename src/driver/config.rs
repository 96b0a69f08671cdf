//! Switch configuration types
//!
//! [`SwitchConfig`] selects which MAC port and gateway agent are bridged,
//! where the register window lives, how chains are laid out and how long
//! handshakes may take. Ports are typed so that only existing agents can be
//! named.

use crate::dma::chain::RingLayout;
use crate::driver::error::{ConfigError, ConfigResult};
use crate::driver::interrupt::CoreInterrupts;
use crate::internal::constants::{
    BASE_DESCRIPTOR_COUNT, GWCA_FIRST_PORT, MAC_ADDR_LEN, REGISTER_TIMEOUT_MS, SERDES_TIMEOUT_MS,
};
use crate::internal::register::RSWITCH_BASE;
use crate::internal::register::etha::{
    MDIO_ADDR_MAX, MPIC_LSC_1G, MPIC_LSC_10M, MPIC_LSC_100M,
};

// =============================================================================
// Ports
// =============================================================================

/// MAC-facing Ethernet agent (TSN port)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacPort {
    /// TSNA0 (port 0)
    #[default]
    Tsna0,
    /// TSNA1 (port 1)
    Tsna1,
    /// TSNA2 (port 2)
    Tsna2,
}

impl MacPort {
    /// Switch port number (clock gate bit and forwarding identity)
    pub const fn port(self) -> u8 {
        match self {
            MacPort::Tsna0 => 0,
            MacPort::Tsna1 => 1,
            MacPort::Tsna2 => 2,
        }
    }

    /// Index of the ETHA register block
    pub const fn index(self) -> usize {
        self.port() as usize
    }
}

/// Gateway CPU agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GatewayPort {
    /// GWCA0 (port 3)
    Gwca0,
    /// GWCA1 (port 4)
    #[default]
    Gwca1,
}

impl GatewayPort {
    /// Switch port number (clock gate bit and forwarding identity)
    pub const fn port(self) -> u8 {
        GWCA_FIRST_PORT + self.index() as u8
    }

    /// Index of the GWCA register block
    pub const fn index(self) -> usize {
        match self {
            GatewayPort::Gwca0 => 0,
            GatewayPort::Gwca1 => 1,
        }
    }
}

// =============================================================================
// Link speed
// =============================================================================

/// Link speed of the MAC port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkSpeed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    Mbps100,
    /// 1 Gbps
    #[default]
    Gbps1,
}

impl LinkSpeed {
    /// Speed in Mbps
    pub const fn mbps(self) -> u32 {
        match self {
            LinkSpeed::Mbps10 => 10,
            LinkSpeed::Mbps100 => 100,
            LinkSpeed::Gbps1 => 1000,
        }
    }

    /// `MPIC.LSC` link speed code
    pub const fn mpic_code(self) -> u32 {
        match self {
            LinkSpeed::Mbps10 => MPIC_LSC_10M,
            LinkSpeed::Mbps100 => MPIC_LSC_100M,
            LinkSpeed::Gbps1 => MPIC_LSC_1G,
        }
    }
}

// =============================================================================
// Chains
// =============================================================================

/// Placement and layout of one descriptor chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChainConfig {
    /// Chain index (base descriptor table slot)
    pub index: u8,
    /// Record layout
    pub layout: RingLayout,
}

impl ChainConfig {
    /// Create a chain configuration
    pub const fn new(index: u8, layout: RingLayout) -> Self {
        Self { index, layout }
    }
}

// =============================================================================
// Switch configuration
// =============================================================================

/// Complete switch configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchConfig {
    /// Switch register window base address
    pub register_base: usize,
    /// MAC-facing agent in use
    pub mac_port: MacPort,
    /// Gateway agent in use
    pub gateway_port: GatewayPort,
    /// Gateway link speed, copied to the MAC port
    pub speed: LinkSpeed,
    /// Register poll timeout in milliseconds
    pub register_timeout_ms: u32,
    /// PHY SERDES handshake timeout in milliseconds
    pub serdes_timeout_ms: u32,
    /// PHY MDIO address; the MAC port number when `None`
    pub phy_address: Option<u8>,
    /// MAC address used when the factory registers read back all-zero;
    /// the built-in per-port default when `None`
    pub fallback_mac_address: Option<[u8; MAC_ADDR_LEN]>,
    /// Receive chain
    pub rx_chain: ChainConfig,
    /// Transmit chain
    pub tx_chain: ChainConfig,
    /// Core interrupt line numbers
    pub interrupts: CoreInterrupts,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SwitchConfig {
    /// Create a configuration with R-Car S4 defaults
    ///
    /// TSNA0 bridged to GWCA1 at 1 Gbps, timestamped receive chain 0,
    /// plain transmit chain 1.
    pub const fn new() -> Self {
        Self {
            register_base: RSWITCH_BASE,
            mac_port: MacPort::Tsna0,
            gateway_port: GatewayPort::Gwca1,
            speed: LinkSpeed::Gbps1,
            register_timeout_ms: REGISTER_TIMEOUT_MS,
            serdes_timeout_ms: SERDES_TIMEOUT_MS,
            phy_address: None,
            fallback_mac_address: None,
            rx_chain: ChainConfig::new(0, RingLayout::Timestamped),
            tx_chain: ChainConfig::new(1, RingLayout::Plain),
            interrupts: CoreInterrupts::R_CAR_S4,
        }
    }

    /// Set the register window base address
    #[must_use]
    pub const fn with_register_base(mut self, base: usize) -> Self {
        self.register_base = base;
        self
    }

    /// Set the MAC-facing agent
    #[must_use]
    pub const fn with_mac_port(mut self, port: MacPort) -> Self {
        self.mac_port = port;
        self
    }

    /// Set the gateway agent
    #[must_use]
    pub const fn with_gateway_port(mut self, port: GatewayPort) -> Self {
        self.gateway_port = port;
        self
    }

    /// Set the link speed
    #[must_use]
    pub const fn with_speed(mut self, speed: LinkSpeed) -> Self {
        self.speed = speed;
        self
    }

    /// Set the register poll timeout
    #[must_use]
    pub const fn with_register_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.register_timeout_ms = timeout_ms;
        self
    }

    /// Set the SERDES handshake timeout
    #[must_use]
    pub const fn with_serdes_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.serdes_timeout_ms = timeout_ms;
        self
    }

    /// Override the PHY MDIO address
    #[must_use]
    pub const fn with_phy_address(mut self, addr: u8) -> Self {
        self.phy_address = Some(addr);
        self
    }

    /// Set the MAC address used when no factory address is programmed
    #[must_use]
    pub const fn with_fallback_mac_address(mut self, addr: [u8; MAC_ADDR_LEN]) -> Self {
        self.fallback_mac_address = Some(addr);
        self
    }

    /// Set the receive chain
    #[must_use]
    pub const fn with_rx_chain(mut self, chain: ChainConfig) -> Self {
        self.rx_chain = chain;
        self
    }

    /// Set the transmit chain
    #[must_use]
    pub const fn with_tx_chain(mut self, chain: ChainConfig) -> Self {
        self.tx_chain = chain;
        self
    }

    /// Set the core interrupt line numbers
    #[must_use]
    pub const fn with_interrupts(mut self, interrupts: CoreInterrupts) -> Self {
        self.interrupts = interrupts;
        self
    }

    /// PHY MDIO address in effect
    pub const fn effective_phy_address(&self) -> u8 {
        match self.phy_address {
            Some(addr) => addr,
            None => self.mac_port.port(),
        }
    }

    /// Check the configuration before any register is touched
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.register_timeout_ms == 0 || self.serdes_timeout_ms == 0 {
            return Err(ConfigError::InvalidConfig);
        }
        if self.effective_phy_address() > MDIO_ADDR_MAX {
            return Err(ConfigError::InvalidPhyAddress);
        }
        if self.rx_chain.index as usize >= BASE_DESCRIPTOR_COUNT
            || self.tx_chain.index as usize >= BASE_DESCRIPTOR_COUNT
            || self.rx_chain.index == self.tx_chain.index
        {
            return Err(ConfigError::InvalidChainIndex);
        }
        Ok(())
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Switch driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not initialized
    #[default]
    Uninitialized,
    /// Switch and gateway configured, MAC port not yet up
    Initialized,
    /// MAC port up, receive chain enabled
    Open,
}

// =============================================================================
// Unit Tests
// =============================================================================
