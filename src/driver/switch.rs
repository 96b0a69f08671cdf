//! R-Switch driver façade
//!
//! [`Switch`] owns everything bring-up touches: the register bus, the base
//! descriptor table, both agents with their chains, the receive buffers and
//! the interrupt controller. Bring-up is two fail-fast calls:
//!
//! - [`Switch::init`]: clocks, factory MAC addresses, soft reset, gateway
//!   agent, chains, buffer pool, forwarding, core interrupt lines
//! - [`Switch::open`]: MAC agent, PHY, link verification, receive enable,
//!   data interrupts
//!
//! The first failing step's error is returned as is; nothing is rolled back.

use embedded_hal::delay::DelayNs;

use crate::dma::buffer::PacketBuffer;
use crate::dma::chain::ChainRing;
use crate::dma::table::BaseDescriptorTable;
use crate::driver::agent::AgentModeController;
use crate::driver::config::{LinkSpeed, State, SwitchConfig};
use crate::driver::error::{ConfigError, IoError, Result};
use crate::driver::etha::{MacAgent, read_mac_address};
use crate::driver::forwarding::{Bridge, ForwardingTable};
use crate::driver::gwca::GatewayAgent;
use crate::driver::interrupt::{DataInterruptStatus, InterruptController};
use crate::hal::bus::{RegisterAccess, RegisterBus};
use crate::hal::clock::ClockGate;
use crate::hal::reset::SwitchReset;
use crate::internal::constants::{
    DEFAULT_RING_SIZE, ETHA_PORT_COUNT, MAC_ADDR_LEN, TOTAL_PORT_COUNT,
};
use crate::internal::register::BlockMap;
use crate::phy::sgmii::{PhyBringup, SgmiiPhy};

/// R-Switch driver
///
/// # Type Parameters
/// * `R` - Register accessor ([`Mmio`](crate::hal::Mmio) on hardware)
/// * `D` - Delay provider
/// * `I` - Core interrupt controller
/// * `RING` - Slots per descriptor chain, including the link slot
///
/// # Placement
///
/// `init` publishes the addresses of the descriptor table, the chains and
/// the receive buffers to the hardware. The driver must not move after
/// `init`; place it in a `static` or another fixed location first.
///
/// # Example
/// ```ignore
/// static mut SWITCH: SwitchDefault<Mmio, Delay, Gic> =
///     Switch::new(unsafe { Mmio::new() }, Delay::new(), Gic::new(), Spider::config());
///
/// let switch = unsafe { &mut *core::ptr::addr_of_mut!(SWITCH) };
/// switch.init()?;
/// switch.open()?;
/// ```
pub struct Switch<R, D, I, const RING: usize = DEFAULT_RING_SIZE> {
    bus: RegisterBus<R, D>,
    irq: I,
    config: SwitchConfig,
    state: State,
    map: BlockMap,
    modes: AgentModeController,
    reset: SwitchReset,
    table: BaseDescriptorTable,
    etha: MacAgent,
    gwca: GatewayAgent<RING>,
    factory_macs: [[u8; MAC_ADDR_LEN]; ETHA_PORT_COUNT],
    phy: Option<PhyBringup>,
    rx_buffers: [PacketBuffer; RING],
}

/// Switch with 8-slot chains
pub type SwitchSmall<R, D, I> = Switch<R, D, I, 8>;

/// Switch with the default 32-slot chains
pub type SwitchDefault<R, D, I> = Switch<R, D, I, DEFAULT_RING_SIZE>;

impl<R, D, I, const RING: usize> Switch<R, D, I, RING> {
    /// Create a driver in the `Uninitialized` state
    ///
    /// Nothing is written to the hardware. This is a const function suitable
    /// for static initialization.
    pub const fn new(regs: R, delay: D, irq: I, config: SwitchConfig) -> Self {
        let map = BlockMap::new(config.register_base);
        Self {
            bus: RegisterBus::new(regs, delay).with_timeout_ms(config.register_timeout_ms),
            irq,
            config,
            state: State::Uninitialized,
            map,
            modes: AgentModeController::new(ClockGate::new(map.coma())),
            reset: SwitchReset::new(map.coma()),
            table: BaseDescriptorTable::new(),
            etha: MacAgent::new(config.mac_port, map.etha(config.mac_port.index())),
            gwca: GatewayAgent::new(
                config.gateway_port,
                map.gwca(config.gateway_port.index()),
                config.rx_chain,
                config.tx_chain,
            ),
            factory_macs: [[0; MAC_ADDR_LEN]; ETHA_PORT_COUNT],
            phy: None,
            rx_buffers: [const { PacketBuffer::new() }; RING],
        }
    }

    /// Bytes of DMA-visible memory held by this driver
    pub const fn memory_usage() -> usize {
        core::mem::size_of::<[PacketBuffer; RING]>()
            + 2 * core::mem::size_of::<ChainRing<RING>>()
            + core::mem::size_of::<BaseDescriptorTable>()
    }

    // =========================================================================
    // State Accessors
    // =========================================================================

    /// Get the current state
    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    /// Configuration in use
    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }

    /// MAC address of the bridged port
    #[inline(always)]
    pub fn mac_address(&self) -> &[u8; MAC_ADDR_LEN] {
        self.etha.mac_address()
    }

    /// Factory MAC address of MAC agent `index` as read by `init`
    pub fn factory_mac_address(&self, index: usize) -> Option<&[u8; MAC_ADDR_LEN]> {
        self.factory_macs.get(index)
    }

    /// Link speed of the bridged port
    #[inline(always)]
    pub fn speed(&self) -> LinkSpeed {
        self.etha.speed()
    }

    /// What the PHY bring-up did, once `open` got that far
    pub fn phy_bringup(&self) -> Option<PhyBringup> {
        self.phy
    }

    /// MAC-facing agent
    pub fn mac_agent(&self) -> &MacAgent {
        &self.etha
    }

    /// Gateway agent with its chains
    pub fn gateway_agent(&self) -> &GatewayAgent<RING> {
        &self.gwca
    }

    /// Base descriptor table
    pub fn descriptor_table(&self) -> &BaseDescriptorTable {
        &self.table
    }

    /// Receive buffer bound to `slot` of the receive chain
    pub fn rx_buffer(&self, slot: usize) -> Option<&PacketBuffer> {
        self.rx_buffers.get(slot)
    }

    /// Register bus
    pub fn bus(&self) -> &RegisterBus<R, D> {
        &self.bus
    }

    /// Register bus, mutably
    pub fn bus_mut(&mut self) -> &mut RegisterBus<R, D> {
        &mut self.bus
    }

    /// Core interrupt controller
    pub fn irq(&self) -> &I {
        &self.irq
    }
}

impl<R, D, I, const RING: usize> Switch<R, D, I, RING>
where
    R: RegisterAccess,
    D: DelayNs,
    I: InterruptController,
{
    // =========================================================================
    // Bring-up
    // =========================================================================

    /// Configure the switch and the gateway agent
    ///
    /// # Errors
    /// - `ConfigError::AlreadyInitialized` if called twice
    /// - Configuration errors from [`SwitchConfig::validate`], before any
    ///   register access
    /// - `IoError::Timeout` if a handshake stalls
    /// - `DmaError` if a chain cannot be laid out
    pub fn init(&mut self) -> Result<()> {
        if self.state != State::Uninitialized {
            return Err(ConfigError::AlreadyInitialized.into());
        }
        self.config.validate()?;

        let clock = *self.modes.clock();
        for port in 0..TOTAL_PORT_COUNT as u8 {
            clock.enable(&mut self.bus, port);
        }

        for (index, mac) in self.factory_macs.iter_mut().enumerate() {
            *mac = read_mac_address(&mut self.bus, self.map.etha(index));
        }
        self.etha.set_mac_address(self.factory_macs[self.config.mac_port.index()]);

        self.reset.soft_reset(&mut self.bus);

        self.table.fill_end_of_sequence();
        self.gwca.hw_init(&mut self.bus, &self.modes, &self.table, self.config.speed)?;

        self.etha.set_speed(self.gwca.speed());
        self.etha.assign_default_mac(self.config.fallback_mac_address);

        for (slot, buffer) in self.rx_buffers.iter().enumerate() {
            let addr = self.bus.bus_address(buffer.as_ptr());
            self.gwca.rx_chain_mut().bind_buffer(slot, addr)?;
        }
        self.gwca.format_chains(&mut self.bus, &self.table)?;

        self.reset.init_buffer_pool(&mut self.bus)?;

        ForwardingTable::new(self.map.fwd()).configure(
            &mut self.bus,
            &Bridge {
                mac: self.config.mac_port,
                gateway: self.config.gateway_port,
                rx_chain: self.config.rx_chain.index,
            },
        );

        self.config
            .interrupts
            .enable(&mut self.irq, self.config.mac_port, self.config.gateway_port);

        self.state = State::Initialized;

        #[cfg(feature = "defmt")]
        defmt::info!("switch initialized");

        Ok(())
    }

    /// Bring up the MAC port and start receiving
    ///
    /// # Errors
    /// - `IoError::InvalidState` unless the switch is initialized and not yet
    ///   open
    /// - `IoError::Timeout` if a handshake stalls
    /// - `IoError::SerdesTimeout` if the PHY SERDES never finishes
    pub fn open(&mut self) -> Result<()> {
        if self.state != State::Initialized {
            return Err(IoError::InvalidState.into());
        }

        self.etha.hw_init(&mut self.bus, &self.modes)?;

        let phy = SgmiiPhy::new(self.config.effective_phy_address())
            .with_serdes_timeout_ms(self.config.serdes_timeout_ms);
        let bringup = phy.bring_up(&mut self.etha.mdio(&mut self.bus))?;
        self.phy = Some(bringup);

        self.etha.verify_link(&mut self.bus)?;

        self.gwca.enable_rx(&mut self.bus);
        self.gwca.enable_data_interrupts(&mut self.bus);

        self.state = State::Open;

        #[cfg(feature = "defmt")]
        defmt::info!("switch open");

        Ok(())
    }

    // =========================================================================
    // Interrupts
    // =========================================================================

    /// Pending data interrupts of the gateway agent
    pub fn data_interrupt_status(&mut self) -> DataInterruptStatus {
        self.gwca.data_interrupts().status(&mut self.bus)
    }

    /// Acknowledge the data interrupt of `chain`
    pub fn acknowledge_data_interrupt(&mut self, chain: u8) {
        self.gwca.data_interrupts().acknowledge(&mut self.bus, chain);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
