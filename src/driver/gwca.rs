//! Gateway CPU agent (GWCA)
//!
//! The gateway agent moves frames between the switch and memory. It owns
//! the receive and transmit descriptor chains and reads the base descriptor
//! table to find them.

use embedded_hal::delay::DelayNs;

use crate::dma::chain::{Chain, Direction};
use crate::dma::table::BaseDescriptorTable;
use crate::driver::agent::{Agent, AgentKind, AgentModeController};
use crate::driver::config::{ChainConfig, GatewayPort, LinkSpeed};
use crate::driver::error::Result;
use crate::driver::interrupt::DataInterrupts;
use crate::hal::bus::{RegisterAccess, RegisterBus};
use crate::internal::register::gwca::{
    GWARIRM, GWARIRM_ARIOG, GWARIRM_ARR, GWDCBAC0, GWDCBAC1, GWGRLC, GWGRLC_1G, GWGRLULC,
    GWGRLULC_1G, GWMTIRM, GWMTIRM_MTIOG, GWMTIRM_MTR, GWTTFC, GWVCC, GWVCC_VEM_SC_TAG, gwtrc,
};

/// Gateway agent with its receive and transmit chains
///
/// # Type Parameters
/// * `RING` - Slots per chain, including the terminating link slot
pub struct GatewayAgent<const RING: usize> {
    agent: Agent,
    gateway: GatewayPort,
    speed: LinkSpeed,
    rx: Chain<RING>,
    tx: Chain<RING>,
}

impl<const RING: usize> GatewayAgent<RING> {
    /// Describe the gateway agent at `base`
    pub const fn new(gateway: GatewayPort, base: usize, rx: ChainConfig, tx: ChainConfig) -> Self {
        Self {
            agent: Agent::new(AgentKind::Gwca, base, gateway.port()),
            gateway,
            speed: LinkSpeed::Gbps1,
            rx: Chain::new(rx.index, Direction::Rx, rx.layout),
            tx: Chain::new(tx.index, Direction::Tx, tx.layout),
        }
    }

    /// Mode-tracked agent
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Mode-tracked agent, mutably
    pub fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }

    /// Which gateway agent this is
    pub const fn gateway(&self) -> GatewayPort {
        self.gateway
    }

    /// Register block base address
    pub const fn base(&self) -> usize {
        self.agent.base()
    }

    /// Negotiated link speed
    pub const fn speed(&self) -> LinkSpeed {
        self.speed
    }

    /// Receive chain
    pub fn rx_chain(&self) -> &Chain<RING> {
        &self.rx
    }

    /// Receive chain, mutably
    pub fn rx_chain_mut(&mut self) -> &mut Chain<RING> {
        &mut self.rx
    }

    /// Transmit chain
    pub fn tx_chain(&self) -> &Chain<RING> {
        &self.tx
    }

    /// Transmit chain, mutably
    pub fn tx_chain_mut(&mut self) -> &mut Chain<RING> {
        &mut self.tx
    }

    /// Data interrupt control of this agent
    pub const fn data_interrupts(&self) -> DataInterrupts {
        DataInterrupts::new(self.agent.base())
    }

    /// Static configuration, ending in OPERATION
    ///
    /// DISABLE, CONFIG, multicast table and AXI RAM reset, VLAN tag mode,
    /// transmit timestamp off, base descriptor table address, speed and
    /// rate limiter, then DISABLE and OPERATION.
    pub fn hw_init<R: RegisterAccess, D: DelayNs>(
        &mut self,
        bus: &mut RegisterBus<R, D>,
        modes: &AgentModeController,
        table: &BaseDescriptorTable,
        speed: LinkSpeed,
    ) -> Result<()> {
        let base = self.agent.base();

        modes.enter_config(bus, &mut self.agent)?;
        self.reset_multicast_table(bus)?;
        self.reset_axi_ram(bus)?;

        bus.write(base + GWVCC, GWVCC_VEM_SC_TAG);
        bus.write(base + GWTTFC, 0);

        let table_addr = bus.bus_address(table.as_ptr());
        bus.write(base + GWDCBAC1, table_addr.low_word());
        bus.write(base + GWDCBAC0, table_addr.upper_32());

        self.speed = speed;
        self.set_rate_limit(bus);

        modes.enter_operation(bus, &mut self.agent)?;

        #[cfg(feature = "defmt")]
        defmt::info!("gateway port {} operational", self.agent.port());

        Ok(())
    }

    fn reset_multicast_table<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
    ) -> Result<()> {
        let addr = self.agent.base() + GWMTIRM;
        bus.write(addr, GWMTIRM_MTIOG);
        bus.wait(addr, GWMTIRM_MTR, GWMTIRM_MTR)?;
        Ok(())
    }

    fn reset_axi_ram<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
    ) -> Result<()> {
        let addr = self.agent.base() + GWARIRM;
        bus.write(addr, GWARIRM_ARIOG);
        bus.wait(addr, GWARIRM_ARR, GWARIRM_ARR)?;
        Ok(())
    }

    /// Program the rate limiter for the current speed
    ///
    /// Only 1 Gbps has known limiter values; other speeds leave the limiter
    /// untouched.
    pub fn set_rate_limit<R: RegisterAccess, D: DelayNs>(&self, bus: &mut RegisterBus<R, D>) {
        match self.speed {
            LinkSpeed::Gbps1 => {
                bus.write(self.agent.base() + GWGRLULC, GWGRLULC_1G);
                bus.write(self.agent.base() + GWGRLC, GWGRLC_1G);
            }
            _other => {
                #[cfg(feature = "defmt")]
                defmt::warn!("rate limit not supported at {} Mbps", _other.mbps());
            }
        }
    }

    /// Format both chains against `table`
    pub fn format_chains<R: RegisterAccess, D: DelayNs>(
        &mut self,
        bus: &mut RegisterBus<R, D>,
        table: &BaseDescriptorTable,
    ) -> Result<()> {
        let base = self.agent.base();
        self.rx.format(bus, table, base)?;
        self.tx.format(bus, table, base)
    }

    /// Let the receive chain accept frames
    pub fn enable_rx<R: RegisterAccess, D: DelayNs>(&self, bus: &mut RegisterBus<R, D>) {
        let (offset, bit) = gwtrc(self.rx.index());
        bus.set_bits(self.agent.base() + offset, bit);
    }

    /// Enable data interrupts of the transmit and receive chains
    pub fn enable_data_interrupts<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
    ) {
        let irqs = self.data_interrupts();
        irqs.enable(bus, self.tx.index());
        irqs.enable(bus, self.rx.index());
    }
}
