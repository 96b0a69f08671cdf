//! Interrupt lines and per-chain data interrupts
//!
//! Two levels are involved. The core interrupt controller routes the
//! switch's interrupt lines to the CPU ([`InterruptController`],
//! [`CoreInterrupts`]). Inside the gateway agent, every descriptor chain has
//! its own data interrupt bit spread over four 32-bit banks of
//! `GWDIS`/`GWDIE`/`GWDID` ([`DataInterrupts`]).

use embedded_hal::delay::DelayNs;

use crate::driver::config::{GatewayPort, MacPort};
use crate::hal::bus::{RegisterAccess, RegisterBus};
use crate::internal::constants::{CHAINS_PER_IRQ_BANK, DATA_IRQ_BANKS};
use crate::internal::register::gwca::{GWDI_BANK_STRIDE, GWDID0, GWDIE0, GWDIS0, data_irq};

// =============================================================================
// Core Interrupt Lines
// =============================================================================

/// Core-side interrupt enable
pub trait InterruptController {
    /// Enable interrupt line `irq` at the CPU interrupt controller
    fn enable_irq(&mut self, irq: u32);
}

impl<T: InterruptController + ?Sized> InterruptController for &mut T {
    fn enable_irq(&mut self, irq: u32) {
        (**self).enable_irq(irq);
    }
}

/// Core interrupt line numbers of the switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoreInterrupts {
    /// Gateway data (RX/TX) lines, per gateway agent
    pub gwca_data: [u32; 2],
    /// Gateway RX timestamp lines, per gateway agent
    pub gwca_rx_ts: [u32; 2],
    /// Gateway error lines, per gateway agent
    pub gwca_error: [u32; 2],
    /// MAC agent error lines, per MAC agent
    pub etha_error: [u32; 3],
    /// Common agent error line
    pub coma_error: u32,
}

impl CoreInterrupts {
    /// R-Car S4 interrupt line assignment
    pub const R_CAR_S4: Self = Self {
        gwca_data: [312, 320],
        gwca_rx_ts: [328, 330],
        gwca_error: [291, 292],
        etha_error: [293, 294, 295],
        coma_error: 290,
    };

    /// Lines to enable for one bridged port pair
    ///
    /// Order: gateway data, gateway RX timestamp, gateway error, MAC error,
    /// common error.
    pub const fn lines(&self, mac: MacPort, gateway: GatewayPort) -> [u32; 5] {
        let gw = gateway.index();
        [
            self.gwca_data[gw],
            self.gwca_rx_ts[gw],
            self.gwca_error[gw],
            self.etha_error[mac.index()],
            self.coma_error,
        ]
    }

    /// Enable every line for one bridged port pair
    pub fn enable<I: InterruptController>(&self, irq: &mut I, mac: MacPort, gateway: GatewayPort) {
        for line in self.lines(mac, gateway) {
            irq.enable_irq(line);
        }
    }
}

impl Default for CoreInterrupts {
    fn default() -> Self {
        Self::R_CAR_S4
    }
}

// =============================================================================
// Data Interrupts
// =============================================================================

/// Snapshot of the data interrupt status banks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataInterruptStatus {
    banks: [u32; DATA_IRQ_BANKS],
}

impl DataInterruptStatus {
    /// Build from raw bank values
    pub const fn from_raw(banks: [u32; DATA_IRQ_BANKS]) -> Self {
        Self { banks }
    }

    /// Raw bank values
    pub const fn raw(&self) -> [u32; DATA_IRQ_BANKS] {
        self.banks
    }

    /// Whether `chain` has a pending data interrupt
    pub const fn is_pending(&self, chain: u8) -> bool {
        let bank = chain as usize / CHAINS_PER_IRQ_BANK;
        let bit = 1 << (chain as usize % CHAINS_PER_IRQ_BANK);
        bank < DATA_IRQ_BANKS && self.banks[bank] & bit != 0
    }

    /// Whether no chain is pending
    pub fn is_empty(&self) -> bool {
        self.banks.iter().all(|bank| *bank == 0)
    }
}

/// Per-chain data interrupt control of one gateway agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataInterrupts {
    gwca_base: usize,
}

impl DataInterrupts {
    /// Create a controller for the gateway agent at `gwca_base`
    pub const fn new(gwca_base: usize) -> Self {
        Self { gwca_base }
    }

    /// Enable the data interrupt of `chain`, keeping other chains enabled
    pub fn enable<R: RegisterAccess, D: DelayNs>(&self, bus: &mut RegisterBus<R, D>, chain: u8) {
        let (offset, bit) = data_irq(GWDIE0, chain);
        bus.set_bits(self.gwca_base + offset, bit);
    }

    /// Disable the data interrupt of `chain`
    pub fn disable<R: RegisterAccess, D: DelayNs>(&self, bus: &mut RegisterBus<R, D>, chain: u8) {
        let (offset, bit) = data_irq(GWDID0, chain);
        bus.write(self.gwca_base + offset, bit);
    }

    /// Read every status bank
    pub fn status<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
    ) -> DataInterruptStatus {
        let mut banks = [0; DATA_IRQ_BANKS];
        for (i, bank) in banks.iter_mut().enumerate() {
            *bank = bus.read(self.gwca_base + GWDIS0 + i * GWDI_BANK_STRIDE);
        }
        DataInterruptStatus::from_raw(banks)
    }

    /// Acknowledge a pending data interrupt of `chain`
    pub fn acknowledge<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
        chain: u8,
    ) {
        let (offset, bit) = data_irq(GWDIS0, chain);
        bus.write(self.gwca_base + offset, bit);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
