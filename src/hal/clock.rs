//! Per-agent clock gating
//!
//! The common agent gates the clock of every switch port. A port's clock is
//! running only when the global `RCE` bit and the port's own bit are both
//! set in `RCEC`; writing a port bit to `RCDC` stops it again.

use embedded_hal::delay::DelayNs;

use crate::hal::bus::{RegisterAccess, RegisterBus};
use crate::internal::register::coma::{RCDC, RCEC, RCEC_RCE, port_clock_bit};

/// Clock state of one agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockState {
    /// Clock is gated off
    Disabled,
    /// Clock is running
    Enabled,
}

/// Clock gate controller for switch agents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockGate {
    coma_base: usize,
}

impl ClockGate {
    /// Create a clock gate controller for the common agent at `coma_base`
    pub const fn new(coma_base: usize) -> Self {
        Self { coma_base }
    }

    /// Whether the clock for `port` is running
    pub fn is_enabled<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
        port: u8,
    ) -> bool {
        let value = bus.read(self.coma_base + RCEC);
        value & RCEC_RCE != 0 && value & port_clock_bit(port) != 0
    }

    /// Current clock state of `port`
    pub fn state<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
        port: u8,
    ) -> ClockState {
        if self.is_enabled(bus, port) {
            ClockState::Enabled
        } else {
            ClockState::Disabled
        }
    }

    /// Start the clock for `port` (also sets the global enable)
    pub fn enable<R: RegisterAccess, D: DelayNs>(&self, bus: &mut RegisterBus<R, D>, port: u8) {
        bus.set_bits(self.coma_base + RCEC, RCEC_RCE | port_clock_bit(port));
    }

    /// Stop the clock for `port`
    pub fn disable<R: RegisterAccess, D: DelayNs>(&self, bus: &mut RegisterBus<R, D>, port: u8) {
        bus.set_bits(self.coma_base + RCDC, port_clock_bit(port));
    }
}
