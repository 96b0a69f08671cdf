//! Agent operating modes
//!
//! Both the MAC-facing agent (ETHA) and the gateway agent (GWCA) move through
//! the same RESET, DISABLE, CONFIG, OPERATION sequence. A mode is requested
//! through the agent's mode-control register and is only in effect once the
//! mode-status register reports it. One [`AgentModeController`] drives both
//! kinds; the kind only selects the register pair.
//!
//! Static configuration registers are writable in CONFIG only, and CONFIG
//! has to be entered from DISABLE.

use embedded_hal::delay::DelayNs;

use crate::driver::error::Result;
use crate::hal::bus::{RegisterAccess, RegisterBus};
use crate::hal::clock::ClockGate;
use crate::internal::register::MODE_STATUS_MASK;
use crate::internal::register::etha::{EAMC, EAMS};
use crate::internal::register::gwca::{GWMC, GWMS};

// =============================================================================
// Modes
// =============================================================================

/// Operating mode of a switch agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AgentMode {
    /// Held in reset
    #[default]
    Reset,
    /// Clocked but inactive
    Disable,
    /// Static configuration registers writable
    Config,
    /// Forwarding traffic
    Operation,
}

impl AgentMode {
    /// Value written to the mode-control register
    pub const fn register_value(self) -> u32 {
        match self {
            AgentMode::Reset => 0,
            AgentMode::Disable => 1,
            AgentMode::Config => 2,
            AgentMode::Operation => 3,
        }
    }

    /// Decode a mode-status register value
    pub const fn from_register(value: u32) -> Self {
        match value & MODE_STATUS_MASK {
            0 => AgentMode::Reset,
            1 => AgentMode::Disable,
            2 => AgentMode::Config,
            _ => AgentMode::Operation,
        }
    }
}

// =============================================================================
// Agents
// =============================================================================

/// Kind of switch agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AgentKind {
    /// Ethernet (MAC-facing) agent
    Etha,
    /// Gateway CPU agent
    Gwca,
}

/// Mode-control and mode-status register offsets of one agent kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentRegisters {
    /// Mode control (write target mode)
    pub mode_control: usize,
    /// Mode status (current mode in the low two bits)
    pub mode_status: usize,
}

impl AgentRegisters {
    /// `EAMC` / `EAMS`
    pub const ETHA: Self = Self {
        mode_control: EAMC,
        mode_status: EAMS,
    };

    /// `GWMC` / `GWMS`
    pub const GWCA: Self = Self {
        mode_control: GWMC,
        mode_status: GWMS,
    };
}

impl AgentKind {
    /// Mode register pair of this kind
    pub const fn registers(self) -> AgentRegisters {
        match self {
            AgentKind::Etha => AgentRegisters::ETHA,
            AgentKind::Gwca => AgentRegisters::GWCA,
        }
    }
}

/// One switch agent: where it lives, which port it is, and its last
/// confirmed mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Agent {
    kind: AgentKind,
    base: usize,
    port: u8,
    mode: AgentMode,
}

impl Agent {
    /// Describe an agent in reset
    pub const fn new(kind: AgentKind, base: usize, port: u8) -> Self {
        Self {
            kind,
            base,
            port,
            mode: AgentMode::Reset,
        }
    }

    /// Agent kind
    pub const fn kind(&self) -> AgentKind {
        self.kind
    }

    /// Register block base address
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Switch port number
    pub const fn port(&self) -> u8 {
        self.port
    }

    /// Last mode confirmed by the hardware
    pub const fn mode(&self) -> AgentMode {
        self.mode
    }

    /// Absolute address of the mode-control register
    pub const fn mode_control(&self) -> usize {
        self.base + self.kind.registers().mode_control
    }

    /// Absolute address of the mode-status register
    pub const fn mode_status(&self) -> usize {
        self.base + self.kind.registers().mode_status
    }

    /// Forget the recorded mode after a switch-wide reset
    pub fn mark_reset(&mut self) {
        self.mode = AgentMode::Reset;
    }
}

// =============================================================================
// Mode Controller
// =============================================================================

/// Drives agents through mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentModeController {
    clock: ClockGate,
}

impl AgentModeController {
    /// Create a controller that gates clocks through `clock`
    pub const fn new(clock: ClockGate) -> Self {
        Self { clock }
    }

    /// The clock gate used for agent clocks
    pub const fn clock(&self) -> &ClockGate {
        &self.clock
    }

    /// Move `agent` to `target`
    ///
    /// 1. Start the agent clock if it is gated off.
    /// 2. Write `target` to mode control, even if the agent is already there.
    /// 3. Wait for mode status to report `target`.
    /// 4. On DISABLE, gate the clock off again.
    ///
    /// The recorded mode changes only after the status matched.
    pub fn change_mode<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
        agent: &mut Agent,
        target: AgentMode,
    ) -> Result<()> {
        if !self.clock.is_enabled(bus, agent.port) {
            self.clock.enable(bus, agent.port);
        }

        bus.write(agent.mode_control(), target.register_value());
        bus.wait(
            agent.mode_status(),
            MODE_STATUS_MASK,
            target.register_value(),
        )?;

        if target == AgentMode::Disable {
            self.clock.disable(bus, agent.port);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{} port {} mode {} -> {}",
            agent.kind,
            agent.port,
            agent.mode,
            target
        );

        agent.mode = target;
        Ok(())
    }

    /// DISABLE then CONFIG
    pub fn enter_config<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
        agent: &mut Agent,
    ) -> Result<()> {
        self.change_mode(bus, agent, AgentMode::Disable)?;
        self.change_mode(bus, agent, AgentMode::Config)
    }

    /// DISABLE then OPERATION
    pub fn enter_operation<R: RegisterAccess, D: DelayNs>(
        &self,
        bus: &mut RegisterBus<R, D>,
        agent: &mut Agent,
    ) -> Result<()> {
        self.change_mode(bus, agent, AgentMode::Disable)?;
        self.change_mode(bus, agent, AgentMode::Operation)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
