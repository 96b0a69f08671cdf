//! Clause-45 MDIO over the ETHA station management interface
//!
//! Every PHY register access is two frames: an address frame naming the
//! register, then a read or write frame. Each frame is written to `MPSM`
//! and completes by raising a flag in `MMIS1` (write-one-to-clear).
//!
//! | Step | Register | Value                                          | Wait on  |
//! |------|----------|------------------------------------------------|----------|
//! | 1    | MMIS1    | `0xF` (clear all flags)                         |          |
//! | 2    | MPSM     | `reg<<16 \| dev<<8 \| phy<<3 \| C45 \| PSME`     | `PAACS`  |
//! | 3    | MMIS1    | clear `PAACS`                                   |          |
//! | 4    | MPSM     | `[data<<16 \|] op<<13 \| dev<<8 \| phy<<3 \| ...` | `PRACS` / `PWACS` |
//! | 5    | MMIS1    | clear `PRACS` (reads)                           |          |

use embedded_hal::delay::DelayNs;

use crate::driver::error::{ConfigError, Result};
use crate::hal::bus::{RegisterAccess, RegisterBus};
use crate::internal::register::etha::{
    MDIO_ADDR_MAX, MMIS1, MMIS1_CLEAR_FLAGS, MMIS1_PAACS, MMIS1_PRACS, MMIS1_PWACS, MPSM,
    MPSM_MFF_C45, MPSM_PDA_SHIFT, MPSM_POP_READ, MPSM_POP_SHIFT, MPSM_POP_WRITE, MPSM_PRA_SHIFT,
    MPSM_PRD_SHIFT, MPSM_PSME,
};

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for clause-45 MDIO bus operations
///
/// This trait can be implemented by different backends, allowing the PHY
/// bring-up sequence to run against hardware or a register model.
pub trait Mdio45Bus {
    /// Read register `reg_addr` of MMD `dev_addr` on PHY `phy_addr`
    fn read(&mut self, phy_addr: u8, dev_addr: u8, reg_addr: u16) -> Result<u16>;

    /// Write register `reg_addr` of MMD `dev_addr` on PHY `phy_addr`
    fn write(&mut self, phy_addr: u8, dev_addr: u8, reg_addr: u16, value: u16) -> Result<()>;

    /// Sleep between polls of a PHY register
    fn wait_ms(&mut self, ms: u32);
}

/// Data-phase operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MdioOp {
    /// Read the addressed register
    Read,
    /// Write the addressed register
    Write,
}

impl MdioOp {
    /// `MPSM.POP` code for this operation
    pub const fn opcode(self) -> u32 {
        match self {
            MdioOp::Read => MPSM_POP_READ,
            MdioOp::Write => MPSM_POP_WRITE,
        }
    }

    /// `MMIS1` flag raised when the data phase completes
    const fn completion_flag(self) -> u32 {
        match self {
            MdioOp::Read => MMIS1_PRACS,
            MdioOp::Write => MMIS1_PWACS,
        }
    }
}

// =============================================================================
// MDIO Controller
// =============================================================================

/// Clause-45 MDIO client bound to one ETHA block
#[derive(Debug)]
pub struct Mdio45<'a, R, D> {
    bus: &'a mut RegisterBus<R, D>,
    etha_base: usize,
}

impl<'a, R: RegisterAccess, D: DelayNs> Mdio45<'a, R, D> {
    /// Create a client driving the station management interface of the ETHA
    /// block at `etha_base`
    pub fn new(bus: &'a mut RegisterBus<R, D>, etha_base: usize) -> Self {
        Self { bus, etha_base }
    }

    /// Run one clause-45 transaction
    ///
    /// Returns the register value for reads and `data` for writes. A timeout
    /// in the address phase aborts before any data-phase frame is written.
    pub fn transact(
        &mut self,
        op: MdioOp,
        phy_addr: u8,
        dev_addr: u8,
        reg_addr: u16,
        data: u16,
    ) -> Result<u16> {
        if phy_addr > MDIO_ADDR_MAX {
            return Err(ConfigError::InvalidPhyAddress.into());
        }
        if dev_addr > MDIO_ADDR_MAX {
            return Err(ConfigError::InvalidDeviceAddress.into());
        }

        let mpsm = self.etha_base + MPSM;
        let mmis1 = self.etha_base + MMIS1;
        let target = (u32::from(dev_addr) << MPSM_PRA_SHIFT)
            | (u32::from(phy_addr) << MPSM_PDA_SHIFT)
            | MPSM_MFF_C45
            | MPSM_PSME;

        self.bus.write(mmis1, MMIS1_CLEAR_FLAGS);

        // Address phase
        self.bus
            .write(mpsm, (u32::from(reg_addr) << MPSM_PRD_SHIFT) | target);
        self.bus.wait(mmis1, MMIS1_PAACS, MMIS1_PAACS)?;
        self.bus.modify(mmis1, MMIS1_PAACS, MMIS1_PAACS);

        // Data phase
        let frame = (op.opcode() << MPSM_POP_SHIFT) | target;
        let flag = op.completion_flag();
        match op {
            MdioOp::Read => {
                self.bus.write(mpsm, frame);
                self.bus.wait(mmis1, flag, flag)?;
                let value = (self.bus.read(mpsm) >> MPSM_PRD_SHIFT) as u16;
                self.bus.modify(mmis1, flag, flag);
                Ok(value)
            }
            MdioOp::Write => {
                self.bus
                    .write(mpsm, (u32::from(data) << MPSM_PRD_SHIFT) | frame);
                self.bus.wait(mmis1, flag, flag)?;
                Ok(data)
            }
        }
    }
}

impl<R: RegisterAccess, D: DelayNs> Mdio45Bus for Mdio45<'_, R, D> {
    fn read(&mut self, phy_addr: u8, dev_addr: u8, reg_addr: u16) -> Result<u16> {
        self.transact(MdioOp::Read, phy_addr, dev_addr, reg_addr, 0)
    }

    fn write(&mut self, phy_addr: u8, dev_addr: u8, reg_addr: u16, value: u16) -> Result<()> {
        self.transact(MdioOp::Write, phy_addr, dev_addr, reg_addr, value)
            .map(|_| ())
    }

    fn wait_ms(&mut self, ms: u32) {
        self.bus.delay_ms(ms);
    }
}
