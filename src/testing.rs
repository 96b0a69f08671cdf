//! Testing utilities and mock implementations
//!
//! Mock register files, a simulated switch and a clause-45 PHY model for
//! exercising the driver on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::boxed::Box;
use std::collections::HashMap;
use std::rc::Rc;
use std::vec::Vec;

use crate::dma::addr::PhysAddr;
use crate::driver::error::Result;
use crate::driver::interrupt::InterruptController;
use crate::hal::bus::RegisterAccess;
use crate::hal::mdio::Mdio45Bus;
use crate::internal::constants::{ETHA_PORT_COUNT, GWCA_PORT_COUNT};
use crate::internal::register::coma::{
    CABPIRM, CABPIRM_BPIOG, CABPIRM_BPR, RCDC, RCEC,
};
use crate::internal::register::etha::{
    EAMC, EAMS, MLVC, MMIS1, MMIS1_PAACS, MMIS1_PRACS, MMIS1_PWACS, MPSM, MPSM_PDA_SHIFT,
    MPSM_POP_ADDRESS, MPSM_POP_MASK, MPSM_POP_READ, MPSM_POP_SHIFT, MPSM_POP_WRITE,
    MPSM_PRA_SHIFT, MPSM_PRD_MASK, MPSM_PRD_SHIFT,
};
use crate::internal::register::gwca::{
    GWARIRM, GWARIRM_ARIOG, GWARIRM_ARR, GWMC, GWMS, GWMTIRM, GWMTIRM_MTIOG, GWMTIRM_MTR,
};
use crate::internal::register::{BlockMap, MODE_STATUS_MASK};
use crate::phy::regs::{HOST_MODE, HOST_MODE_RESET, SERDES_INIT, SERDES_INIT_START};

// =============================================================================
// Mock Registers
// =============================================================================

/// Backing store of a mock register window; unset registers read as zero
#[derive(Debug, Default)]
pub struct RegisterFile {
    values: HashMap<usize, u32>,
}

impl RegisterFile {
    pub fn get(&self, addr: usize) -> u32 {
        self.values.get(&addr).copied().unwrap_or(0)
    }

    pub fn set(&mut self, addr: usize, value: u32) {
        self.values.insert(addr, value);
    }

    pub fn set_bits(&mut self, addr: usize, bits: u32) {
        let value = self.get(addr);
        self.set(addr, value | bits);
    }

    pub fn clear_bits(&mut self, addr: usize, bits: u32) {
        let value = self.get(addr);
        self.set(addr, value & !bits);
    }
}

/// Side effect of a register write; replaces the plain store
pub type WriteHook = Box<dyn FnMut(&mut RegisterFile, u32)>;

/// HashMap-backed register window with an ordered access log
///
/// A write to an address with a hook runs the hook instead of storing the
/// value, which lets tests model self-clearing and write-one-to-clear bits.
///
/// # Example
///
/// ```ignore
/// let mut regs = MockRegisters::new();
/// regs.on_write(0x140, |file, _| file.set(0x140, 0x2)); // ready on any write
/// ```
#[derive(Default)]
pub struct MockRegisters {
    file: RegisterFile,
    writes: Vec<(usize, u32)>,
    reads: Vec<usize>,
    hooks: HashMap<usize, WriteHook>,
}

impl MockRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a register without logging a write
    pub fn set(&mut self, addr: usize, value: u32) {
        self.file.set(addr, value);
    }

    /// Current register value without logging a read
    pub fn get(&self, addr: usize) -> u32 {
        self.file.get(addr)
    }

    /// Install (or replace) the write hook for `addr`
    pub fn on_write<F>(&mut self, addr: usize, hook: F)
    where
        F: FnMut(&mut RegisterFile, u32) + 'static,
    {
        self.hooks.insert(addr, Box::new(hook));
    }

    /// Every write, in order
    pub fn writes(&self) -> &[(usize, u32)] {
        &self.writes
    }

    /// Values written to `addr`, in order
    pub fn writes_to(&self, addr: usize) -> Vec<u32> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Position in the write log of the first write to `addr`
    pub fn first_write(&self, addr: usize) -> Option<usize> {
        self.writes.iter().position(|(a, _)| *a == addr)
    }

    /// Position of the first write to `addr` with any of `bits` set
    pub fn first_write_with(&self, addr: usize, bits: u32) -> Option<usize> {
        self.writes
            .iter()
            .position(|(a, v)| *a == addr && v & bits != 0)
    }

    /// Number of reads of `addr`
    pub fn reads_of(&self, addr: usize) -> usize {
        self.reads.iter().filter(|a| **a == addr).count()
    }

    /// Forget logged accesses, keeping register values and hooks
    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.reads.clear();
    }
}

impl RegisterAccess for MockRegisters {
    fn read32(&mut self, addr: usize) -> u32 {
        self.reads.push(addr);
        self.file.get(addr)
    }

    fn write32(&mut self, addr: usize, value: u32) {
        self.writes.push((addr, value));
        match self.hooks.get_mut(&addr) {
            Some(hook) => hook(&mut self.file, value),
            None => self.file.set(addr, value),
        }
    }

    fn bus_address(&self, ptr: *const u8) -> PhysAddr {
        // Host pointers can exceed the descriptor width; keep the low 40 bits
        PhysAddr::new(ptr as usize as u64 & PhysAddr::MAX)
    }
}

// =============================================================================
// Clause-45 PHY Model
// =============================================================================

/// Register file of a clause-45 PHY with the bring-up side effects modeled
///
/// - Host mode reset bit self-clears on write.
/// - The SERDES start bit clears after `serdes_latency` reads, or never when
///   the handshake is stalled.
#[derive(Debug)]
pub struct Clause45Phy {
    registers: HashMap<(u8, u8, u16), u16>,
    latched: Option<u16>,
    serdes_latency: Option<u32>,
    writes: Vec<(u8, u8, u16, u16)>,
    reads: Vec<(u8, u8, u16)>,
    waited_ms: u32,
}

impl Default for Clause45Phy {
    fn default() -> Self {
        Self {
            registers: HashMap::new(),
            latched: None,
            serdes_latency: Some(0),
            writes: Vec::new(),
            reads: Vec::new(),
            waited_ms: 0,
        }
    }
}

impl Clause45Phy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, phy: u8, dev: u8, reg: u16, value: u16) {
        self.registers.insert((phy, dev, reg), value);
    }

    pub fn get(&self, phy: u8, dev: u8, reg: u16) -> u16 {
        self.registers.get(&(phy, dev, reg)).copied().unwrap_or(0)
    }

    /// SERDES start bit reads back set `reads` times before clearing
    pub fn set_serdes_latency(&mut self, reads: u32) {
        self.serdes_latency = Some(reads);
    }

    /// SERDES start bit never clears
    pub fn stall_serdes(&mut self) {
        self.serdes_latency = None;
    }

    pub fn writes(&self) -> &[(u8, u8, u16, u16)] {
        &self.writes
    }

    pub fn reads(&self) -> &[(u8, u8, u16)] {
        &self.reads
    }

    pub fn waited_ms(&self) -> u32 {
        self.waited_ms
    }

    /// Address phase: remember the register for the next data phase
    pub fn latch(&mut self, reg: u16) {
        self.latched = Some(reg);
    }

    pub fn read_latched(&mut self, phy: u8, dev: u8) -> u16 {
        let reg = self.latched.unwrap_or(0);
        self.read(phy, dev, reg)
    }

    pub fn write_latched(&mut self, phy: u8, dev: u8, value: u16) {
        let reg = self.latched.unwrap_or(0);
        self.write(phy, dev, reg, value);
    }

    pub fn read(&mut self, phy: u8, dev: u8, reg: u16) -> u16 {
        self.reads.push((phy, dev, reg));
        let value = self.get(phy, dev, reg);
        if reg != SERDES_INIT || value & SERDES_INIT_START == 0 {
            return value;
        }
        match self.serdes_latency {
            Some(0) => {
                let done = value & !SERDES_INIT_START;
                self.set(phy, dev, reg, done);
                done
            }
            Some(n) => {
                self.serdes_latency = Some(n - 1);
                value
            }
            None => value,
        }
    }

    pub fn write(&mut self, phy: u8, dev: u8, reg: u16, value: u16) {
        self.writes.push((phy, dev, reg, value));
        let stored = if reg == HOST_MODE {
            value & !HOST_MODE_RESET
        } else {
            value
        };
        self.set(phy, dev, reg, stored);
    }
}

impl Mdio45Bus for Clause45Phy {
    fn read(&mut self, phy_addr: u8, dev_addr: u8, reg_addr: u16) -> Result<u16> {
        Ok(Clause45Phy::read(self, phy_addr, dev_addr, reg_addr))
    }

    fn write(&mut self, phy_addr: u8, dev_addr: u8, reg_addr: u16, value: u16) -> Result<()> {
        Clause45Phy::write(self, phy_addr, dev_addr, reg_addr, value);
        Ok(())
    }

    fn wait_ms(&mut self, ms: u32) {
        self.waited_ms += ms;
    }
}

// =============================================================================
// Simulated Switch
// =============================================================================

/// Register window that behaves like a cooperative R-Switch
///
/// - Mode control writes are mirrored into the mode status register.
/// - Multicast table, AXI RAM and buffer pool resets complete immediately.
/// - Link verification completes immediately.
/// - `MMIS1` is write-one-to-clear; `MPSM` runs clause-45 frames against
///   [`Clause45Phy`].
/// - Writing a port bit to `RCDC` clears it in `RCEC`.
///
/// Individual behaviors can be broken by replacing a hook with
/// [`MockRegisters::on_write`].
pub struct SimulatedSwitch {
    pub regs: MockRegisters,
    pub phy: Rc<RefCell<Clause45Phy>>,
}

impl SimulatedSwitch {
    pub fn new(base: usize) -> Self {
        let map = BlockMap::new(base);
        let mut regs = MockRegisters::new();
        let phy = Rc::new(RefCell::new(Clause45Phy::new()));

        for index in 0..ETHA_PORT_COUNT {
            let etha = map.etha(index);
            echo_mode(&mut regs, etha + EAMC, etha + EAMS);
            clear_on_write(&mut regs, etha + MLVC);
            write_one_to_clear(&mut regs, etha + MMIS1);
            station_management(&mut regs, etha, Rc::clone(&phy));
        }

        for index in 0..GWCA_PORT_COUNT {
            let gwca = map.gwca(index);
            echo_mode(&mut regs, gwca + GWMC, gwca + GWMS);
            complete_on_start(&mut regs, gwca + GWMTIRM, GWMTIRM_MTIOG, GWMTIRM_MTR);
            complete_on_start(&mut regs, gwca + GWARIRM, GWARIRM_ARIOG, GWARIRM_ARR);
        }

        let coma = map.coma();
        complete_on_start(&mut regs, coma + CABPIRM, CABPIRM_BPIOG, CABPIRM_BPR);
        regs.on_write(coma + RCDC, move |file, value| {
            file.clear_bits(coma + RCEC, value);
        });

        Self { regs, phy }
    }

    /// Mode control for the agent at `control` is accepted but never reported
    pub fn stall_mode(&mut self, control: usize) {
        self.regs
            .on_write(control, move |file, value| file.set(control, value));
    }
}

fn echo_mode(regs: &mut MockRegisters, control: usize, status: usize) {
    regs.on_write(control, move |file, value| {
        file.set(control, value);
        file.set(status, value & MODE_STATUS_MASK);
    });
}

fn complete_on_start(regs: &mut MockRegisters, addr: usize, start: u32, done: u32) {
    regs.on_write(addr, move |file, value| {
        if value & start != 0 {
            file.set(addr, done);
        } else {
            file.set(addr, value);
        }
    });
}

fn clear_on_write(regs: &mut MockRegisters, addr: usize) {
    regs.on_write(addr, move |file, _| file.set(addr, 0));
}

fn write_one_to_clear(regs: &mut MockRegisters, addr: usize) {
    regs.on_write(addr, move |file, value| file.clear_bits(addr, value));
}

fn station_management(regs: &mut MockRegisters, etha: usize, phy: Rc<RefCell<Clause45Phy>>) {
    let mpsm = etha + MPSM;
    let mmis1 = etha + MMIS1;
    regs.on_write(mpsm, move |file, value| {
        let phy_addr = ((value >> MPSM_PDA_SHIFT) & 0x1F) as u8;
        let dev_addr = ((value >> MPSM_PRA_SHIFT) & 0x1F) as u8;
        let data = (value >> MPSM_PRD_SHIFT) as u16;
        let mut phy = phy.borrow_mut();
        match (value & MPSM_POP_MASK) >> MPSM_POP_SHIFT {
            MPSM_POP_ADDRESS => {
                phy.latch(data);
                file.set(mpsm, value);
                file.set_bits(mmis1, MMIS1_PAACS);
            }
            MPSM_POP_READ => {
                let read = phy.read_latched(phy_addr, dev_addr);
                file.set(
                    mpsm,
                    (value & !MPSM_PRD_MASK) | (u32::from(read) << MPSM_PRD_SHIFT),
                );
                file.set_bits(mmis1, MMIS1_PRACS);
            }
            MPSM_POP_WRITE => {
                phy.write_latched(phy_addr, dev_addr, data);
                file.set(mpsm, value);
                file.set_bits(mmis1, MMIS1_PWACS);
            }
            _ => file.set(mpsm, value),
        }
    });
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    /// Total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

// =============================================================================
// Mock Interrupt Controller
// =============================================================================

/// Records enabled interrupt lines in order
#[derive(Debug, Default)]
pub struct MockIrq {
    enabled: Vec<u32>,
}

impl MockIrq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> &[u32] {
        &self.enabled
    }
}

impl InterruptController for MockIrq {
    fn enable_irq(&mut self, irq: u32) {
        self.enabled.push(irq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hooks_replace_plain_store() {
        let mut regs = MockRegisters::new();
        regs.set(0x20, 0b111);
        regs.on_write(0x20, |file, value| file.clear_bits(0x20, value));
        regs.write32(0x20, 0b010);
        assert_eq!(regs.get(0x20), 0b101);
        assert_eq!(regs.writes(), &[(0x20, 0b010)]);
    }

    #[test]
    fn bus_address_fits_descriptor_width() {
        let regs = MockRegisters::new();
        let byte = 0u8;
        assert!(regs.bus_address(&byte).fits_descriptor());
    }

    #[test]
    fn phy_model_self_clears_host_mode_reset() {
        let mut phy = Clause45Phy::new();
        Clause45Phy::write(&mut phy, 0, 1, HOST_MODE, HOST_MODE_RESET | 0x4);
        assert_eq!(phy.get(0, 1, HOST_MODE), 0x4);
    }

    #[test]
    fn phy_model_serdes_latency() {
        let mut phy = Clause45Phy::new();
        phy.set_serdes_latency(2);
        phy.set(0, 1, SERDES_INIT, SERDES_INIT_START);
        assert_ne!(Clause45Phy::read(&mut phy, 0, 1, SERDES_INIT) & SERDES_INIT_START, 0);
        assert_ne!(Clause45Phy::read(&mut phy, 0, 1, SERDES_INIT) & SERDES_INIT_START, 0);
        assert_eq!(Clause45Phy::read(&mut phy, 0, 1, SERDES_INIT) & SERDES_INIT_START, 0);
    }
}
