//! Register bus and bounded register polling
//!
//! [`RegisterAccess`] is the only path to switch registers: real hardware
//! uses [`Mmio`], host tests use a simulated register file. [`RegisterBus`]
//! pairs an accessor with a [`DelayNs`] provider and adds the
//! read-modify-write helper and the bounded poll every handshake in the
//! driver is built on.

use embedded_hal::delay::DelayNs;

use crate::dma::addr::PhysAddr;
use crate::driver::error::{IoError, IoResult};
use crate::internal::constants::{POLL_INTERVAL_MS, REGISTER_TIMEOUT_MS};

// =============================================================================
// Register Access
// =============================================================================

/// Raw 32-bit register access
pub trait RegisterAccess {
    /// Read the register at `addr`
    fn read32(&mut self, addr: usize) -> u32;

    /// Write `value` to the register at `addr`
    fn write32(&mut self, addr: usize, value: u32);

    /// Translate a CPU pointer into the address the switch DMA uses
    ///
    /// The default is the identity mapping.
    fn bus_address(&self, ptr: *const u8) -> PhysAddr {
        PhysAddr::from_ptr(ptr)
    }
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &mut T {
    fn read32(&mut self, addr: usize) -> u32 {
        (**self).read32(addr)
    }

    fn write32(&mut self, addr: usize, value: u32) {
        (**self).write32(addr, value);
    }

    fn bus_address(&self, ptr: *const u8) -> PhysAddr {
        (**self).bus_address(ptr)
    }
}

/// Volatile memory-mapped register access
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create an MMIO accessor
    ///
    /// # Safety
    /// Every address later passed to [`RegisterAccess`] methods must be a
    /// valid, aligned, device-mapped 32-bit register, and no other code may
    /// drive the same registers concurrently.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterAccess for Mmio {
    #[inline(always)]
    fn read32(&mut self, addr: usize) -> u32 {
        // SAFETY: guaranteed by the contract of `Mmio::new`
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    #[inline(always)]
    fn write32(&mut self, addr: usize, value: u32) {
        // SAFETY: guaranteed by the contract of `Mmio::new`
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}

// =============================================================================
// Register Bus
// =============================================================================

/// Register accessor plus delay provider
///
/// Every poll makes at most `timeout_ms` attempts, sleeping
/// `POLL_INTERVAL_MS` between them.
#[derive(Debug)]
pub struct RegisterBus<R, D> {
    regs: R,
    delay: D,
    timeout_ms: u32,
}

impl<R, D> RegisterBus<R, D> {
    /// Create a bus with the default 1000 ms poll timeout
    pub const fn new(regs: R, delay: D) -> Self {
        Self {
            regs,
            delay,
            timeout_ms: REGISTER_TIMEOUT_MS,
        }
    }

    /// Set the poll timeout in milliseconds
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Change the poll timeout in milliseconds
    pub fn set_timeout_ms(&mut self, timeout_ms: u32) {
        self.timeout_ms = timeout_ms;
    }

    /// Poll timeout in milliseconds
    pub const fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// The register accessor
    pub const fn regs(&self) -> &R {
        &self.regs
    }

    /// The register accessor, mutably
    pub fn regs_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// The delay provider
    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    /// Split back into accessor and delay provider
    pub fn into_parts(self) -> (R, D) {
        (self.regs, self.delay)
    }
}

impl<R: RegisterAccess, D: DelayNs> RegisterBus<R, D> {
    /// Read a register
    #[inline(always)]
    pub fn read(&mut self, addr: usize) -> u32 {
        self.regs.read32(addr)
    }

    /// Write a register
    #[inline(always)]
    pub fn write(&mut self, addr: usize, value: u32) {
        self.regs.write32(addr, value);
    }

    /// Read-modify-write: clear `clear`, then set `set`
    pub fn modify(&mut self, addr: usize, clear: u32, set: u32) {
        let value = self.read(addr);
        self.write(addr, (value & !clear) | set);
    }

    /// Set bits in a register (read-modify-write)
    pub fn set_bits(&mut self, addr: usize, bits: u32) {
        self.modify(addr, 0, bits);
    }

    /// Wait until `read(addr) & mask == expected`
    ///
    /// Uses the bus timeout; see [`RegisterBus::wait_for`].
    pub fn wait(&mut self, addr: usize, mask: u32, expected: u32) -> IoResult<()> {
        self.wait_for(addr, mask, expected, self.timeout_ms)
    }

    /// Wait until `read(addr) & mask == expected`, at most `timeout_ms` attempts
    ///
    /// Succeeds on the first matching read. Otherwise sleeps one poll
    /// interval and retries; after `timeout_ms` failed attempts returns
    /// [`IoError::Timeout`]. There is no backoff.
    pub fn wait_for(
        &mut self,
        addr: usize,
        mask: u32,
        expected: u32,
        timeout_ms: u32,
    ) -> IoResult<()> {
        for _ in 0..timeout_ms {
            if self.read(addr) & mask == expected {
                return Ok(());
            }
            self.delay.delay_ms(POLL_INTERVAL_MS);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "register {=usize:#x} mask {=u32:#x} never reached {=u32:#x}",
            addr,
            mask,
            expected
        );

        Err(IoError::Timeout)
    }

    /// Sleep for `ms` milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Bus address of a CPU pointer, see [`RegisterAccess::bus_address`]
    pub fn bus_address(&self, ptr: *const u8) -> PhysAddr {
        self.regs.bus_address(ptr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDelay, MockRegisters};

    fn bus() -> RegisterBus<MockRegisters, MockDelay> {
        RegisterBus::new(MockRegisters::new(), MockDelay::new())
    }

    #[test]
    fn wait_succeeds_on_first_matching_read() {
        let mut bus = bus();
        bus.regs_mut().set(0x100, 0x3);
        assert_eq!(bus.wait(0x100, 0x3, 0x3), Ok(()));
        assert_eq!(bus.regs().reads_of(0x100), 1);
        assert_eq!(bus.delay_mut().total_ms(), 0);
    }

    #[test]
    fn wait_times_out_after_one_attempt_per_millisecond() {
        let mut bus = bus().with_timeout_ms(25);
        assert_eq!(bus.wait(0x100, 0x1, 0x1), Err(IoError::Timeout));
        assert_eq!(bus.regs().reads_of(0x100), 25);
        assert_eq!(bus.delay_mut().total_ms(), 25);
    }

    #[test]
    fn default_timeout_is_one_second() {
        let mut bus = bus();
        assert_eq!(bus.timeout_ms(), 1000);
        assert_eq!(bus.wait(0x4, 0x2, 0x2), Err(IoError::Timeout));
        assert_eq!(bus.regs().reads_of(0x4), 1000);
    }

    #[test]
    fn wait_compares_masked_value() {
        let mut bus = bus();
        bus.regs_mut().set(0x8, 0xFFFF_FFF2);
        assert_eq!(bus.wait(0x8, 0x3, 0x2), Ok(()));
    }

    #[test]
    fn modify_clears_then_sets() {
        let mut bus = bus();
        bus.regs_mut().set(0x10, 0b1111_0000);
        bus.modify(0x10, 0b0011_0000, 0b0000_0101);
        assert_eq!(bus.regs().get(0x10), 0b1100_0101);
        bus.set_bits(0x10, 1 << 31);
        assert_eq!(bus.regs().get(0x10), 0x8000_00C5);
    }
}
