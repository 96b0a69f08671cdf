//! Bus addresses as seen by the switch DMA
//!
//! Descriptors carry a 40-bit pointer split into an 8-bit high byte (`dptrh`)
//! and a 32-bit low word (`dptrl`). [`PhysAddr`] keeps that value distinct
//! from CPU pointers; translation from a CPU pointer happens once, at the
//! register-access boundary ([`crate::hal::bus::RegisterAccess::bus_address`]).

/// A bus address reachable by the switch DMA engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysAddr(u64);

impl PhysAddr {
    /// Width of a descriptor pointer in bits
    pub const WIDTH_BITS: u32 = 40;

    /// Largest address a descriptor can carry
    pub const MAX: u64 = (1 << Self::WIDTH_BITS) - 1;

    /// The zero address
    pub const NULL: Self = Self(0);

    /// Wrap a raw bus address
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Identity translation of a CPU pointer
    ///
    /// Correct on targets where the switch sees memory at the same addresses
    /// as the CPU.
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize as u64)
    }

    /// Raw address value
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Whether the address fits a descriptor pointer
    pub const fn fits_descriptor(self) -> bool {
        self.0 <= Self::MAX
    }

    /// Bits 39..32, stored in a descriptor's `dptrh`
    pub const fn high_byte(self) -> u8 {
        (self.0 >> 32) as u8
    }

    /// Bits 31..0, stored in a descriptor's `dptrl`
    pub const fn low_word(self) -> u32 {
        self.0 as u32
    }

    /// Bits 63..32, as written to a 32-bit high address register
    pub const fn upper_32(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Rebuild an address from descriptor pointer fields
    pub const fn from_parts(high: u8, low: u32) -> Self {
        Self(((high as u64) << 32) | low as u64)
    }

    /// Little-endian wire form of the descriptor pointer: `dptrh` then `dptrl`
    pub const fn to_le_pointer(self) -> [u8; 5] {
        let low = self.low_word().to_le_bytes();
        [self.high_byte(), low[0], low[1], low[2], low[3]]
    }

    /// Decode the wire form produced by [`PhysAddr::to_le_pointer`]
    pub const fn from_le_pointer(bytes: [u8; 5]) -> Self {
        Self::from_parts(
            bytes[0],
            u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]),
        )
    }

    /// Address `bytes` further on
    pub const fn offset(self, bytes: u64) -> Self {
        Self(self.0 + bytes)
    }
}

impl core::fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#012x}", self.0)
    }
}
