//! Descriptor records shared with the switch DMA engine.
//!
//! Every record starts with the same 8-byte header: a 16-bit size/info field,
//! the `die_dt` type byte, the high byte of a 40-bit pointer and its low
//! 32 bits. The extended variants append a 64-bit info word and optionally
//! a split timestamp. All fields are little-endian and unpadded:
//!
//! | Record              | Size | Layout                          |
//! |---------------------|------|---------------------------------|
//! | [`Descriptor`]      | 8    | header                          |
//! | [`ExtDescriptor`]   | 16   | header, info1                   |
//! | [`ExtTsDescriptor`] | 24   | header, info1, ts_nsec, ts_sec  |

pub mod bits;

use crate::dma::addr::PhysAddr;
use bits::DescriptorType;

/// Volatile cell wrapper for descriptor fields
///
/// Ensures all accesses are volatile so the compiler neither caches nor
/// reorders accesses to memory the DMA engine also reads.
#[repr(transparent)]
pub(crate) struct VolatileCell<T: Copy> {
    value: core::cell::UnsafeCell<T>,
}

// Safety: descriptor memory is only touched by one core during bring-up and
// every access is a single volatile load or store.
unsafe impl<T: Copy> Sync for VolatileCell<T> {}

impl<T: Copy> VolatileCell<T> {
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            value: core::cell::UnsafeCell::new(value),
        }
    }

    #[inline(always)]
    pub fn get(&self) -> T {
        unsafe { core::ptr::read_volatile(self.value.get()) }
    }

    #[inline(always)]
    pub fn set(&self, value: T) {
        unsafe { core::ptr::write_volatile(self.value.get(), value) }
    }
}

// =============================================================================
// Header
// =============================================================================

/// Common 8-byte descriptor header
#[repr(C)]
pub struct DescriptorHeader {
    info_ds: VolatileCell<u16>,
    die_dt: VolatileCell<u8>,
    dptrh: VolatileCell<u8>,
    dptrl: VolatileCell<u32>,
}

impl DescriptorHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = 8;

    /// Create a zeroed header (type `LINKFIX`, null pointer)
    pub const fn new() -> Self {
        Self::with_die_dt(0)
    }

    /// Create a header of type `die_dt` with a null pointer
    pub const fn with_die_dt(die_dt: u8) -> Self {
        Self {
            info_ds: VolatileCell::new(0),
            die_dt: VolatileCell::new(die_dt),
            dptrh: VolatileCell::new(0),
            dptrl: VolatileCell::new(0),
        }
    }

    /// Size/info field
    #[inline(always)]
    pub fn info_ds(&self) -> u16 {
        u16::from_le(self.info_ds.get())
    }

    /// Set the size/info field
    #[inline(always)]
    pub fn set_info_ds(&self, value: u16) {
        self.info_ds.set(value.to_le());
    }

    /// Raw type and interrupt-enable byte
    #[inline(always)]
    pub fn die_dt(&self) -> u8 {
        self.die_dt.get()
    }

    /// Set the raw type and interrupt-enable byte
    #[inline(always)]
    pub fn set_die_dt(&self, value: u8) {
        self.die_dt.set(value);
    }

    /// Decoded record type
    pub fn descriptor_type(&self) -> DescriptorType {
        DescriptorType::from_die_dt(self.die_dt())
    }

    /// Whether the descriptor interrupt is enabled for this record
    pub fn interrupt_enabled(&self) -> bool {
        bits::interrupt_enabled(self.die_dt())
    }

    /// Buffer or link target address
    pub fn pointer(&self) -> PhysAddr {
        PhysAddr::from_parts(self.dptrh.get(), u32::from_le(self.dptrl.get()))
    }

    /// Store a buffer or link target address
    ///
    /// Bits above the 40-bit pointer width are dropped; callers check
    /// [`PhysAddr::fits_descriptor`] first.
    pub fn set_pointer(&self, addr: PhysAddr) {
        self.dptrl.set(addr.low_word().to_le());
        self.dptrh.set(addr.high_byte());
    }

    /// Zero every field
    pub fn clear(&self) {
        self.info_ds.set(0);
        self.die_dt.set(0);
        self.dptrh.set(0);
        self.dptrl.set(0);
    }

    /// Little-endian wire form
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..2].copy_from_slice(&self.info_ds().to_le_bytes());
        out[2] = self.die_dt();
        let pointer = self.pointer().to_le_pointer();
        out[3..8].copy_from_slice(&pointer);
        out
    }
}

impl Default for DescriptorHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Record variants
// =============================================================================

/// Behavior shared by every descriptor record layout
pub trait DmaDescriptor {
    /// Size of the record in bytes
    const SIZE: usize;

    /// The common header
    fn header(&self) -> &DescriptorHeader;

    /// Zero the whole record
    fn clear(&self);
}

/// Hardware timestamp captured in a timestamped record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    /// Seconds part
    pub seconds: u32,
    /// Nanoseconds part
    pub nanoseconds: u32,
}

/// Plain 8-byte record, used for the base descriptor table
#[repr(C)]
#[derive(Default)]
pub struct Descriptor {
    header: DescriptorHeader,
}

/// Extended record with a 64-bit info word (16 bytes)
#[repr(C)]
pub struct ExtDescriptor {
    header: DescriptorHeader,
    info1: VolatileCell<u64>,
}

/// Extended record with a split timestamp (24 bytes)
#[repr(C)]
pub struct ExtTsDescriptor {
    header: DescriptorHeader,
    info1: VolatileCell<u64>,
    ts_nsec: VolatileCell<u32>,
    ts_sec: VolatileCell<u32>,
}

const _: () = assert!(core::mem::size_of::<Descriptor>() == 8);
const _: () = assert!(core::mem::size_of::<ExtDescriptor>() == 16);
const _: () = assert!(core::mem::size_of::<ExtTsDescriptor>() == 24);

impl Descriptor {
    /// Create a zeroed record
    pub const fn new() -> Self {
        Self {
            header: DescriptorHeader::new(),
        }
    }

    /// Create an end-of-sequence record
    pub const fn end_of_sequence() -> Self {
        Self {
            header: DescriptorHeader::with_die_dt(bits::dt::EOS),
        }
    }

    /// Little-endian wire form
    pub fn to_bytes(&self) -> [u8; 8] {
        self.header.to_bytes()
    }
}

impl ExtDescriptor {
    /// Create a zeroed record
    pub const fn new() -> Self {
        Self {
            header: DescriptorHeader::new(),
            info1: VolatileCell::new(0),
        }
    }

    /// Extension word
    pub fn info1(&self) -> u64 {
        u64::from_le(self.info1.get())
    }

    /// Set the extension word
    pub fn set_info1(&self, value: u64) {
        self.info1.set(value.to_le());
    }

    /// Little-endian wire form
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0..8].copy_from_slice(&self.header.to_bytes());
        out[8..16].copy_from_slice(&self.info1().to_le_bytes());
        out
    }
}

impl ExtTsDescriptor {
    /// Create a zeroed record
    pub const fn new() -> Self {
        Self {
            header: DescriptorHeader::new(),
            info1: VolatileCell::new(0),
            ts_nsec: VolatileCell::new(0),
            ts_sec: VolatileCell::new(0),
        }
    }

    /// Extension word
    pub fn info1(&self) -> u64 {
        u64::from_le(self.info1.get())
    }

    /// Set the extension word
    pub fn set_info1(&self, value: u64) {
        self.info1.set(value.to_le());
    }

    /// Captured timestamp
    pub fn timestamp(&self) -> Timestamp {
        Timestamp {
            seconds: u32::from_le(self.ts_sec.get()),
            nanoseconds: u32::from_le(self.ts_nsec.get()),
        }
    }

    /// Little-endian wire form
    pub fn to_bytes(&self) -> [u8; 24] {
        let mut out = [0u8; 24];
        out[0..8].copy_from_slice(&self.header.to_bytes());
        out[8..16].copy_from_slice(&self.info1().to_le_bytes());
        let ts = self.timestamp();
        out[16..20].copy_from_slice(&ts.nanoseconds.to_le_bytes());
        out[20..24].copy_from_slice(&ts.seconds.to_le_bytes());
        out
    }
}

impl DmaDescriptor for Descriptor {
    const SIZE: usize = 8;

    fn header(&self) -> &DescriptorHeader {
        &self.header
    }

    fn clear(&self) {
        self.header.clear();
    }
}

impl DmaDescriptor for ExtDescriptor {
    const SIZE: usize = 16;

    fn header(&self) -> &DescriptorHeader {
        &self.header
    }

    fn clear(&self) {
        self.header.clear();
        self.info1.set(0);
    }
}

impl DmaDescriptor for ExtTsDescriptor {
    const SIZE: usize = 24;

    fn header(&self) -> &DescriptorHeader {
        &self.header
    }

    fn clear(&self) {
        self.header.clear();
        self.info1.set(0);
        self.ts_nsec.set(0);
        self.ts_sec.set(0);
    }
}
