//! Register map for the R-Switch2 Ethernet switch
//!
//! The switch exposes one register window split into fixed blocks: the
//! forwarding engine (FWD), the common agent (COMA), one block per Ethernet
//! agent (ETHA) and one block per gateway CPU agent (GWCA). Offsets in the
//! submodules are relative to the start of their block; [`BlockMap`] turns a
//! switch base address into block base addresses.
//!
//! Register access itself goes through [`crate::hal::bus::RegisterAccess`] so
//! the same offsets drive real MMIO and the host-side simulator.

pub mod coma;
pub mod etha;
pub mod fwd;
pub mod gwca;

/// Switch register window base on R-Car S4
pub const RSWITCH_BASE: usize = 0xE688_0000;

/// Forwarding engine block offset
pub const FWD_OFFSET: usize = 0x0000;

/// Common agent block offset
pub const COMA_OFFSET: usize = 0x9000;

/// First Ethernet agent block offset
pub const ETHA_OFFSET: usize = 0xA000;

/// Distance between consecutive Ethernet agent blocks
pub const ETHA_STRIDE: usize = 0x2000;

/// First gateway agent block offset
pub const GWCA_OFFSET: usize = 0x1_0000;

/// Distance between consecutive gateway agent blocks
pub const GWCA_STRIDE: usize = 0x2000;

/// Agent mode status field (shared by `EAMS` and `GWMS`)
pub const MODE_STATUS_MASK: u32 = 0x3;

/// Block base addresses derived from a switch base address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMap {
    base: usize,
}

impl BlockMap {
    /// Create a block map for a switch window at `base`
    pub const fn new(base: usize) -> Self {
        Self { base }
    }

    /// Switch window base
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Forwarding engine block base
    pub const fn fwd(&self) -> usize {
        self.base + FWD_OFFSET
    }

    /// Common agent block base
    pub const fn coma(&self) -> usize {
        self.base + COMA_OFFSET
    }

    /// Ethernet agent block base for ETHA index `index`
    pub const fn etha(&self, index: usize) -> usize {
        self.base + ETHA_OFFSET + index * ETHA_STRIDE
    }

    /// Gateway agent block base for GWCA index `index`
    pub const fn gwca(&self, index: usize) -> usize {
        self.base + GWCA_OFFSET + index * GWCA_STRIDE
    }
}
