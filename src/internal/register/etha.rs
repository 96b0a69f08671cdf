//! Ethernet agent (ETHA) registers
//!
//! Mode control, MII/MDIO interface and link verification for one TSN MAC
//! port. Offsets are relative to the ETHA block base.

// =============================================================================
// Register Offsets
// =============================================================================

/// Agent mode control
pub const EAMC: usize = 0x0000;
/// Agent mode status
pub const EAMS: usize = 0x0004;
/// VLAN control configuration
pub const EAVCC: usize = 0x0130;
/// MDIO station management
pub const MPSM: usize = 0x1000;
/// MII interface configuration
pub const MPIC: usize = 0x1004;
/// Factory MAC address, bytes 0..1
pub const MRMAC0: usize = 0x1080;
/// Factory MAC address, bytes 2..5
pub const MRMAC1: usize = 0x1084;
/// Link verification control
pub const MLVC: usize = 0x1180;
/// MDIO interrupt status (write one to clear)
pub const MMIS1: usize = 0x1220;

// =============================================================================
// EAVCC
// =============================================================================

/// VLAN egress mode: S-tagged
pub const EAVCC_VEM_SC_TAG: u32 = 0x3 << 16;

// =============================================================================
// MPIC
// =============================================================================

/// PHY interface select: GMII
pub const MPIC_PIS_GMII: u32 = 0x02;
/// Link speed code shift
pub const MPIC_LSC_SHIFT: u32 = 3;
/// Link speed code: 10 Mbps
pub const MPIC_LSC_10M: u32 = 0;
/// Link speed code: 100 Mbps
pub const MPIC_LSC_100M: u32 = 1;
/// Link speed code: 1 Gbps
pub const MPIC_LSC_1G: u32 = 2;
/// MDIO clock select field (bits 22:16)
pub const MPIC_PSMCS_MASK: u32 = 0x7F << 16;
/// MDIO clock select shift
pub const MPIC_PSMCS_SHIFT: u32 = 16;
/// MDIO clock select value used on R-Car S4
pub const MPIC_PSMCS_DEFAULT: u32 = 0x05;
/// MDIO hold time field (bits 26:24)
pub const MPIC_PSMHT_MASK: u32 = 0x7 << 24;
/// MDIO hold time shift
pub const MPIC_PSMHT_SHIFT: u32 = 24;
/// MDIO hold time value used on R-Car S4
pub const MPIC_PSMHT_DEFAULT: u32 = 0x06;

// =============================================================================
// MPSM
// =============================================================================

/// Station management enable
pub const MPSM_PSME: u32 = 1 << 0;
/// Management frame format: clause 45
pub const MPSM_MFF_C45: u32 = 1 << 2;
/// PHY address shift (bits 7:3)
pub const MPSM_PDA_SHIFT: u32 = 3;
/// Device address shift (bits 12:8)
pub const MPSM_PRA_SHIFT: u32 = 8;
/// Operation shift (bits 14:13)
pub const MPSM_POP_SHIFT: u32 = 13;
/// Operation field mask
pub const MPSM_POP_MASK: u32 = 0x3 << MPSM_POP_SHIFT;
/// Register address / data shift (bits 31:16)
pub const MPSM_PRD_SHIFT: u32 = 16;
/// Register address / data field mask
pub const MPSM_PRD_MASK: u32 = 0xFFFF << MPSM_PRD_SHIFT;

/// Clause-45 address phase operation code
pub const MPSM_POP_ADDRESS: u32 = 0x00;
/// Clause-45 write operation code
pub const MPSM_POP_WRITE: u32 = 0x01;
/// Clause-45 read operation code
pub const MPSM_POP_READ: u32 = 0x03;

/// Largest 5-bit PHY / device address
pub const MDIO_ADDR_MAX: u8 = 0x1F;

// =============================================================================
// MMIS1
// =============================================================================

/// Read access complete
pub const MMIS1_PRACS: u32 = 1 << 0;
/// Write access complete
pub const MMIS1_PWACS: u32 = 1 << 1;
/// Address access complete
pub const MMIS1_PAACS: u32 = 1 << 2;
/// Clears every completion flag
pub const MMIS1_CLEAR_FLAGS: u32 = 0xF;

// =============================================================================
// MLVC
// =============================================================================

/// Link verification request; hardware clears it when verification finishes
pub const MLVC_PLV: u32 = 1 << 16;
