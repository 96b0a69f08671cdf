//! Clause-45 registers used during PHY bring-up.

/// PMA/PMD MMD device address
pub const MMD_PMA_PMD: u8 = 1;

/// Host interface mode control
pub const HOST_MODE: u16 = 0xC04A;
/// Host mode: software reset (self-clearing)
pub const HOST_MODE_RESET: u16 = 1 << 15;
/// Host mode selection field
pub const HOST_MODE_MASK: u16 = 0x7;
/// Host mode selection: SGMII
pub const HOST_MODE_SGMII: u16 = 0x4;

/// SERDES initialization control
pub const SERDES_INIT: u16 = 0x800F;
/// Start initialization; hardware clears it when done
pub const SERDES_INIT_START: u16 = 1 << 15;
/// Initialization enable
pub const SERDES_INIT_ENABLE: u16 = 1 << 13;
