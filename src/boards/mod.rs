//! Board-specific configurations.
//!
//! Board helpers collect the register base, port selection, interrupt lines
//! and MAC address defaults of a specific board into one [`SwitchConfig`].
//!
//! # Supported Boards
//!
//! - R-Car S4 Spider (TSNA0 bridged to GWCA1, SGMII PHY)
//!
//! [`SwitchConfig`]: crate::driver::config::SwitchConfig

pub mod spider;
