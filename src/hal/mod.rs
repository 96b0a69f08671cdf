//! Hardware Abstraction Layer
//!
//! This module provides higher-level abstractions over the raw switch
//! registers, so the driver never deals with addresses directly.
//!
//! # Modules
//!
//! - [`bus`]: Register access trait, MMIO backend and bounded polling
//! - [`clock`]: Per-agent clock gating
//! - [`mdio`]: Clause-45 MDIO for PHY communication
//! - [`reset`]: Switch soft reset and buffer pool initialization
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL.

pub mod bus;
pub mod clock;
pub mod mdio;
pub mod reset;

// Re-export commonly used types
pub use bus::{Mmio, RegisterAccess, RegisterBus};
pub use clock::{ClockGate, ClockState};
pub use mdio::{Mdio45, Mdio45Bus, MdioOp};
pub use reset::SwitchReset;
