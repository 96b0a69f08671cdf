//! R-Switch Ethernet Driver
//!
//! A `no_std`, `no_alloc` bring-up driver for the Ethernet switch (R-Switch2)
//! found in Renesas R-Car S4 SoCs.
//!
//! The switch has three MAC-facing Ethernet agents (ETHA, TSNA0-2) and two
//! gateway CPU agents (GWCA0-1) that move frames between the switch and
//! memory through descriptor chains. This crate brings one ETHA port and one
//! GWCA port from reset to a state where frames can flow: clocks, soft
//! reset, descriptor chains, a static forwarding bridge, interrupt lines, the
//! MAC, and the SGMII link to the external PHY.
//!
//! # Architecture
//!
//! 1. **Switch Layer** ([`driver`]): bring-up orchestration, agent mode
//!    transitions, forwarding, interrupts
//! 2. **DMA Layer** ([`dma`]): descriptors, chains, base descriptor table,
//!    packet buffers
//! 3. **PHY Layer** ([`phy`]): clause-45 SGMII PHY bring-up
//! 4. **HAL Layer** ([`hal`]): register bus, clock gating, soft reset, MDIO
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting and bring-up logging
//! - `critical-section`: Enable the ISR-safe [`sync::SharedSwitch`] wrapper
//!
//! # Example
//!
//! ```ignore
//! use rswitch_eth::{Mmio, Spider, Switch};
//!
//! // Your delay and interrupt controller implementations
//! let delay = /* embedded_hal::delay::DelayNs */;
//! let gic = /* rswitch_eth::InterruptController */;
//!
//! static mut SWITCH: Switch<Mmio, Delay, Gic> =
//!     Switch::new(unsafe { Mmio::new() }, Delay, Gic, Spider::config());
//!
//! let switch = unsafe { &mut *core::ptr::addr_of_mut!(SWITCH) };
//! switch.init()?;
//! switch.open()?;
//! ```
//!
//! # Memory Requirements
//!
//! Each receive slot owns one 1792-byte aligned packet buffer. With the
//! default 32-entry rings that is about 56 KB of DMA-capable memory, plus the
//! descriptor rings themselves. See [`Switch::memory_usage`].

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod boards;
pub mod dma;
pub mod driver;
pub mod hal;
pub mod phy;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use boards::spider::Spider;
pub use driver::config::{ChainConfig, GatewayPort, LinkSpeed, MacPort, State, SwitchConfig};
pub use driver::error::{
    ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result, status_code,
};
pub use driver::interrupt::{CoreInterrupts, DataInterruptStatus, InterruptController};
pub use driver::switch::{Switch, SwitchDefault, SwitchSmall};
pub use hal::bus::{Mmio, RegisterAccess};

// Re-export PHY types
pub use phy::{PhyBringup, SgmiiPhy};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::{SharedSwitch, SharedSwitchDefault, SharedSwitchSmall};

/// Shared driver constants.
pub mod constants {
    pub use crate::internal::constants::{
        // Topology
        CHAINS_PER_PORT,
        DEFAULT_MAC_ADDRESSES,
        // Ring sizes
        DEFAULT_RING_SIZE,
        ETHA_PORT_COUNT,
        GWCA_PORT_COUNT,
        MAC_ADDR_LEN,
        MIN_RING_SIZE,
        // Packet buffers
        PKT_BUF_ALIGN,
        PKT_BUF_SZ,
        PKT_BUF_SZ_ALIGN,
        // Timing
        POLL_INTERVAL_MS,
        REGISTER_TIMEOUT_MS,
        SERDES_TIMEOUT_MS,
        TOTAL_PORT_COUNT,
    };
    pub use crate::internal::register::RSWITCH_BASE;
}
