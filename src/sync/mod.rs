//! Interrupt-safe access to the switch driver
//!
//! - [`CriticalSectionCell`] - ISR-safe interior mutability
//! - [`SharedSwitch`] - [`Switch`] behind a critical section, for sharing
//!   between thread mode and the data interrupt handler
//!
//! Requires the `critical-section` feature.
//!
//! # Example
//!
//! ```ignore
//! use rswitch_eth::sync::SharedSwitch;
//!
//! static SWITCH: SharedSwitch<Mmio, Delay, Gic> =
//!     SharedSwitch::new(unsafe { Mmio::new() }, Delay, Gic, Spider::config());
//!
//! fn main() {
//!     SWITCH.with(|switch| {
//!         switch.init()?;
//!         switch.open()
//!     })?;
//! }
//!
//! #[interrupt]
//! fn GWCA1_DATA() {
//!     SWITCH.with(|switch| {
//!         let status = switch.data_interrupt_status();
//!         switch.acknowledge_data_interrupt(1);
//!     });
//! }
//! ```
//!
//! [`Switch`]: crate::driver::switch::Switch

mod primitives;
mod shared;

pub use primitives::CriticalSectionCell;
pub use shared::{SharedSwitch, SharedSwitchDefault, SharedSwitchSmall};
