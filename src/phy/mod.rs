//! Ethernet PHY bring-up
//!
//! The MAC port talks to an external clause-45 PHY over SGMII. The PHY layer
//! only depends on the [`Mdio45Bus`](crate::hal::mdio::Mdio45Bus) trait, so
//! it runs unchanged against the switch's station management interface or a
//! register model in tests.
//!
//! # Example
//!
//! ```ignore
//! use rswitch_eth::hal::mdio::Mdio45;
//! use rswitch_eth::phy::{PhyBringup, SgmiiPhy};
//!
//! let mut mdio = Mdio45::new(&mut bus, etha_base);
//! match SgmiiPhy::new(0).bring_up(&mut mdio)? {
//!     PhyBringup::AlreadySgmii => {}
//!     PhyBringup::ForcedSgmii => { /* SERDES was re-initialized */ }
//! }
//! ```

pub mod regs;
pub mod sgmii;

pub use sgmii::{PhyBringup, SgmiiPhy};
