//! Centralized Constants
//!
//! This module provides a single source of truth for the magic numbers used
//! throughout the switch driver.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Topology**: agent and chain counts
//! - **Buffers**: packet buffer sizes and default ring depth
//! - **Timing**: register poll timeouts and intervals
//! - **Defaults**: fallback MAC addresses
//!
//! # Note
//!
//! Hardware register offsets and bit definitions remain in their respective
//! modules (`register/coma.rs`, `register/etha.rs`, etc.) as they are specific
//! to those hardware blocks.

// =============================================================================
// Topology
// =============================================================================

/// Number of Ethernet agents (TSN MAC ports)
pub const ETHA_PORT_COUNT: usize = 3;

/// Number of gateway CPU agents
pub const GWCA_PORT_COUNT: usize = 2;

/// Total number of switch ports (ETHA ports followed by GWCA ports)
pub const TOTAL_PORT_COUNT: usize = ETHA_PORT_COUNT + GWCA_PORT_COUNT;

/// Port number of the first gateway agent
pub const GWCA_FIRST_PORT: u8 = ETHA_PORT_COUNT as u8;

/// Descriptor chains reserved per MAC-facing port (one RX, one TX)
pub const CHAINS_PER_PORT: usize = 2;

/// Entries in the switch-wide base descriptor table
pub const BASE_DESCRIPTOR_COUNT: usize = ETHA_PORT_COUNT * CHAINS_PER_PORT;

/// Number of descriptor interrupt status/enable register banks
pub const DATA_IRQ_BANKS: usize = 4;

/// Chains covered by one descriptor interrupt register bank
pub const CHAINS_PER_IRQ_BANK: usize = 32;

// =============================================================================
// Buffers
// =============================================================================

/// Receive packet buffer size advertised in each receive descriptor
pub const PKT_BUF_SZ: usize = 1584;

/// Stride between receive buffers (buffer size rounded for DMA alignment)
pub const PKT_BUF_SZ_ALIGN: usize = 1792;

/// Alignment of receive packet buffers in bytes
pub const PKT_BUF_ALIGN: usize = 128;

/// Default number of descriptor slots per chain
pub const DEFAULT_RING_SIZE: usize = 32;

/// Smallest chain that still holds a data slot and its terminating link
pub const MIN_RING_SIZE: usize = 2;

// =============================================================================
// Timing
// =============================================================================

/// Default register poll timeout in milliseconds (one attempt per millisecond)
pub const REGISTER_TIMEOUT_MS: u32 = 1000;

/// Interval between register poll attempts in milliseconds
pub const POLL_INTERVAL_MS: u32 = 1;

/// Default SERDES handshake timeout in milliseconds
pub const SERDES_TIMEOUT_MS: u32 = 1000;

// =============================================================================
// Defaults
// =============================================================================

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// Fallback MAC addresses, indexed by ETHA port, used when the factory
/// registers read back as all-zero
pub const DEFAULT_MAC_ADDRESSES: [[u8; MAC_ADDR_LEN]; ETHA_PORT_COUNT] = [
    [0x74, 0x90, 0x50, 0x00, 0x00, 0x00],
    [0x74, 0x90, 0x50, 0x00, 0x00, 0x01],
    [0x74, 0x90, 0x50, 0x00, 0x00, 0x02],
];
