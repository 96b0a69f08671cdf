//! DMA memory model
//!
//! Everything the switch DMA reads from memory: descriptor records, the
//! base descriptor table, descriptor chains and receive buffers. All storage
//! is statically sized with const generics and must stay in place once its
//! address has been handed to the hardware.
//!
//! # Architecture
//!
//! - [`descriptor`]: record layouts and the `die_dt` type encoding
//! - [`chain`]: chains and the formatting protocol
//! - [`table`]: the switch-wide base descriptor table
//! - [`addr`]: bus addresses as carried in descriptors
//! - [`buffer`]: receive packet buffers
//!
//! # Example
//!
//! ```ignore
//! use rswitch_eth::dma::{Chain, Direction, RingLayout};
//!
//! // Transmit chain 1, 32 slots (31 data slots + link)
//! static mut TX: Chain<32> = Chain::new(1, Direction::Tx, RingLayout::Plain);
//! ```

pub mod addr;
pub mod buffer;
pub mod chain;
pub mod descriptor;
pub mod table;

pub use addr::PhysAddr;
pub use buffer::PacketBuffer;
pub use chain::{Chain, ChainRing, Direction, RingLayout};
pub use descriptor::bits::DescriptorType;
pub use descriptor::{
    Descriptor, DescriptorHeader, DmaDescriptor, ExtDescriptor, ExtTsDescriptor, Timestamp,
};
pub use table::BaseDescriptorTable;
