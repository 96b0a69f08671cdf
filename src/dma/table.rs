//! Switch-wide base descriptor table
//!
//! One plain record per possible chain of the MAC-facing ports. The gateway
//! agent reads the table from `GWDCBAC0/1`; entry `i` either ends the
//! sequence or links to the first slot of chain `i`.

use crate::dma::addr::PhysAddr;
use crate::dma::descriptor::bits::dt;
use crate::dma::descriptor::{Descriptor, DescriptorHeader, DmaDescriptor};
use crate::driver::error::{DmaError, DmaResult};
use crate::internal::constants::BASE_DESCRIPTOR_COUNT;

/// Base descriptor table
#[repr(C, align(8))]
pub struct BaseDescriptorTable {
    entries: [Descriptor; BASE_DESCRIPTOR_COUNT],
}

impl BaseDescriptorTable {
    /// Create a table with every entry ending the sequence
    pub const fn new() -> Self {
        Self {
            entries: [const { Descriptor::end_of_sequence() }; BASE_DESCRIPTOR_COUNT],
        }
    }

    /// Number of entries
    pub const fn len(&self) -> usize {
        BASE_DESCRIPTOR_COUNT
    }

    /// Whether the table has no entries
    pub const fn is_empty(&self) -> bool {
        BASE_DESCRIPTOR_COUNT == 0
    }

    /// Mark every entry end-of-sequence
    pub fn fill_end_of_sequence(&self) {
        for entry in &self.entries {
            entry.clear();
            entry.header().set_die_dt(dt::EOS);
        }
    }

    /// Point entry `index` at a chain starting at `target`
    pub fn link(&self, index: u8, target: PhysAddr) -> DmaResult<()> {
        if !target.fits_descriptor() {
            return Err(DmaError::AddressOutOfRange);
        }
        let entry = self
            .entries
            .get(usize::from(index))
            .ok_or(DmaError::ChainIndexOutOfRange)?;
        entry.header().set_pointer(target);
        entry.header().set_die_dt(dt::LINKFIX);
        Ok(())
    }

    /// Header of entry `index`
    pub fn entry(&self, index: usize) -> Option<&DescriptorHeader> {
        self.entries.get(index).map(|e| e.header())
    }

    /// CPU address of the first entry
    pub fn as_ptr(&self) -> *const u8 {
        self.entries.as_ptr().cast()
    }
}

impl Default for BaseDescriptorTable {
    fn default() -> Self {
        Self::new()
    }
}
