//! Receive packet buffers

use crate::internal::constants::PKT_BUF_SZ_ALIGN;

/// One receive packet buffer, aligned for the switch DMA
#[repr(C, align(128))]
pub struct PacketBuffer {
    data: [u8; PKT_BUF_SZ_ALIGN],
}

impl PacketBuffer {
    /// Capacity in bytes
    pub const CAPACITY: usize = PKT_BUF_SZ_ALIGN;

    /// Create a zeroed buffer
    pub const fn new() -> Self {
        Self {
            data: [0; PKT_BUF_SZ_ALIGN],
        }
    }

    /// Buffer contents
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// CPU address of the first byte
    pub fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }
}

impl Default for PacketBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::constants::{PKT_BUF_ALIGN, PKT_BUF_SZ};

    #[test]
    fn buffers_are_aligned_and_large_enough() {
        let buffers = [PacketBuffer::new(), PacketBuffer::new()];
        for buffer in &buffers {
            assert_eq!(buffer.as_ptr() as usize % PKT_BUF_ALIGN, 0);
            assert!(buffer.as_slice().len() >= PKT_BUF_SZ);
        }
        assert_eq!(core::mem::size_of::<PacketBuffer>(), PacketBuffer::CAPACITY);
    }
}
