//! Gateway CPU agent (GWCA) registers
//!
//! Mode control, descriptor chain configuration, rate limiting and the
//! descriptor interrupt banks. Offsets are relative to the GWCA block base.

use crate::internal::constants::CHAINS_PER_IRQ_BANK;

// =============================================================================
// Register Offsets
// =============================================================================

/// Agent mode control
pub const GWMC: usize = 0x0000;
/// Agent mode status
pub const GWMS: usize = 0x0004;
/// Multicast table reset
pub const GWMTIRM: usize = 0x0100;
/// VLAN control configuration
pub const GWVCC: usize = 0x0130;
/// Transmission timestamp function configuration
pub const GWTTFC: usize = 0x0138;
/// AXI RAM reset
pub const GWARIRM: usize = 0x0150;
/// Descriptor table base address, high bits
pub const GWDCBAC0: usize = 0x0194;
/// Descriptor table base address, low 32 bits
pub const GWDCBAC1: usize = 0x0198;
/// Receive chain enable, first bank
pub const GWTRC0: usize = 0x0200;
/// Descriptor chain configuration for chain 0
pub const GWDCC0: usize = 0x0400;
/// Global rate limiter configuration
pub const GWGRLC: usize = 0x0A00;
/// Global rate limiter upper limit configuration
pub const GWGRLULC: usize = 0x0A04;
/// Descriptor interrupt status, bank 0
pub const GWDIS0: usize = 0x1100;
/// Descriptor interrupt enable, bank 0
pub const GWDIE0: usize = 0x1104;
/// Descriptor interrupt disable, bank 0
pub const GWDID0: usize = 0x1108;

/// Distance between descriptor interrupt banks
pub const GWDI_BANK_STRIDE: usize = 0x10;

// =============================================================================
// Bits
// =============================================================================

/// VLAN egress mode: S-tagged
pub const GWVCC_VEM_SC_TAG: u32 = 0x3 << 16;

/// Start multicast table reset
pub const GWMTIRM_MTIOG: u32 = 1 << 0;
/// Multicast table reset done
pub const GWMTIRM_MTR: u32 = 1 << 1;

/// Start AXI RAM reset
pub const GWARIRM_ARIOG: u32 = 1 << 0;
/// AXI RAM reset done
pub const GWARIRM_ARR: u32 = 1 << 1;

/// GWDCC: latch base address when the chain is first read
pub const GWDCC_BALR: u32 = 1 << 24;
/// GWDCC: dequeue on timer (transmit chains)
pub const GWDCC_DQT: u32 = 1 << 11;
/// GWDCC: timestamp-extended descriptors
pub const GWDCC_ETS: u32 = 1 << 9;
/// GWDCC: descriptor interrupts enabled
pub const GWDCC_EDE: u32 = 1 << 8;

/// Rate limiter upper limit for 1 Gbps
pub const GWGRLULC_1G: u32 = 0x0000_005F;
/// Rate limiter configuration for 1 Gbps
pub const GWGRLC_1G: u32 = 0x0001_0260;

/// GWDCC register offset for `chain`
#[inline(always)]
pub const fn gwdcc(chain: u8) -> usize {
    GWDCC0 + chain as usize * 4
}

/// GWTRC bank offset and bit for `chain`
#[inline(always)]
pub const fn gwtrc(chain: u8) -> (usize, u32) {
    (GWTRC0 + (chain as usize / 32) * 4, 1 << (chain % 32))
}

/// Offset of `register` (one of `GWDIS0`, `GWDIE0`, `GWDID0`) in the bank
/// that serves `chain`, plus the chain's bit in that bank
#[inline(always)]
pub const fn data_irq(register: usize, chain: u8) -> (usize, u32) {
    (
        register + (chain as usize / CHAINS_PER_IRQ_BANK) * GWDI_BANK_STRIDE,
        1 << (chain as usize % CHAINS_PER_IRQ_BANK),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_registers_are_word_strided() {
        assert_eq!(gwdcc(0), GWDCC0);
        assert_eq!(gwdcc(5), GWDCC0 + 20);
    }

    #[test]
    fn data_irq_banks_split_every_32_chains() {
        assert_eq!(data_irq(GWDIE0, 1), (GWDIE0, 1 << 1));
        assert_eq!(data_irq(GWDIE0, 33), (GWDIE0 + GWDI_BANK_STRIDE, 1 << 1));
        assert_eq!(gwtrc(0), (GWTRC0, 1));
    }
}
