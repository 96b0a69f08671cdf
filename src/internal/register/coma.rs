//! Common agent (COMA) registers
//!
//! Switch-wide reset, per-agent clock gating and the buffer pool.

/// Reset control
pub const RRC: usize = 0x0004;
/// Clock enable (set bits to enable)
pub const RCEC: usize = 0x0008;
/// Clock disable (set bits to disable)
pub const RCDC: usize = 0x000C;
/// Buffer pool initialization
pub const CABPIRM: usize = 0x0140;

/// RRC: assert soft reset
pub const RRC_RR: u32 = 1 << 0;
/// RRC: release soft reset
pub const RRC_RR_CLR: u32 = 0;

/// RCEC: global clock enable, required alongside the per-port bit
pub const RCEC_RCE: u32 = 1 << 16;

/// CABPIRM: start buffer pool initialization
pub const CABPIRM_BPIOG: u32 = 1 << 0;
/// CABPIRM: buffer pool ready
pub const CABPIRM_BPR: u32 = 1 << 1;

/// Per-port clock bit in RCEC/RCDC
#[inline(always)]
pub const fn port_clock_bit(port: u8) -> u32 {
    1 << port
}
