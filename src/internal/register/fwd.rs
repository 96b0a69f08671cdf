//! Forwarding engine (FWD) registers
//!
//! Per-port forwarding behavior and destination bitmasks. Offsets are
//! relative to the switch window base.

/// Port configuration 0 for port 0
pub const FWPC00: usize = 0x0100;
/// Port configuration 1 for port 0
pub const FWPC10: usize = 0x0104;
/// Port based forwarding destination bitmask for port 0
pub const FWPBFC0: usize = 0x4A00;
/// Port based forwarding chain steering for GWCA 0, port 0
pub const FWPBFCSDC00: usize = 0x4A04;

/// Distance between per-port register groups
pub const FWD_PORT_STRIDE: usize = 0x10;

/// FWPC1: direct descriptor enable
pub const FWPC1_DDE: u32 = 1 << 0;

/// Default port forwarding behavior written to every port's FWPC0
pub const FWPC0_DEFAULT: u32 = (1 << 0)
    | (1 << 3)
    | (1 << 4)
    | (1 << 5)
    | (1 << 9)
    | (1 << 10)
    | (1 << 12)
    | (1 << 18)
    | (1 << 20)
    | (1 << 26)
    | (1 << 27)
    | (1 << 28);

/// FWPC0 offset for `port`
#[inline(always)]
pub const fn fwpc0(port: u8) -> usize {
    FWPC00 + port as usize * FWD_PORT_STRIDE
}

/// FWPC1 offset for `port`
#[inline(always)]
pub const fn fwpc1(port: u8) -> usize {
    FWPC10 + port as usize * FWD_PORT_STRIDE
}

/// FWPBFC offset for `port`
#[inline(always)]
pub const fn fwpbfc(port: u8) -> usize {
    FWPBFC0 + port as usize * FWD_PORT_STRIDE
}

/// FWPBFCSDC offset for GWCA index `gwca` on source `port`
#[inline(always)]
pub const fn fwpbfcsdc(gwca: u8, port: u8) -> usize {
    FWPBFCSDC00 + port as usize * FWD_PORT_STRIDE + gwca as usize * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_behavior_bits() {
        assert_eq!(FWPC0_DEFAULT, 0x1C14_1639);
    }

    #[test]
    fn steering_register_is_per_gateway_within_port() {
        assert_eq!(fwpbfcsdc(0, 0), FWPBFCSDC00);
        assert_eq!(fwpbfcsdc(1, 0), FWPBFCSDC00 + 4);
        assert_eq!(fwpbfcsdc(1, 2), FWPBFCSDC00 + 0x20 + 4);
        assert_eq!(fwpbfc(4), FWPBFC0 + 0x40);
    }
}
