//! ISR-safe switch wrapper using critical sections.

use super::primitives::CriticalSectionCell;
use crate::driver::config::SwitchConfig;
use crate::driver::switch::Switch;
use crate::internal::constants::DEFAULT_RING_SIZE;

/// ISR-safe switch wrapper using critical sections.
///
/// All access goes through `critical_section::with()`, disabling interrupts
/// for the duration of the closure.
///
/// # Example
///
/// ```ignore
/// static SWITCH: SharedSwitch<Mmio, Delay, Gic> =
///     SharedSwitch::new(unsafe { Mmio::new() }, Delay, Gic, Spider::config());
///
/// SWITCH.with(|switch| switch.init())?;
/// ```
pub struct SharedSwitch<R, D, I, const RING: usize = DEFAULT_RING_SIZE> {
    inner: CriticalSectionCell<Switch<R, D, I, RING>>,
}

impl<R, D, I, const RING: usize> SharedSwitch<R, D, I, RING> {
    /// Create a new shared switch (const, suitable for static initialization).
    pub const fn new(regs: R, delay: D, irq: I, config: SwitchConfig) -> Self {
        Self {
            inner: CriticalSectionCell::new(Switch::new(regs, delay, irq, config)),
        }
    }

    /// Execute a closure with exclusive access to the switch.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut Switch<R, D, I, RING>) -> T,
    {
        self.inner.with(f)
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&mut Switch<R, D, I, RING>) -> T,
    {
        self.inner.try_with(f)
    }
}

/// Shared switch with the default ring size.
pub type SharedSwitchDefault<R, D, I> = SharedSwitch<R, D, I, DEFAULT_RING_SIZE>;

/// Shared switch with 8-entry rings for memory-constrained systems.
pub type SharedSwitchSmall<R, D, I> = SharedSwitch<R, D, I, 8>;

#[cfg(test)]
mod tests {
    extern crate std;
    use std::boxed::Box;

    use super::*;
    use crate::driver::config::State;
    use crate::testing::{MockDelay, MockIrq, MockRegisters, SimulatedSwitch};

    const BASE: usize = 0x0100_0000;

    type TestShared = SharedSwitch<MockRegisters, MockDelay, MockIrq, 4>;

    fn shared() -> Box<TestShared> {
        let config = SwitchConfig::new()
            .with_register_base(BASE)
            .with_register_timeout_ms(3)
            .with_serdes_timeout_ms(3);
        let sim = SimulatedSwitch::new(BASE);
        Box::new(SharedSwitch::new(
            sim.regs,
            MockDelay::new(),
            MockIrq::new(),
            config,
        ))
    }

    #[test]
    fn bring_up_through_critical_section() {
        let shared = shared();
        assert_eq!(shared.with(|switch| switch.state()), State::Uninitialized);

        shared.with(|switch| switch.init()).unwrap();
        shared.with(|switch| switch.open()).unwrap();

        assert_eq!(shared.with(|switch| switch.state()), State::Open);
        assert!(shared.with(|switch| switch.irq().enabled().contains(&320)));
    }

    #[test]
    fn try_with_fails_while_borrowed() {
        let shared = shared();
        let nested = shared.with(|_| shared.try_with(|switch| switch.state()));
        assert_eq!(nested, None);
        assert_eq!(
            shared.try_with(|switch| switch.state()),
            Some(State::Uninitialized)
        );
    }
}
