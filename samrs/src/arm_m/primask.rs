//! Interrupt masking through `PRIMASK`, and the scoped critical section built
//! on it.

use crate::arm_m;

/// Control over the processor's global interrupt enable.
///
/// The boot sequence only needs this in one place (the FPU enable), but it is
/// a trait so that code bracketing a critical section can be exercised
/// against something other than the real `PRIMASK`.
pub trait InterruptMask {
    /// Returns `true` if interrupts are currently enabled (`PRIMASK` clear).
    fn is_enabled(&self) -> bool;

    /// Masks all configurable-priority interrupts.
    fn disable(&self);

    /// Unmasks interrupts.
    fn enable(&self);
}

/// The executing processor's `PRIMASK`.
#[cfg(target_arch = "arm")]
pub struct Cpu;

#[cfg(target_arch = "arm")]
impl InterruptMask for Cpu {
    #[inline]
    fn is_enabled(&self) -> bool {
        cortex_m::register::primask::read().is_inactive()
    }

    #[inline]
    fn disable(&self) {
        cortex_m::interrupt::disable()
    }

    #[inline]
    fn enable(&self) {
        unsafe { cortex_m::interrupt::enable() }
    }
}

/// A critical section: interrupts are masked from `IrqGuard::new` until the
/// guard is dropped, at which point they are unmasked again *only if* they
/// were enabled when the guard was created.
///
/// Nesting guards is fine; only the outermost one re-enables.
#[must_use = "interrupts are re-enabled as soon as the guard is dropped"]
pub struct IrqGuard<'a, M: InterruptMask + ?Sized> {
    mask: &'a M,
    restore: bool,
}

impl<'a, M: InterruptMask + ?Sized> IrqGuard<'a, M> {
    pub fn new(mask: &'a M) -> Self {
        let restore = mask.is_enabled();
        mask.disable();
        arm_m::data_memory_barrier();
        IrqGuard { mask, restore }
    }

    /// Whether dropping this guard will unmask interrupts.
    pub fn will_restore(&self) -> bool {
        self.restore
    }
}

impl<'a, M: InterruptMask + ?Sized> Drop for IrqGuard<'a, M> {
    fn drop(&mut self) {
        if self.restore {
            arm_m::data_memory_barrier();
            self.mask.enable();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, FakeMask};

    #[test]
    fn guard_restores_enabled_state() {
        let mask = FakeMask::new(true);
        {
            let guard = IrqGuard::new(&mask);
            assert!(guard.will_restore());
            assert!(!mask.is_enabled());
        }
        assert!(mask.is_enabled());
    }

    #[test]
    fn guard_leaves_disabled_state_alone() {
        let mask = FakeMask::new(false);
        {
            let _guard = IrqGuard::new(&mask);
            assert!(!mask.is_enabled());
        }
        assert!(!mask.is_enabled());
        // Never touched the enable side.
        assert_eq!(testing::take_events(), ["irq_off"]);
    }

    #[test]
    fn nested_guards_restore_once() {
        let mask = FakeMask::new(true);
        {
            let _outer = IrqGuard::new(&mask);
            {
                let inner = IrqGuard::new(&mask);
                assert!(!inner.will_restore());
            }
            assert!(!mask.is_enabled());
        }
        assert!(mask.is_enabled());
        assert_eq!(testing::take_events(), ["irq_off", "irq_off", "irq_on"]);
    }

    #[test]
    fn early_return_still_restores() {
        fn bail_out(mask: &FakeMask) -> Option<()> {
            let _guard = IrqGuard::new(mask);
            None::<()>?;
            Some(())
        }

        let mask = FakeMask::new(true);
        assert_eq!(bail_out(&mask), None);
        assert!(mask.is_enabled());
    }
}
