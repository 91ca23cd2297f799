//! Host-side stand-ins for the hardware the boot core touches.

use std::cell::{Cell, RefCell};

use crate::arm_m::primask::InterruptMask;
use crate::arm_m::reg::Reg;

thread_local! {
    static EVENTS: RefCell<Vec<&'static str>> = RefCell::new(Vec::new());
}

/// Appends `event` to this thread's event log.  Hooks are plain `extern "C"`
/// functions with no context, so they report through here.
pub fn record(event: &'static str) {
    EVENTS.with(|e| e.borrow_mut().push(event))
}

/// Drains this thread's event log.
pub fn take_events() -> Vec<&'static str> {
    EVENTS.with(|e| e.borrow_mut().split_off(0))
}

/// An `InterruptMask` that is just a flag, logging every change.
pub struct FakeMask {
    enabled: Cell<bool>,
}

impl FakeMask {
    pub fn new(enabled: bool) -> Self {
        let _ = take_events();
        FakeMask { enabled: Cell::new(enabled) }
    }
}

impl InterruptMask for FakeMask {
    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn disable(&self) {
        record("irq_off");
        self.enabled.set(false)
    }

    fn enable(&self) {
        record("irq_on");
        self.enabled.set(true)
    }
}

/// A run of 32-bit registers in host memory, standing in for a peripheral's
/// register block.  Drivers are pointed at `address()`.
pub struct RegisterBlock {
    words: Vec<Reg<u32>>,
}

impl RegisterBlock {
    pub fn new(bytes: usize) -> Self {
        RegisterBlock {
            words: (0..bytes / 4).map(|_| Reg::new(0)).collect(),
        }
    }

    pub fn address(&self) -> usize {
        self.words.as_ptr() as usize
    }

    /// The register at byte `offset` from the start of the block.
    pub fn at(&self, offset: usize) -> &Reg<u32> {
        &self.words[offset / 4]
    }
}
