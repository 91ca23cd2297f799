//! Support for ARMv7-M processors, independent of any particular vendor.

pub mod dinit;
pub mod exc;
pub mod primask;
pub mod reg;
pub mod scb;
pub mod startup;

#[cfg(not(target_arch = "arm"))]
use core::sync::atomic::{fence, Ordering};

/// Generates an instruction synchronization barrier (`ISB`) instruction.
#[inline]
pub fn instruction_synchronization_barrier() {
    #[cfg(target_arch = "arm")]
    cortex_m::asm::isb();
    #[cfg(not(target_arch = "arm"))]
    fence(Ordering::SeqCst);
}

/// Generates a data synchronization barrier (`DSB`): completes once every
/// explicit memory access before it, register writes included, has finished.
#[inline]
pub fn data_synchronization_barrier() {
    #[cfg(target_arch = "arm")]
    cortex_m::asm::dsb();
    #[cfg(not(target_arch = "arm"))]
    fence(Ordering::SeqCst);
}

/// Generates a data memory barrier (`DMB`).
#[inline]
pub fn data_memory_barrier() {
    #[cfg(target_arch = "arm")]
    cortex_m::asm::dmb();
    #[cfg(not(target_arch = "arm"))]
    fence(Ordering::SeqCst);
}

/// Stops at a software breakpoint in debug builds, so that an attached
/// debugger lands on the code that is about to hang.  Release builds and
/// off-target builds skip it.
#[inline]
pub fn debug_breakpoint() {
    #[cfg(all(target_arch = "arm", debug_assertions))]
    cortex_m::asm::bkpt();
}
