//! Support for memory-mapped registers of various sizes.

use core::cell::UnsafeCell;
use core::ptr::{read_volatile, write_volatile};

/// A register whose contents can be represented as `T`.  The contents are
/// accessed using `volatile` operations only, ensuring that apparently dead
/// loads and stores are not optimized away.
///
/// Memory-mapped registers are the ultimate ambient authority, and are
/// inherently shared.  Thus, registers (like cells) can be mutated through a
/// shared reference `&`, and a unique reference `&mut` to a register is not
/// particularly meaningful.  Transitively, the same applies to structs that
/// group registers together, as in a memory-mapped peripheral.
#[repr(transparent)]
pub struct Reg<T> {
    value: UnsafeCell<T>,
}

impl<T: Copy> Reg<T> {
    /// Creates a register cell holding `value`.  Real registers are never
    /// constructed this way; this exists so that a register block can be
    /// backed by ordinary memory (e.g. when exercising a driver off-target).
    pub const fn new(value: T) -> Self {
        Reg { value: UnsafeCell::new(value) }
    }

    /// Reads the contents of the register using a volatile load.
    #[inline]
    pub fn get(&self) -> T {
        unsafe { read_volatile(self.value.get()) }
    }

    /// Replaces the contents of the register using a volatile store.
    #[inline]
    pub fn set(&self, value: T) {
        unsafe { write_volatile(self.value.get(), value) }
    }

    #[inline]
    pub fn update<F: FnOnce(T) -> T>(&self, f: F) {
        self.set(f(self.get()))
    }
}
