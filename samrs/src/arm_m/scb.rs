//! ARMv7-M System Control Block support.

use crate::arm_m;
use crate::arm_m::primask::{InterruptMask, IrqGuard};
use crate::arm_m::reg::Reg;

#[repr(C)]
#[allow(dead_code)]
struct Registers {
    cpuid:   Reg<u32>,
    icsr:    Reg<u32>,
    vtor:    Reg<u32>,
    aircr:   Reg<u32>,
    scr:     Reg<u32>,
    ccr:     Reg<u32>,
    shpr:    [Reg<u32>; 3],
    shcsr:   Reg<u32>,
    cfsr:    Reg<u32>,
    hfsr:    Reg<u32>,
    dfsr:    Reg<u32>,
    mmfar:   Reg<u32>,
    bfar:    Reg<u32>,
    afsr:    Reg<u32>,

    _reserved:   [Reg<u32>; 18],

    cpacr:   Reg<u32>,
}

const SCB_ADDRESS : usize = 0xe000ed00;

/// Bits of `VTOR` that hold the table offset.  The table must be aligned to
/// at least 128 bytes (more, for parts with many vectors), so the low seven
/// bits are always zero.
pub const VTOR_TBLOFF_MASK: u32 = 0xffff_ff80;

/// Driver for the System Control Block.
pub struct Scb {
    reg: *const Registers,
}

unsafe impl Sync for Scb {}

/// Shared static instance of the `Scb` driver.
pub static SCB : Scb = Scb { reg: SCB_ADDRESS as *const Registers };

bit_wrappers! {
    /// Coprocessor Access Control Register.
    pub struct Cpacr(pub u32);
}

bit_enums! {
    pub bit_enum CpAccess {
        None = 0b00,
        Privileged = 0b01,
        Full = 0b11,
    }
}

impl Cpacr {
    bitfield_accessors! {
        pub [23:22] get_cp11 / with_cp11: CpAccess,
        pub [21:20] get_cp10 / with_cp10: CpAccess,
    }
}

macro_rules! reg_accessors {
    ($name:ident, $ty:ident, $read:ident, $write:ident, $update:ident) => {
        pub fn $read(&self) -> $ty {
            $ty(self.reg().$name.get())
        }

        pub fn $write(&self, v: $ty) {
            self.reg().$name.set(v.0)
        }

        pub fn $update<F: FnOnce($ty) -> $ty>(&self, f: F) {
            self.$write(f(self.$read()))
        }
    };
}

impl Scb {
    /// Points a driver at a register block at `address`.  Only useful for
    /// exercising the driver against memory that stands in for the SCB.
    #[cfg(test)]
    pub(crate) const unsafe fn at(address: usize) -> Scb {
        Scb { reg: address as *const Registers }
    }

    fn reg(&self) -> &Registers {
        unsafe { &*self.reg }
    }

    reg_accessors!(cpacr, Cpacr, read_cpacr, write_cpacr, update_cpacr);

    /// Reads the current vector table base address.
    pub fn vector_table_offset(&self) -> u32 {
        self.reg().vtor.get()
    }

    /// Moves the vector table to `base`, which is truncated to the alignment
    /// `VTOR` can express.  Takes effect for the next exception taken.
    pub fn set_vector_table_offset(&self, base: u32) {
        self.reg().vtor.set(base & VTOR_TBLOFF_MASK);
        arm_m::data_synchronization_barrier();
    }

    /// Grants full access to the FPU (coprocessors 10 and 11).
    ///
    /// The read-modify-write of `CPACR` happens with interrupts masked, and
    /// the interrupt-enable state on return matches the state on entry.  The
    /// barriers ensure no floating point instruction can issue before the
    /// access change is in effect.
    pub fn enable_fpu<M: InterruptMask + ?Sized>(&self, mask: &M) {
        let _irq = IrqGuard::new(mask);
        self.update_cpacr(|v| v.with_cp11(CpAccess::Full)
                              .with_cp10(CpAccess::Full));
        arm_m::data_synchronization_barrier();
        arm_m::instruction_synchronization_barrier();
    }
}
