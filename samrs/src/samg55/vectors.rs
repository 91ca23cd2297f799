//! The complete SAMG55 vector table: architectural exceptions followed by
//! the peripheral interrupts.

use core::mem::size_of;

use crate::arm_m::exc::{self, default_handler, ExceptionTable, Handler,
                        ResetHandler};
use crate::samg55::irq::{self, InterruptTable};

/// The vector table as the processor sees it.
///
/// Applications declare one of these as a `static` in the `.vectors` section,
/// starting from `VectorTable::new` and overriding whichever handlers they
/// implement:
///
/// ```ignore
/// #[link_section = ".vectors"]
/// #[no_mangle]
/// pub static VECTORS: VectorTable = VectorTable {
///     interrupts: InterruptTable {
///         pioa: Some(button_pressed),
///         .. InterruptTable::new(default_handler)
///     },
///     .. VectorTable::new(stack_top, reset)
/// };
/// ```
#[repr(C)]
pub struct VectorTable {
    pub exceptions: ExceptionTable,
    pub interrupts: InterruptTable,
}

const _: () = assert!(size_of::<VectorTable>() == VectorTable::LEN * size_of::<usize>());

impl VectorTable {
    /// Total number of vector slots, the stack pointer included.
    pub const LEN: usize = exc::LEN + irq::COUNT;

    /// A table with the given stack and reset vector, and every handler slot
    /// bound to `default_handler`.
    pub const fn new(initial_stack: *const u32,
                     reset: ResetHandler) -> VectorTable {
        VectorTable {
            exceptions: ExceptionTable::new(initial_stack, reset),
            interrupts: InterruptTable::new(default_handler),
        }
    }

    /// The table as raw words, in the order the processor indexes it.
    pub fn words(&self) -> &[usize] {
        unsafe {
            core::slice::from_raw_parts(self as *const Self as *const usize,
                                        Self::LEN)
        }
    }

    /// The raw word in slot `k`.
    ///
    /// # Panics
    ///
    /// If `k` is not less than `LEN`.
    pub fn vector(&self, k: usize) -> usize {
        self.words()[k]
    }

    /// The handler bound to slot `k`, or `None` for a reserved slot.  Slots 0
    /// (stack pointer) and 1 (reset) are not `Handler`s and also give `None`,
    /// as does any `k` past the end of the table.
    pub fn handler(&self, k: usize) -> Option<Handler> {
        if k < 2 || k >= Self::LEN {
            return None;
        }
        unsafe { *(self as *const Self as *const Option<Handler>).add(k) }
    }

    /// The name of slot `k`, or `None` if it is reserved or out of range.
    pub fn name(k: usize) -> Option<&'static str> {
        if k < exc::LEN {
            exc::NAMES[k]
        } else {
            irq::SLOTS.get(k - exc::LEN)
                .filter(|slot| !slot.reserved)
                .map(|slot| slot.name)
        }
    }
}
