//! The architecturally defined part of the vector table, and the handler used
//! for every vector the application does not claim.

use crate::arm_m;

/// ARMvx-M interrupt and exception handlers are merely functions conforming to
/// the C ABI.
pub type Handler = extern "C" fn();

/// The reset vector is special: it must not return.  We can model this nicely
/// in Rust's type system as a diverging function.  We additionally mark the
/// reset handler as `unsafe` because it must do scary stuff, including zeroing
/// BSS.  Allowing a safe program to call it directly would be bad.
pub type ResetHandler = unsafe extern "C" fn() -> !;

/// Number of words in an `ExceptionTable`.
pub const LEN: usize = 16;

/// Represents an ARMvx-M exception table.  This is the common table of vectors
/// used for handling interrupts and initializing the processor on -M
/// processors.
///
/// Vectors are described using the `Handler` type, which is merely a function
/// reference, wrapped in `Option` so that the null pointer optimization stores
/// zero for `None`.  Only the reserved slots hold `None` in a table built by
/// `ExceptionTable::new`; every other slot starts out pointing at
/// `default_handler`.
///
/// Note that processors will typically have a *two-part* vector table: first
/// come the exception vectors (described here), immediately followed by
/// vendor-specific interrupt vectors handled through the NVIC.  The vendor
/// part lives with the SoC support.
#[repr(C)]
pub struct ExceptionTable {
    /// ARMvx-M processors load their initial stack pointer from the first word
    /// of the vector table.  This will be the contents of `sp` on entry to
    /// `reset` below.
    ///
    /// Remember that ARM uses a "full descending" stack, so `sp` points to the
    /// most recently *used* cell of the stack.  Thus, the initial `sp` when the
    /// stack is empty often points just past the end of RAM.  We model it here
    /// as a `const` pointer to discourage such an invalid address from being
    /// dereferenced.
    pub initial_stack: *const u32,

    /// Reset vector.  At reset, the processor loads its stack pointer from
    /// `initial_stack` (above) and then enters this function using the ARM
    /// AAPCS C ABI.
    pub reset: ResetHandler,

    // Architecturally defined exception vectors (i.e. those that are
    // vendor-independent) begin here.  The architectural vector table includes
    // five reserved entries.

    /// Non-Maskable Interrupt handler.
    pub nmi:          Option<Handler>,
    /// Hard Fault handler.
    pub hard_fault:   Option<Handler>,
    /// Memory Management Fault handler.
    pub mm_fault:     Option<Handler>,
    /// Bus Fault handler.
    pub bus_fault:    Option<Handler>,
    /// Usage Fault handler.
    pub usage_fault:  Option<Handler>,
    pub _reserved0:   Option<Handler>,
    pub _reserved1:   Option<Handler>,
    pub _reserved2:   Option<Handler>,
    pub _reserved3:   Option<Handler>,
    /// Supervisor Call (`SVC`) handler.
    pub sv_call:      Option<Handler>,
    /// Debug Monitor handler.
    pub debug_mon:    Option<Handler>,
    pub _reserved4:   Option<Handler>,
    /// PendSV handler.
    pub pend_sv:      Option<Handler>,
    /// SysTick handler.
    pub sys_tick:     Option<Handler>,
}

/// Names of the exception table slots, by position, as the device headers
/// spell them.  Reserved slots are `None`.
pub const NAMES: [Option<&str>; LEN] = [
    Some("InitialStack"),
    Some("Reset"),
    Some("NonMaskableInt"),
    Some("HardFault"),
    Some("MemoryManagement"),
    Some("BusFault"),
    Some("UsageFault"),
    None,
    None,
    None,
    None,
    Some("SVCall"),
    Some("DebugMonitor"),
    None,
    Some("PendSV"),
    Some("SysTick"),
];

impl ExceptionTable {
    /// An exception table with every handler slot bound to `default_handler`.
    /// Override individual slots with functional struct update syntax:
    ///
    /// ```ignore
    /// pub static EXCEPTIONS : ExceptionTable = ExceptionTable {
    ///     hard_fault: Some(my_hard_fault_handler),
    ///     .. ExceptionTable::new(stack_pointer, reset_handler)
    /// };
    /// ```
    ///
    /// Each named field is its own slot, so overriding one can't disturb
    /// another.
    pub const fn new(initial_stack: *const u32,
                     reset: ResetHandler) -> ExceptionTable {
        ExceptionTable {
            initial_stack,
            reset,

            nmi: Some(default_handler),
            hard_fault: Some(default_handler),
            mm_fault: Some(default_handler),
            bus_fault: Some(default_handler),
            usage_fault: Some(default_handler),
            _reserved0: None,
            _reserved1: None,
            _reserved2: None,
            _reserved3: None,
            sv_call: Some(default_handler),
            debug_mon: Some(default_handler),
            _reserved4: None,
            pend_sv: Some(default_handler),
            sys_tick: Some(default_handler),
        }
    }
}

/// Most programs will have at least one `ExceptionTable` `static`: the one that
/// gets deposited into ROM and read at processor startup.
///
/// To support a `static` `ExceptionTable`, the type must be `Sync`.  It is
/// *almost* `Sync` out of the box.  The exception: the pointer used for the
/// `initial_stack` item, which is never dereferenced by software.
unsafe impl Sync for ExceptionTable {}

/// The handler behind every vector the application doesn't bind.
///
/// Taking an exception nobody expected leaves the system in an unknown state,
/// so this doesn't try to recover: it stops at a breakpoint in debug builds
/// (so an attached debugger shows where things went wrong) and then spins
/// forever.
pub extern "C" fn default_handler() {
    arm_m::debug_breakpoint();
    halt()
}

/// Parks the processor in an idle loop that is never left.
#[inline(never)]
pub fn halt() -> ! {
    loop {
        core::hint::spin_loop()
    }
}
