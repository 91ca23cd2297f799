//! Reset for the SAMG55: the generic sequencer from `arm_m::startup`, driven
//! with this part's SCB, cache controller, and linker-provided layout.
//!
//! An application points its reset vector at a function of its own that
//! calls `boot`:
//!
//! ```ignore
//! #[no_mangle]
//! pub unsafe extern "C" fn samrs_reset() -> ! {
//!     samg55::boot::boot(&HOOKS, app)
//! }
//! ```
//!
//! With the `reinit_stack` feature, the reset vector should instead be
//! `Reset_Handler`, which reloads `sp` from `_stack` (for restarts where the
//! hardware-loaded value can't be trusted, e.g. a debugger jumping to the
//! reset vector) and then branches to the application's `samrs_reset`.

use crate::arm_m::startup::BootConfig;
use crate::samg55::device::{self, DEVICE};

/// Whether this image was compiled to use hardware floating point
/// instructions.  True for the hard-float ABI, and also for soft-float ABI
/// builds that enable an FP extension (the `softfp` arrangement).
pub const FP_INSTRUCTIONS: bool = cfg!(any(
    target_abi = "eabihf",
    target_feature = "vfp2",
    target_feature = "vfp3",
    target_feature = "vfp4",
    target_feature = "fp-armv8",
));

/// The FPU needs enabling when the part has one and the code will use it.
pub const fn wants_fpu(cpu_has_fpu: bool, fp_instructions: bool) -> bool {
    cpu_has_fpu && fp_instructions
}

/// The reset sequence's configuration for this build.
pub const BOOT_CONFIG: BootConfig = BootConfig {
    fpu: wants_fpu(cfg!(feature = "cpu-cortex-m4f") && DEVICE.has_fpu,
                   FP_INSTRUCTIONS),
    tcm_length: device::TCM_LENGTH,
    vtor: DEVICE.has_vtor,
};

#[cfg(target_os = "none")]
pub use self::target::*;

#[cfg(target_os = "none")]
mod target {
    use core::ptr::addr_of;

    use crate::arm_m::dinit;
    use crate::arm_m::primask::Cpu;
    use crate::arm_m::scb::SCB;
    use crate::arm_m::startup::{self, Hardware, Hooks, Main, Sequencer};
    use crate::samg55::cmcc::CMCC;

    use super::BOOT_CONFIG;

    /// Runs the reset sequence and then `main`.  Never returns: if `main`
    /// does, this runs `hooks.on_exit` and idles.
    ///
    /// # Safety
    ///
    /// Must be called exactly once, from the reset vector, before anything
    /// else has run.
    pub unsafe fn boot(hooks: &Hooks, main: Main) -> ! {
        extern "C" {
            static __svectors: u32;
        }

        let hw = Hardware { scb: &SCB, mask: &Cpu, cache: &CMCC };

        Sequencer::new(hw, &BOOT_CONFIG, hooks)
            .configure_cache()
            .initialize_data(dinit::linker_segments())
            .install_vector_base(addr_of!(__svectors) as u32)
            .initialize_runtime(startup::linker_init_hooks())
            .run(main)
            .idle()
    }

    #[cfg(feature = "reinit_stack")]
    core::arch::global_asm!(
        ".section .text.Reset_Handler,\"ax\",%progbits",
        ".global Reset_Handler",
        ".type Reset_Handler,%function",
        ".thumb_func",
        "Reset_Handler:",
        "    ldr r0, =_stack",
        "    mov sp, r0",
        "    b samrs_reset",
        ".ltorg",
        ".size Reset_Handler, . - Reset_Handler",
    );

    #[cfg(feature = "reinit_stack")]
    #[allow(non_snake_case)]
    extern "C" {
        /// Reloads `sp` from `_stack`, then branches to `samrs_reset`.
        pub fn Reset_Handler() -> !;
    }
}
