//! Minimal SAMG55 application: the ROM vector table plus an entry point that
//! the boot core runs once the processor is up.
//!
//! Built for the host, it prints the vector map instead.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod app {
    use core::ptr::addr_of;

    use samrs::arm_m::exc::{self, ExceptionTable};
    use samrs::arm_m::startup::Hooks;
    use samrs::samg55::boot;
    use samrs::samg55::vectors::VectorTable;
    use samrs::samrs_init_hooks;

    extern "C" {
        /// Top of the stack, exported by the linker script.
        static _stack: u32;
    }

    /// Where the boot core hands over.  With `reinit_stack` this is reached
    /// through `Reset_Handler`; otherwise the reset vector points here.
    #[no_mangle]
    pub unsafe extern "C" fn samrs_reset() -> ! {
        boot::boot(&HOOKS, app)
    }

    static HOOKS: Hooks = Hooks {
        on_exit: Some(on_exit),
        ..Hooks::NONE
    };

    extern "C" fn on_exit() {
        log::warn!("application returned");
    }

    extern "C" fn announce() {
        log::info!("samg55-app starting");
    }

    samrs_init_hooks! {
        pub init_hook ANNOUNCE = announce;
    }

    fn app() {
        loop {
            core::hint::spin_loop()
        }
    }

    /// A fault means a bug; stop where a debugger can see it.
    extern "C" fn hard_fault() {
        exc::default_handler()
    }

    #[cfg(feature = "reinit_stack")]
    const RESET: exc::ResetHandler = boot::Reset_Handler;
    #[cfg(not(feature = "reinit_stack"))]
    const RESET: exc::ResetHandler = samrs_reset;

    /// The ROM vector table.  The linker script places `.vectors` first in
    /// flash and keeps it alive.
    #[no_mangle]
    #[link_section = ".vectors"]
    pub static ISR_VECTORS: VectorTable = VectorTable {
        exceptions: ExceptionTable {
            hard_fault: Some(hard_fault),
            ..ExceptionTable::new(unsafe { addr_of!(_stack) }, RESET)
        },
        ..VectorTable::new(unsafe { addr_of!(_stack) }, RESET)
    };
}

#[cfg(not(target_os = "none"))]
fn main() {
    use samrs::samg55::device::DEVICE;
    use samrs::samg55::vectors::VectorTable;

    println!("{}: {} vectors", DEVICE.name, VectorTable::LEN);
    for k in 0..VectorTable::LEN {
        match VectorTable::name(k) {
            Some(name) => println!("{:3} {:#06x} {}", k, k * 4, name),
            None => println!("{:3} {:#06x} (reserved)", k, k * 4),
        }
    }
}
