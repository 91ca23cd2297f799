//! The reset sequence for ARMv7-M bare metal targets.
//!
//! Bring-up is a fixed series of stages.  Each stage is a method on a
//! `Sequencer` whose type parameter names the stage just completed, and each
//! method consumes the sequencer and hands back one for the next stage:
//!
//! ```ignore
//! Sequencer::new(hw, &config, &hooks)   // Reset
//!     .configure_cache()                // CacheConfigured
//!     .initialize_data(segments)        // DataInitialized
//!     .install_vector_base(vectors)     // VectorBaseInstalled
//!     .initialize_runtime(init_hooks)   // RuntimeInitialized
//!     .run(main)                        // Terminal
//!     .idle()
//! ```
//!
//! so skipping, repeating, or reordering a stage does not type-check.  The
//! stage markers are zero-sized; none of this exists at runtime.
//!
//! Nothing here can fail in a way it could report: there is no one to report
//! to yet.  Absent hooks are skipped, and hardware that never comes ready
//! hangs the boot.

use core::marker::PhantomData;

use log::{debug, trace};

use crate::arm_m;
use crate::arm_m::dinit::{self, Segment};
use crate::arm_m::exc;
use crate::arm_m::primask::InterruptMask;
use crate::arm_m::scb::Scb;

/// Optional application callbacks around the reset sequence.
pub type Hook = extern "C" fn();

/// The startup routine can call functions after data is initialized, but
/// before main.  Functions must be of this type.
pub type InitHook = extern "C" fn();

/// The application entry point.  It receives nothing; if it returns, the
/// sequencer runs the exit hook and idles.
pub type Main = fn();

/// The application's optional lifecycle hooks.  Any of them may be absent.
#[derive(Copy, Clone)]
pub struct Hooks {
    /// Runs first thing after reset, before the FPU, cache, or statics are
    /// set up.  It must not touch any `static` with a non-zero initializer
    /// or rely on `.bss` being zero.
    pub on_reset: Option<Hook>,
    /// Runs after the runtime is initialized, just before `main`.
    pub on_bootstrap: Option<Hook>,
    /// Runs if `main` returns.
    pub on_exit: Option<Hook>,
}

impl Hooks {
    /// No hooks at all.
    pub const NONE: Hooks = Hooks {
        on_reset: None,
        on_bootstrap: None,
        on_exit: None,
    };
}

#[inline]
fn call(hook: Option<Hook>) {
    if let Some(f) = hook {
        f()
    }
}

/// The device's instruction cache, as far as reset is concerned: given how
/// much of the cache memory is reserved as tightly-coupled memory, put the
/// cache into its boot configuration.
pub trait InstructionCache {
    fn configure(&self, tcm_length: u32);
}

/// Build-time choices that shape the reset sequence.
#[derive(Copy, Clone, Debug)]
pub struct BootConfig {
    /// Grant the FPU access before anything else runs.  Only wanted when the
    /// image contains floating point instructions.
    pub fpu: bool,
    /// Bytes of cache memory reserved as TCM.
    pub tcm_length: u32,
    /// The core has a relocatable vector table (`VTOR`).
    pub vtor: bool,
}

/// The hardware the sequencer drives.
pub struct Hardware<'a, M: ?Sized, C: ?Sized> {
    pub scb: &'a Scb,
    pub mask: &'a M,
    pub cache: &'a C,
}

/// Stage marker: fresh out of reset.
pub enum Reset {}
/// Stage marker: FPU access granted and cache configured.
pub enum CacheConfigured {}
/// Stage marker: `.data` and `.bss` hold their initial values.
pub enum DataInitialized {}
/// Stage marker: `VTOR` points at the vector table.
pub enum VectorBaseInstalled {}
/// Stage marker: init hooks and the bootstrap hook have run.
pub enum RuntimeInitialized {}

/// Drives the reset sequence.  `S` is the last completed stage.
pub struct Sequencer<'a, M: ?Sized, C: ?Sized, S> {
    hw: Hardware<'a, M, C>,
    config: &'a BootConfig,
    hooks: &'a Hooks,
    _stage: PhantomData<S>,
}

impl<'a, M, C, S> Sequencer<'a, M, C, S>
    where M: InterruptMask + ?Sized,
          C: InstructionCache + ?Sized,
{
    fn advance<T>(self) -> Sequencer<'a, M, C, T> {
        Sequencer {
            hw: self.hw,
            config: self.config,
            hooks: self.hooks,
            _stage: PhantomData,
        }
    }
}

impl<'a, M, C> Sequencer<'a, M, C, Reset>
    where M: InterruptMask + ?Sized,
          C: InstructionCache + ?Sized,
{
    pub fn new(hw: Hardware<'a, M, C>,
               config: &'a BootConfig,
               hooks: &'a Hooks) -> Self {
        Sequencer { hw, config, hooks, _stage: PhantomData }
    }

    /// Runs the application's `on_reset` hook, turns on the FPU if
    /// configured, and sets up the instruction cache.
    pub fn configure_cache(self) -> Sequencer<'a, M, C, CacheConfigured> {
        call(self.hooks.on_reset);

        if self.config.fpu {
            self.hw.scb.enable_fpu(self.hw.mask);
        }

        self.hw.cache.configure(self.config.tcm_length);
        self.advance()
    }
}

impl<'a, M, C> Sequencer<'a, M, C, CacheConfigured>
    where M: InterruptMask + ?Sized,
          C: InstructionCache + ?Sized,
{
    /// Copies initialized data into place and zeroes the rest.
    ///
    /// # Safety
    ///
    /// See `dinit::initialize`.
    pub unsafe fn initialize_data(self, segments: &[Segment])
        -> Sequencer<'a, M, C, DataInitialized>
    {
        dinit::initialize(segments);

        // Statics are valid from here on, including the logging facade's.
        debug!("data initialized ({} segments)", segments.len());
        self.advance()
    }
}

impl<'a, M, C> Sequencer<'a, M, C, DataInitialized>
    where M: InterruptMask + ?Sized,
          C: InstructionCache + ?Sized,
{
    /// Points `VTOR` at the vector table's runtime address, if the core has
    /// one.
    pub fn install_vector_base(self, base: u32)
        -> Sequencer<'a, M, C, VectorBaseInstalled>
    {
        if self.config.vtor {
            self.hw.scb.set_vector_table_offset(base);
            trace!("vector table at {:#010x}", base);
        }
        self.advance()
    }
}

impl<'a, M, C> Sequencer<'a, M, C, VectorBaseInstalled>
    where M: InterruptMask + ?Sized,
          C: InstructionCache + ?Sized,
{
    /// Runs the init hooks in link order, then the application's
    /// `on_bootstrap` hook.
    pub fn initialize_runtime(self, init_hooks: &[InitHook])
        -> Sequencer<'a, M, C, RuntimeInitialized>
    {
        for hook in init_hooks {
            hook();
        }
        trace!("{} init hooks run", init_hooks.len());

        call(self.hooks.on_bootstrap);
        self.advance()
    }
}

impl<'a, M, C> Sequencer<'a, M, C, RuntimeInitialized>
    where M: InterruptMask + ?Sized,
          C: InstructionCache + ?Sized,
{
    /// Enters the application.  Should `main` return, runs the `on_exit`
    /// hook and hands back the `Terminal` state.
    pub fn run(self, main: Main) -> Terminal {
        debug!("entering application");
        main();

        debug!("application returned");
        call(self.hooks.on_exit);
        Terminal { _private: () }
    }
}

/// The state after the application has returned.  The only thing left to do
/// is `idle`.
pub struct Terminal {
    _private: (),
}

impl Terminal {
    /// Stops at a breakpoint in debug builds, then spins forever.
    pub fn idle(self) -> ! {
        arm_m::debug_breakpoint();
        exc::halt()
    }
}

/// Defines one or more init hooks, which are functions that will be called
/// after the basic Rust runtime invariants have been established, but before
/// main.
///
/// Syntax:
///
/// ```ignore
/// extern "C" fn my_init_hook() {
///     activate_lasers()
/// }
///
/// samrs_init_hooks! {
///     pub init_hook MY_INIT_HOOK = my_init_hook;
/// }
/// ```
#[macro_export]
macro_rules! samrs_init_hooks {
    (
        $(
            $(#[$m:meta])*
            pub init_hook $name:ident = $f:path;
        )*
    ) => {
        $(
            $(#[$m])*
            #[link_section = ".samrs_init_array"]
            #[used]
            pub static $name : $crate::arm_m::startup::InitHook = $f;
        )*
    };
}

/// Returns the init hooks the linker collected from `.samrs_init_array`.
///
/// # Safety
///
/// Only meaningful in an image linked with a script that defines
/// `_samrs_init_array_start` and `_samrs_init_array_end` around that section.
#[cfg(target_os = "none")]
pub unsafe fn linker_init_hooks() -> &'static [InitHook] {
    extern "C" {
        static _samrs_init_array_start: InitHook;
        static _samrs_init_array_end: InitHook;
    }

    let start = core::ptr::addr_of!(_samrs_init_array_start);
    let end = core::ptr::addr_of!(_samrs_init_array_end);
    core::slice::from_raw_parts(start, end.offset_from(start) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use crate::testing::{self, FakeMask, RegisterBlock};

    const SCB_SIZE: usize = 0x8c;
    const VTOR_OFFSET: usize = 0x08;
    const CPACR_OFFSET: usize = 0x88;

    struct FakeCache {
        tcm_length: Cell<Option<u32>>,
    }

    impl FakeCache {
        fn new() -> Self {
            FakeCache { tcm_length: Cell::new(None) }
        }
    }

    impl InstructionCache for FakeCache {
        fn configure(&self, tcm_length: u32) {
            testing::record("cache");
            self.tcm_length.set(Some(tcm_length));
        }
    }

    extern "C" fn on_reset() { testing::record("on_reset") }
    extern "C" fn on_bootstrap() { testing::record("on_bootstrap") }
    extern "C" fn on_exit() { testing::record("on_exit") }
    extern "C" fn first_init() { testing::record("init 1") }
    extern "C" fn second_init() { testing::record("init 2") }
    fn app() { testing::record("main") }

    const ALL_HOOKS: Hooks = Hooks {
        on_reset: Some(on_reset),
        on_bootstrap: Some(on_bootstrap),
        on_exit: Some(on_exit),
    };

    const CONFIG: BootConfig = BootConfig {
        fpu: true,
        tcm_length: 0x800,
        vtor: true,
    };

    fn scb(block: &RegisterBlock) -> Scb {
        unsafe { Scb::at(block.address()) }
    }

    #[test]
    fn stages_run_in_order() {
        let block = RegisterBlock::new(SCB_SIZE);
        let scb = scb(&block);
        let mask = FakeMask::new(true);
        let cache = FakeCache::new();

        let image = [0x1111_1111u32, 0x2222_2222, 0x3333_3333];
        let mut data = [0u32; 3];
        let mut bss = [0xffff_ffffu32; 2];
        let segments = [
            Segment::copy(image.as_ptr(), data.as_mut_ptr(), 12),
            Segment::zero(bss.as_mut_ptr(), 8),
        ];

        let hw = Hardware { scb: &scb, mask: &mask, cache: &cache };
        let _terminal = unsafe {
            Sequencer::new(hw, &CONFIG, &ALL_HOOKS)
                .configure_cache()
                .initialize_data(&segments)
        }
            .install_vector_base(0x0040_0000)
            .initialize_runtime(&[first_init, second_init])
            .run(app);

        assert_eq!(testing::take_events(), [
            "on_reset",
            "irq_off", "irq_on",
            "cache",
            "init 1", "init 2",
            "on_bootstrap",
            "main",
            "on_exit",
        ]);
        assert_eq!(data, image);
        assert_eq!(bss, [0, 0]);
        assert_eq!(cache.tcm_length.get(), Some(0x800));
        assert_eq!(block.at(CPACR_OFFSET).get(), 0xf << 20);
        assert_eq!(block.at(VTOR_OFFSET).get(), 0x0040_0000);
        assert!(mask.is_enabled());
    }

    #[test]
    fn absent_hooks_are_skipped() {
        let block = RegisterBlock::new(SCB_SIZE);
        let scb = scb(&block);
        let mask = FakeMask::new(false);
        let cache = FakeCache::new();

        let hw = Hardware { scb: &scb, mask: &mask, cache: &cache };
        let _terminal = unsafe {
            Sequencer::new(hw, &CONFIG, &Hooks::NONE)
                .configure_cache()
                .initialize_data(&[])
        }
            .install_vector_base(0x2000_0000)
            .initialize_runtime(&[])
            .run(app);

        assert_eq!(testing::take_events(), ["irq_off", "cache", "main"]);
        assert!(!mask.is_enabled());
    }

    #[test]
    fn optional_hardware_steps_can_be_left_out() {
        let block = RegisterBlock::new(SCB_SIZE);
        block.at(VTOR_OFFSET).set(0x0040_0000);
        let scb = scb(&block);
        let mask = FakeMask::new(true);
        let cache = FakeCache::new();
        let config = BootConfig { fpu: false, tcm_length: 0, vtor: false };

        let hw = Hardware { scb: &scb, mask: &mask, cache: &cache };
        let _terminal = unsafe {
            Sequencer::new(hw, &config, &Hooks::NONE)
                .configure_cache()
                .initialize_data(&[])
        }
            .install_vector_base(0x2000_0000)
            .initialize_runtime(&[])
            .run(app);

        assert_eq!(testing::take_events(), ["cache", "main"]);
        assert_eq!(block.at(CPACR_OFFSET).get(), 0);
        assert_eq!(block.at(VTOR_OFFSET).get(), 0x0040_0000);
        assert_eq!(cache.tcm_length.get(), Some(0));
    }

    #[test]
    fn returning_main_reaches_terminal_after_exit_hook() {
        let block = RegisterBlock::new(SCB_SIZE);
        let scb = scb(&block);
        let mask = FakeMask::new(true);
        let cache = FakeCache::new();
        let hooks = Hooks { on_exit: Some(on_exit), ..Hooks::NONE };
        let config = BootConfig { fpu: false, ..CONFIG };

        let hw = Hardware { scb: &scb, mask: &mask, cache: &cache };
        let running = unsafe {
            Sequencer::new(hw, &config, &hooks)
                .configure_cache()
                .initialize_data(&[])
        }
            .install_vector_base(0)
            .initialize_runtime(&[]);
        let _ = testing::take_events();

        let _terminal: Terminal = running.run(app);
        assert_eq!(testing::take_events(), ["main", "on_exit"]);
    }
}
