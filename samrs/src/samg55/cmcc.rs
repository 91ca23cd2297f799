//! Cortex-M Cache Controller (CMCC) support.
//!
//! On the SAMG55 the CMCC fronts flash with a small instruction cache whose
//! memory can be partly given over to tightly-coupled memory (TCM).  How much
//! goes to TCM is a link-time decision, so reset has to size the cache to
//! match.

use bitflags::bitflags;

use crate::arm_m::reg::Reg;
use crate::arm_m::startup::InstructionCache;
use crate::bits::BitsResult;
use crate::samg55::device::DEVICE;

#[repr(C)]
#[allow(dead_code)]
struct Registers {
    type_:     Reg<u32>,
    cfg:       Reg<u32>,
    ctrl:      Reg<u32>,
    sr:        Reg<u32>,
    _reserved: [Reg<u32>; 4],
    maint0:    Reg<u32>,
    maint1:    Reg<u32>,
    mcfg:      Reg<u32>,
    men:       Reg<u32>,
    mctrl:     Reg<u32>,
    msr:       Reg<u32>,
}

const CMCC_ADDRESS : usize = 0x4007c000;

bitflags! {
    /// Control register.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct Ctrl: u32 {
        /// Cache enable.
        const CEN = 1 << 0;
    }
}

bitflags! {
    /// Status register.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct Sr: u32 {
        /// Cache controller status: set while the cache is (still) enabled.
        const CSTS = 1 << 0;
    }
}

bit_wrappers! {
    /// Configuration register.
    pub struct Cfg(pub u32);
}

bit_enums! {
    /// Programmable cache size (`PRGCSIZE`).
    pub bit_enum CacheSize {
        Kb1 = 0,
        Kb2 = 1,
        Kb4 = 2,
        Kb8 = 3,
    }
}

impl Cfg {
    bitfield_accessors! {
        pub [6:4] get_prgcsize / with_prgcsize: CacheSize,
    }
}

/// What reset should do with the cache, given the TCM carve-out.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CachePlan {
    /// Size the cache and turn it on.
    Enable(CacheSize),
    /// Leave the cache off and its size untouched.  Used when the whole
    /// cache memory has been handed to TCM.
    LeaveDisabled,
}

/// What `Cmcc::apply` actually did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Enabled(CacheSize),
    LeftDisabled,
    /// The controller still reported itself enabled after being disabled, so
    /// its configuration was left alone (and the cache off) for this boot.
    Busy,
}

/// Driver for the cache controller.
pub struct Cmcc {
    reg: *const Registers,
}

unsafe impl Sync for Cmcc {}

/// Shared static instance of the `Cmcc` driver.
pub static CMCC : Cmcc = Cmcc { reg: CMCC_ADDRESS as *const Registers };

impl Cmcc {
    /// Points a driver at a register block at `address`.  Only useful for
    /// exercising the driver against memory that stands in for the CMCC.
    #[cfg(test)]
    pub(crate) const unsafe fn at(address: usize) -> Cmcc {
        Cmcc { reg: address as *const Registers }
    }

    fn reg(&self) -> &Registers {
        unsafe { &*self.reg }
    }

    pub fn read_ctrl(&self) -> Ctrl {
        Ctrl::from_bits_retain(self.reg().ctrl.get())
    }

    pub fn write_ctrl(&self, v: Ctrl) {
        self.reg().ctrl.set(v.bits())
    }

    pub fn update_ctrl<F: FnOnce(Ctrl) -> Ctrl>(&self, f: F) {
        self.write_ctrl(f(self.read_ctrl()))
    }

    pub fn read_sr(&self) -> Sr {
        Sr::from_bits_retain(self.reg().sr.get())
    }

    pub fn read_cfg(&self) -> Cfg {
        Cfg(self.reg().cfg.get())
    }

    pub fn write_cfg(&self, v: Cfg) {
        self.reg().cfg.set(v.0)
    }

    /// The currently programmed cache size.
    pub fn cache_size(&self) -> BitsResult<CacheSize> {
        self.read_cfg().get_prgcsize()
    }

    pub fn is_enabled(&self) -> bool {
        self.read_ctrl().contains(Ctrl::CEN)
    }

    /// Disables the cache, then carries out `plan`.
    ///
    /// The size can only be changed while the controller reports itself
    /// disabled.  The status is sampled once; if it still reads enabled, the
    /// size write and the re-enable are both skipped.
    pub fn apply(&self, plan: CachePlan) -> Outcome {
        self.update_ctrl(|c| c - Ctrl::CEN);

        if self.read_sr().contains(Sr::CSTS) {
            return Outcome::Busy;
        }

        match plan {
            CachePlan::Enable(size) => {
                self.write_cfg(Cfg(0).with_prgcsize(size));
                self.update_ctrl(|c| c | Ctrl::CEN);
                Outcome::Enabled(size)
            }
            CachePlan::LeaveDisabled => Outcome::LeftDisabled,
        }
    }
}

impl InstructionCache for Cmcc {
    fn configure(&self, tcm_length: u32) {
        let _ = self.apply(DEVICE.cache_plan(tcm_length));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BadBits;
    use crate::testing::RegisterBlock;

    const CFG_OFFSET: usize = 0x04;
    const CTRL_OFFSET: usize = 0x08;
    const SR_OFFSET: usize = 0x0c;

    fn fake_cmcc() -> (RegisterBlock, Cmcc) {
        assert_eq!(core::mem::size_of::<Registers>(), 0x38);
        let block = RegisterBlock::new(core::mem::size_of::<Registers>());
        // Out of reset the cache is on.
        block.at(CTRL_OFFSET).set(1);
        let cmcc = unsafe { Cmcc::at(block.address()) };
        (block, cmcc)
    }

    #[test]
    fn enable_plans_program_size_and_reenable() {
        for &size in &[CacheSize::Kb1, CacheSize::Kb2, CacheSize::Kb4] {
            let (block, cmcc) = fake_cmcc();

            assert_eq!(cmcc.apply(CachePlan::Enable(size)),
                       Outcome::Enabled(size));
            assert_eq!(cmcc.cache_size(), Ok(size));
            assert!(cmcc.is_enabled());
            assert_eq!(block.at(CFG_OFFSET).get(), (size as u32) << 4);
        }
    }

    #[test]
    fn leave_disabled_plan_keeps_cache_off() {
        let (block, cmcc) = fake_cmcc();
        block.at(CFG_OFFSET).set(0x20);

        assert_eq!(cmcc.apply(CachePlan::LeaveDisabled), Outcome::LeftDisabled);
        assert!(!cmcc.is_enabled());
        assert_eq!(block.at(CTRL_OFFSET).get(), 0);
        // Size untouched.
        assert_eq!(block.at(CFG_OFFSET).get(), 0x20);
    }

    #[test]
    fn busy_status_skips_configuration() {
        let (block, cmcc) = fake_cmcc();
        block.at(SR_OFFSET).set(1);

        assert_eq!(cmcc.apply(CachePlan::Enable(CacheSize::Kb2)), Outcome::Busy);
        assert_eq!(block.at(CFG_OFFSET).get(), 0);
        assert!(!cmcc.is_enabled());
    }

    #[test]
    fn tcm_length_selects_size_class() {
        let cases = [
            (0x800, Some(CacheSize::Kb2)),
            (0xc00, Some(CacheSize::Kb1)),
            (0x1000, None),
            (0, Some(CacheSize::Kb4)),
            (0x400, Some(CacheSize::Kb4)),
        ];

        for &(tcm_length, expected) in &cases {
            let (_block, cmcc) = fake_cmcc();
            cmcc.configure(tcm_length);

            match expected {
                Some(size) => {
                    assert!(cmcc.is_enabled(), "tcm {:#x}", tcm_length);
                    assert_eq!(cmcc.cache_size(), Ok(size));
                }
                None => assert!(!cmcc.is_enabled(), "tcm {:#x}", tcm_length),
            }
        }
    }

    #[test]
    fn unknown_size_pattern_is_reported() {
        assert_eq!(Cfg(0b100 << 4).get_prgcsize(), Err(BadBits(0b100)));
    }
}
