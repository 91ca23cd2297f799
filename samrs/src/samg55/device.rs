//! Per-device configuration.
//!
//! Everything that differs between members of the family, or between link
//! configurations, is collected into one `DeviceConfig` selected by Cargo
//! features.  The reset sequence itself is the same for all of them.

use crate::samg55::cmcc::{CachePlan, CacheSize};
use crate::samg55::irq::{self, Slot};

pub struct DeviceConfig {
    /// Part number.
    pub name: &'static str,
    /// Number of peripheral interrupt slots, reserved ones included.
    pub irq_count: usize,
    /// The peripheral interrupt map, in table order.
    pub slots: &'static [Slot],
    pub has_fpu: bool,
    pub has_vtor: bool,
    /// Cache plans for the supported TCM carve-outs, keyed by TCM length in
    /// bytes.
    pub cache_classes: &'static [(u32, CachePlan)],
    /// Plan for any TCM length not listed, including none at all.
    pub cache_default: CachePlan,
}

impl DeviceConfig {
    /// Chooses what to do with the cache given `tcm_length` bytes of TCM.
    pub fn cache_plan(&self, tcm_length: u32) -> CachePlan {
        self.cache_classes.iter()
            .find(|&&(length, _)| length == tcm_length)
            .map(|&(_, plan)| plan)
            .unwrap_or(self.cache_default)
    }
}

// The SAMG55 has 4 KiB of cache memory.  With 3 KiB reserved, the cache gets
// the smallest size; with all 4 KiB reserved, there is nothing left to enable.
const SAMG55_CACHE_CLASSES: &[(u32, CachePlan)] = &[
    (0x800, CachePlan::Enable(CacheSize::Kb2)),
    (0xc00, CachePlan::Enable(CacheSize::Kb1)),
    (0x1000, CachePlan::LeaveDisabled),
];

pub const ATSAMG55G19: DeviceConfig = DeviceConfig {
    name: "ATSAMG55G19",
    irq_count: irq::COUNT,
    slots: irq::SLOTS,
    has_fpu: true,
    has_vtor: true,
    cache_classes: SAMG55_CACHE_CLASSES,
    cache_default: CachePlan::Enable(CacheSize::Kb4),
};

pub const ATSAMG55J19: DeviceConfig = DeviceConfig {
    name: "ATSAMG55J19",
    ..ATSAMG55G19
};

/// The device this build targets.
#[cfg(feature = "soc-samg55j19")]
pub const DEVICE: DeviceConfig = ATSAMG55J19;

/// The device this build targets.
#[cfg(not(feature = "soc-samg55j19"))]
pub const DEVICE: DeviceConfig = ATSAMG55G19;

#[cfg(any(all(feature = "tcm-2k", feature = "tcm-3k"),
          all(feature = "tcm-2k", feature = "tcm-4k"),
          all(feature = "tcm-3k", feature = "tcm-4k")))]
compile_error!("at most one of the tcm-* features may be enabled");

/// Bytes of cache memory the image reserves as TCM.
#[cfg(feature = "tcm-4k")]
pub const TCM_LENGTH: u32 = 0x1000;

/// Bytes of cache memory the image reserves as TCM.
#[cfg(all(feature = "tcm-3k", not(feature = "tcm-4k")))]
pub const TCM_LENGTH: u32 = 0xc00;

/// Bytes of cache memory the image reserves as TCM.
#[cfg(all(feature = "tcm-2k", not(any(feature = "tcm-3k", feature = "tcm-4k"))))]
pub const TCM_LENGTH: u32 = 0x800;

/// Bytes of cache memory the image reserves as TCM.
#[cfg(not(any(feature = "tcm-2k", feature = "tcm-3k", feature = "tcm-4k")))]
pub const TCM_LENGTH: u32 = 0;
