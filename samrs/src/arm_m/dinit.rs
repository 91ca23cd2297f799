//! Static data initialization: getting `.data` and `.bss` into the state the
//! program image says they start in.
//!
//! The linker script describes the work as a table of `Segment` records
//! rather than as a fixed set of symbols, so the same code handles any number
//! of initialized or zeroed regions.

use core::ptr;

const WORD: usize = core::mem::size_of::<u32>();

/// One region of RAM to initialize.  Matches the three-word records the
/// linker script emits between `__dinit_start` and `__dinit_end`.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct Segment {
    /// Load image of the region's contents, or null if the region is to be
    /// zeroed.
    pub src: *const u32,
    /// Runtime address of the region.
    pub dst: *mut u32,
    /// Region size in bytes.  Need not be a multiple of the word size.
    pub len: usize,
}

impl Segment {
    /// A region copied from `src` to `dst`.
    pub const fn copy(src: *const u32, dst: *mut u32, len: usize) -> Segment {
        Segment { src, dst, len }
    }

    /// A region cleared to zero.
    pub const fn zero(dst: *mut u32, len: usize) -> Segment {
        Segment { src: ptr::null(), dst, len }
    }

    pub fn is_zero_fill(&self) -> bool {
        self.src.is_null()
    }

    /// Number of whole words the segment covers.
    pub fn words(&self) -> usize {
        self.len / WORD
    }

    /// Performs the copy or fill.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of `len` bytes, `src` (if not null) must
    /// be valid for reads of `len` bytes, both must be word-aligned, and the
    /// two must not overlap.  Nothing that lives in the destination may be in
    /// use.
    pub unsafe fn apply(&self) {
        // Volatile accesses only: the destination is memory the compiler
        // thinks is already initialized, so this must not be elided or turned
        // into a call that itself relies on initialized statics.
        let words = self.words();
        for i in 0..words {
            let word = if self.is_zero_fill() {
                0
            } else {
                ptr::read_volatile(self.src.add(i))
            };
            ptr::write_volatile(self.dst.add(i), word);
        }

        // Trailing partial word, a byte at a time.
        let src = self.src as *const u8;
        let dst = self.dst as *mut u8;
        for i in words * WORD..self.len {
            let byte = if self.is_zero_fill() {
                0
            } else {
                ptr::read_volatile(src.add(i))
            };
            ptr::write_volatile(dst.add(i), byte);
        }
    }
}

/// Applies every segment, in order.
///
/// # Safety
///
/// See `Segment::apply`.  This runs before the program's statics hold their
/// initial values, so it must not touch any.
pub unsafe fn initialize(segments: &[Segment]) {
    for segment in segments {
        segment.apply();
    }
}

/// Returns the segment table the linker script placed between `__dinit_start`
/// and `__dinit_end`.
///
/// # Safety
///
/// Only meaningful in an image linked with a script that defines those
/// symbols around a table of `Segment` records.
#[cfg(target_os = "none")]
pub unsafe fn linker_segments() -> &'static [Segment] {
    extern "C" {
        static __dinit_start: Segment;
        static __dinit_end: Segment;
    }

    let start = ptr::addr_of!(__dinit_start);
    let end = ptr::addr_of!(__dinit_end);
    core::slice::from_raw_parts(start, end.offset_from(start) as usize)
}
