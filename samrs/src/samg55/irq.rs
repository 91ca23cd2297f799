//! Interrupt map for the SAMG55.
//!
//! The peripheral half of the vector table, its per-slot names, and the slot
//! count are all generated from one list per naming scheme, so the table's
//! layout can't drift away from the descriptions used to check it.

/// Re-export the type used for interrupt vectors on ARMv7-M.
pub use crate::arm_m::exc::Handler;

/// Describes one peripheral interrupt slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Slot {
    /// Interrupt number, i.e. position after the 16 exception slots.
    pub irqn: u8,
    /// Vector name as used by the device headers.
    pub name: &'static str,
    /// Reserved slots are never raised and hold zero.
    pub reserved: bool,
}

/// Declares the vendor-specific vector table from an ordered slot list.
///
/// Each entry is `irqn => kind field "NAME",` where `kind` is `vector` or
/// `reserved`.  Produces `InterruptTable` (one field per entry, in order),
/// `InterruptTable::new`, `SLOTS`, and `COUNT`, plus compile-time checks that
/// the numbering is dense and the table is exactly `COUNT` words.
macro_rules! device_vectors {
    (@bind vector, $default:ident) => { Some($default) };
    (@bind reserved, $default:ident) => { None };
    (@reserved vector) => { false };
    (@reserved reserved) => { true };

    (
        $(
            $(#[$m:meta])*
            $irqn:literal => $kind:ident $field:ident $name:literal,
        )*
    ) => {
        /// The SAMG55's vendor-specific (NVIC) vector table.  This is separate
        /// from the ARMv7-M Exception Table, and must be placed immediately
        /// after it in ROM or RAM.
        #[repr(C)]
        pub struct InterruptTable {
            $(
                $(#[$m])*
                pub $field: Option<Handler>,
            )*
        }

        impl InterruptTable {
            /// An `InterruptTable` with every vector bound to `default` and
            /// every reserved slot zero.  Override individual vectors with
            /// struct update syntax:
            ///
            /// ```ignore
            /// static VECTOR_TABLE : InterruptTable = InterruptTable {
            ///     adc: Some(my_adc_handler),
            ///     .. InterruptTable::new(default_handler)
            /// };
            /// ```
            pub const fn new(default: Handler) -> InterruptTable {
                InterruptTable {
                    $( $field: device_vectors!(@bind $kind, default), )*
                }
            }
        }

        /// Every peripheral slot, in table order.
        pub const SLOTS: &[Slot] = &[
            $(
                Slot {
                    irqn: $irqn,
                    name: $name,
                    reserved: device_vectors!(@reserved $kind),
                },
            )*
        ];
    };
}

#[cfg(not(feature = "legacy_names"))]
device_vectors! {
    /// Supply Controller
    0 => vector supc "SUPC",
    /// Reset Controller
    1 => vector rstc "RSTC",
    /// Real-time Clock
    2 => vector rtc "RTC",
    /// Real-time Timer
    3 => vector rtt "RTT",
    /// Watchdog Timer
    4 => vector wdt "WDT",
    /// Power Management Controller
    5 => vector pmc "PMC",
    /// Embedded Flash Controller
    6 => vector efc "EFC",
    7 => reserved _reserved7 "Reserved7",
    /// Flexible Serial Communication 0
    8 => vector flexcom0 "FLEXCOM0",
    /// Flexible Serial Communication 1
    9 => vector flexcom1 "FLEXCOM1",
    10 => reserved _reserved10 "Reserved10",
    /// Parallel Input/Output Controller A
    11 => vector pioa "PIOA",
    /// Parallel Input/Output Controller B
    12 => vector piob "PIOB",
    /// Pulse Density Modulation Interface Controller 0
    13 => vector pdmic0 "PDMIC0",
    /// Flexible Serial Communication 2
    14 => vector flexcom2 "FLEXCOM2",
    /// Memory to Memory
    15 => vector mem2mem "MEM2MEM",
    /// Inter-IC Sound Controller 0
    16 => vector i2sc0 "I2SC0",
    /// Inter-IC Sound Controller 1
    17 => vector i2sc1 "I2SC1",
    /// Pulse Density Modulation Interface Controller 1
    18 => vector pdmic1 "PDMIC1",
    /// Flexible Serial Communication 3
    19 => vector flexcom3 "FLEXCOM3",
    /// Flexible Serial Communication 4
    20 => vector flexcom4 "FLEXCOM4",
    /// Flexible Serial Communication 5
    21 => vector flexcom5 "FLEXCOM5",
    /// Flexible Serial Communication 6
    22 => vector flexcom6 "FLEXCOM6",
    /// Timer/Counter 0 Channel 0
    23 => vector tc0_ch0 "TC0_CH0",
    /// Timer/Counter 0 Channel 1
    24 => vector tc0_ch1 "TC0_CH1",
    /// Timer/Counter 0 Channel 2
    25 => vector tc0_ch2 "TC0_CH2",
    /// Timer/Counter 1 Channel 0
    26 => vector tc1_ch0 "TC1_CH0",
    /// Timer/Counter 1 Channel 1
    27 => vector tc1_ch1 "TC1_CH1",
    /// Timer/Counter 1 Channel 2
    28 => vector tc1_ch2 "TC1_CH2",
    /// Analog-to-Digital Converter
    29 => vector adc "ADC",
    30 => reserved _reserved30 "Reserved30",
    31 => reserved _reserved31 "Reserved31",
    32 => reserved _reserved32 "Reserved32",
    33 => reserved _reserved33 "Reserved33",
    34 => reserved _reserved34 "Reserved34",
    35 => reserved _reserved35 "Reserved35",
    36 => reserved _reserved36 "Reserved36",
    37 => reserved _reserved37 "Reserved37",
    38 => reserved _reserved38 "Reserved38",
    39 => reserved _reserved39 "Reserved39",
    40 => reserved _reserved40 "Reserved40",
    41 => reserved _reserved41 "Reserved41",
    42 => reserved _reserved42 "Reserved42",
    43 => reserved _reserved43 "Reserved43",
    44 => reserved _reserved44 "Reserved44",
    45 => reserved _reserved45 "Reserved45",
    46 => reserved _reserved46 "Reserved46",
    /// USB Host Port
    47 => vector uhp "UHP",
    /// USB Device Port
    48 => vector udp "UDP",
    /// Cyclic Redundancy Check Calculation Unit
    49 => vector crccu "CRCCU",
}

// Older device headers name the six timer vectors per TC instance rather than
// per channel.  Same slots, same order.
#[cfg(feature = "legacy_names")]
device_vectors! {
    /// Supply Controller
    0 => vector supc "SUPC",
    /// Reset Controller
    1 => vector rstc "RSTC",
    /// Real-time Clock
    2 => vector rtc "RTC",
    /// Real-time Timer
    3 => vector rtt "RTT",
    /// Watchdog Timer
    4 => vector wdt "WDT",
    /// Power Management Controller
    5 => vector pmc "PMC",
    /// Embedded Flash Controller
    6 => vector efc "EFC",
    7 => reserved _reserved7 "Reserved7",
    /// Flexible Serial Communication 0
    8 => vector flexcom0 "FLEXCOM0",
    /// Flexible Serial Communication 1
    9 => vector flexcom1 "FLEXCOM1",
    10 => reserved _reserved10 "Reserved10",
    /// Parallel Input/Output Controller A
    11 => vector pioa "PIOA",
    /// Parallel Input/Output Controller B
    12 => vector piob "PIOB",
    /// Pulse Density Modulation Interface Controller 0
    13 => vector pdmic0 "PDMIC0",
    /// Flexible Serial Communication 2
    14 => vector flexcom2 "FLEXCOM2",
    /// Memory to Memory
    15 => vector mem2mem "MEM2MEM",
    /// Inter-IC Sound Controller 0
    16 => vector i2sc0 "I2SC0",
    /// Inter-IC Sound Controller 1
    17 => vector i2sc1 "I2SC1",
    /// Pulse Density Modulation Interface Controller 1
    18 => vector pdmic1 "PDMIC1",
    /// Flexible Serial Communication 3
    19 => vector flexcom3 "FLEXCOM3",
    /// Flexible Serial Communication 4
    20 => vector flexcom4 "FLEXCOM4",
    /// Flexible Serial Communication 5
    21 => vector flexcom5 "FLEXCOM5",
    /// Flexible Serial Communication 6
    22 => vector flexcom6 "FLEXCOM6",
    /// Timer Counter 0
    23 => vector tc0 "TC0",
    /// Timer Counter 1
    24 => vector tc1 "TC1",
    /// Timer Counter 2
    25 => vector tc2 "TC2",
    /// Timer Counter 3
    26 => vector tc3 "TC3",
    /// Timer Counter 4
    27 => vector tc4 "TC4",
    /// Timer Counter 5
    28 => vector tc5 "TC5",
    /// Analog-to-Digital Converter
    29 => vector adc "ADC",
    30 => reserved _reserved30 "Reserved30",
    31 => reserved _reserved31 "Reserved31",
    32 => reserved _reserved32 "Reserved32",
    33 => reserved _reserved33 "Reserved33",
    34 => reserved _reserved34 "Reserved34",
    35 => reserved _reserved35 "Reserved35",
    36 => reserved _reserved36 "Reserved36",
    37 => reserved _reserved37 "Reserved37",
    38 => reserved _reserved38 "Reserved38",
    39 => reserved _reserved39 "Reserved39",
    40 => reserved _reserved40 "Reserved40",
    41 => reserved _reserved41 "Reserved41",
    42 => reserved _reserved42 "Reserved42",
    43 => reserved _reserved43 "Reserved43",
    44 => reserved _reserved44 "Reserved44",
    45 => reserved _reserved45 "Reserved45",
    46 => reserved _reserved46 "Reserved46",
    /// USB Host Port
    47 => vector uhp "UHP",
    /// USB Device Port
    48 => vector udp "UDP",
    /// Cyclic Redundancy Check Calculation Unit
    49 => vector crccu "CRCCU",
}

/// Number of peripheral interrupt slots.
pub const COUNT: usize = SLOTS.len();

const _: () = {
    let mut i = 0;
    while i < COUNT {
        assert!(SLOTS[i].irqn as usize == i, "interrupt slots out of order");
        i += 1;
    }
    assert!(core::mem::size_of::<InterruptTable>()
                == COUNT * core::mem::size_of::<Option<Handler>>(),
            "interrupt table doesn't match slot list");
};
