//! The SAMG55 vector layout, checked against the device datasheet.

use samrs::arm_m::exc;
use samrs::samg55::device::DEVICE;
use samrs::samg55::irq::{self, SLOTS};
use samrs::samg55::vectors::VectorTable;

const RESERVED: &[u8] = &[
    7, 10, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46,
];

#[test]
fn table_size() {
    assert_eq!(irq::COUNT, 50);
    assert_eq!(DEVICE.irq_count, irq::COUNT);
    assert_eq!(VectorTable::LEN, 66);
    assert_eq!(core::mem::size_of::<VectorTable>(),
               66 * core::mem::size_of::<usize>());
}

#[test]
fn reserved_positions() {
    let reserved: Vec<u8> = SLOTS.iter()
        .filter(|s| s.reserved)
        .map(|s| s.irqn)
        .collect();
    assert_eq!(reserved, RESERVED);
}

#[test]
fn exception_names() {
    let names: Vec<_> = (0..exc::LEN).map(VectorTable::name).collect();
    assert_eq!(names, [
        Some("InitialStack"), Some("Reset"), Some("NonMaskableInt"),
        Some("HardFault"), Some("MemoryManagement"), Some("BusFault"),
        Some("UsageFault"), None, None, None, None, Some("SVCall"),
        Some("DebugMonitor"), None, Some("PendSV"), Some("SysTick"),
    ]);
}

fn peripheral_names() -> Vec<&'static str> {
    SLOTS.iter().filter(|s| !s.reserved).map(|s| s.name).collect()
}

#[cfg(not(feature = "legacy_names"))]
#[test]
fn peripheral_names_in_order() {
    assert_eq!(peripheral_names(), [
        "SUPC", "RSTC", "RTC", "RTT", "WDT", "PMC", "EFC",
        "FLEXCOM0", "FLEXCOM1", "PIOA", "PIOB", "PDMIC0", "FLEXCOM2",
        "MEM2MEM", "I2SC0", "I2SC1", "PDMIC1", "FLEXCOM3", "FLEXCOM4",
        "FLEXCOM5", "FLEXCOM6",
        "TC0_CH0", "TC0_CH1", "TC0_CH2", "TC1_CH0", "TC1_CH1", "TC1_CH2",
        "ADC", "UHP", "UDP", "CRCCU",
    ]);
}

#[cfg(feature = "legacy_names")]
#[test]
fn peripheral_names_in_order() {
    assert_eq!(peripheral_names(), [
        "SUPC", "RSTC", "RTC", "RTT", "WDT", "PMC", "EFC",
        "FLEXCOM0", "FLEXCOM1", "PIOA", "PIOB", "PDMIC0", "FLEXCOM2",
        "MEM2MEM", "I2SC0", "I2SC1", "PDMIC1", "FLEXCOM3", "FLEXCOM4",
        "FLEXCOM5", "FLEXCOM6",
        "TC0", "TC1", "TC2", "TC3", "TC4", "TC5",
        "ADC", "UHP", "UDP", "CRCCU",
    ]);
}

#[test]
fn slot_positions_in_full_table() {
    assert_eq!(VectorTable::name(16), Some("SUPC"));
    assert_eq!(VectorTable::name(16 + 29), Some("ADC"));
    assert_eq!(VectorTable::name(16 + 7), None);
    assert_eq!(VectorTable::name(65), Some("CRCCU"));
}
