//! Support for the Microchip SAMG55 series of SoCs.

pub mod boot;
pub mod cmcc;
pub mod device;
pub mod irq;
pub mod vectors;
