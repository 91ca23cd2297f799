//! Boot core for Cortex-M4 SAMG55 parts: the ROM vector table, the reset
//! sequence that brings the processor up to the application's entry point,
//! and the default handler behind every vector the application leaves alone.
//!
//! The crate is split the same way the hardware is:
//!
//! - `arm_m` covers what every ARMv7-M core has (exception table, SCB, the
//!   staged reset sequencer, data initialization).
//! - `samg55` covers the vendor part (peripheral interrupt map, cache
//!   controller, per-device configuration, and the `boot` wiring).

#![cfg_attr(not(test), no_std)]

#![deny(
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    )]

#[macro_use]
pub mod bits;

pub mod arm_m;

#[cfg(feature = "soc-family-samg55")]
pub mod samg55;

#[cfg(all(target_os = "none", not(feature = "app_panic_handler")))]
mod lang;

#[cfg(test)]
mod testing;
