#![no_std]
//! Blocking I2C master transaction layer over a vendor bus driver.
//!
//! Wraps a platform-supplied master-bus driver with typed bus and device
//! handles, pin-map based bus configuration, timed register transfers, and
//! per-bus diagnostics. The vendor driver is a trait seam ([`MasterDriver`])
//! so the layer runs against the real peripheral on target and against a
//! mock in tests.

mod bus;
mod config;
mod device;
mod diag;
mod driver;
mod error;
mod hal;
mod transfer;

pub use bus::I2cBus;
pub use config::{
    BusConfig, BusOptions, ClockSource, PinAssignment, PinMap, Port,
    REFERENCE_PIN_MAP,
};
pub use device::{DeviceAddress, I2cDevice, DEFAULT_TIMEOUT_MS};
#[cfg(feature = "defmt")]
pub use diag::DefmtDiag;
pub use diag::{DiagLevel, DiagSink, NullDiag};
pub use driver::{MasterDriver, TransferError};
pub use error::Error;
pub use hal::HalDevice;
pub use transfer::MAX_REGISTER_WRITE;
