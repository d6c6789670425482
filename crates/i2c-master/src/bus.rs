use portable_atomic::{AtomicBool, Ordering};

use crate::config::{BusConfig, BusOptions, PinMap, Port};
use crate::device::{DeviceAddress, I2cDevice};
use crate::diag::{DiagLevel, DiagSink};
use crate::driver::MasterDriver;
use crate::error::Error;

/// One slot per port. A set slot means some `I2cBus` currently owns that
/// port's peripheral.
static PORT_OPEN: [AtomicBool; Port::COUNT] =
    [AtomicBool::new(false), AtomicBool::new(false)];

/// An open master bus: the vendor driver, its bus handle, and the
/// diagnostics sink bound at construction.
///
/// Single-threaded per bus: transfers take `&mut self` and perform no
/// internal locking. Callers sharing a bus across threads must serialize
/// access externally.
pub struct I2cBus<D: MasterDriver, S: DiagSink> {
    pub(crate) driver: D,
    pub(crate) raw: Option<D::BusHandle>,
    pub(crate) port: Port,
    pub(crate) sink: S,
    attached: usize,
}

impl<D: MasterDriver, S: DiagSink> I2cBus<D, S> {
    /// Open the bus on `port`, resolving pins through `pin_map`.
    ///
    /// Exactly one bus may be open per port; a second open returns
    /// [`Error::PortAlreadyOpen`]. On a driver init failure the port is
    /// released again so the open can be retried.
    pub fn open(
        mut driver: D,
        port: Port,
        pin_map: &PinMap,
        options: BusOptions,
        mut sink: S,
    ) -> Result<Self, Error<D::Fault>> {
        let slot = &PORT_OPEN[port.index()];
        if slot
            .compare_exchange(
                false,
                true,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return Err(Error::PortAlreadyOpen);
        }

        let pins = match pin_map.pins_for(port) {
            Some(pins) if pins.scl != pins.sda => pins,
            _ => {
                slot.store(false, Ordering::Release);
                return Err(Error::InvalidPin);
            }
        };

        let config = BusConfig { port, pins, options };
        match driver.new_bus(&config) {
            Ok(raw) => {
                sink.message(
                    DiagLevel::Info,
                    format_args!(
                        "i2c: port {} open, scl {} sda {}",
                        port.number(),
                        pins.scl,
                        pins.sda
                    ),
                );
                Ok(Self { driver, raw: Some(raw), port, sink, attached: 0 })
            }
            Err(fault) => {
                slot.store(false, Ordering::Release);
                sink.message(
                    DiagLevel::Info,
                    format_args!("i2c: port {} open failed", port.number()),
                );
                Err(Error::HardwareInitFailed(fault))
            }
        }
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn is_open(&self) -> bool {
        self.raw.is_some()
    }

    /// Number of devices currently attached.
    pub fn attached_devices(&self) -> usize {
        self.attached
    }

    /// Tear the bus down and release the port.
    ///
    /// Safe to call on an already-closed handle; the second call returns
    /// [`Error::PortNotOpen`]. A teardown fault is fatal for this handle:
    /// it stays closed and the port stays reserved, so nothing reopens a
    /// half-dead peripheral.
    pub fn close(&mut self) -> Result<(), Error<D::Fault>> {
        let raw = self.raw.take().ok_or(Error::PortNotOpen)?;
        if self.attached > 0 {
            self.sink.message(
                DiagLevel::Warn,
                format_args!(
                    "i2c: port {} closing with {} devices attached",
                    self.port.number(),
                    self.attached
                ),
            );
        }
        match self.driver.del_bus(raw) {
            Ok(()) => {
                PORT_OPEN[self.port.index()].store(false, Ordering::Release);
                self.sink.message(
                    DiagLevel::Info,
                    format_args!("i2c: port {} closed", self.port.number()),
                );
                Ok(())
            }
            Err(fault) => {
                self.sink.message(
                    DiagLevel::Info,
                    format_args!(
                        "i2c: port {} teardown failed",
                        self.port.number()
                    ),
                );
                Err(Error::HardwareTeardownFailed(fault))
            }
        }
    }

    /// Register a device address on this bus.
    ///
    /// The address must lie outside the 7-bit reserved ranges (or within
    /// 10-bit width). `timeout_ms` bounds every transfer to this device.
    pub fn attach(
        &mut self,
        address: DeviceAddress,
        timeout_ms: u32,
    ) -> Result<I2cDevice<D>, Error<D::Fault>> {
        let raw_bus = self.raw.as_mut().ok_or(Error::BusNotOpen)?;
        if !address.is_valid() {
            return Err(Error::AddressOutOfRange);
        }
        let raw = self
            .driver
            .add_device(raw_bus, address)
            .map_err(Error::BusFault)?;
        self.attached += 1;
        Ok(I2cDevice::new(raw, self.port, address, timeout_ms))
    }

    /// Release a device registration. The bus itself is unaffected.
    pub fn detach(&mut self, device: I2cDevice<D>) {
        self.driver.remove_device(device.into_raw());
        self.attached = self.attached.saturating_sub(1);
    }
}

impl<D: MasterDriver, S: DiagSink> Drop for I2cBus<D, S> {
    fn drop(&mut self) {
        // Best-effort teardown for handles dropped while open. Mirrors
        // close(): the port is only released when teardown succeeds.
        if let Some(raw) = self.raw.take() {
            if self.driver.del_bus(raw).is_ok() {
                PORT_OPEN[self.port.index()].store(false, Ordering::Release);
            }
        }
    }
}
