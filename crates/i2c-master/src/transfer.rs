//! Transfer operations: register reads, raw reads, and writes.
//!
//! All operations block until the driver completes or the device timeout
//! elapses. Failures are logged and returned, never escalated; retry
//! policy belongs to the caller.

use heapless::Vec;

use crate::bus::I2cBus;
use crate::device::I2cDevice;
use crate::diag::{DiagLevel, DiagSink};
use crate::driver::{MasterDriver, TransferError};
use crate::error::Error;

/// Largest payload `write_register` can carry after the register byte.
pub const MAX_REGISTER_WRITE: usize = 32;

impl<D: MasterDriver, S: DiagSink> I2cBus<D, S> {
    /// Write the register address, then read `buf.len()` bytes under a
    /// repeated start.
    ///
    /// Register 0 here means register zero. Devices without an
    /// addressable register concept use [`read_raw`](Self::read_raw);
    /// the two cases are distinguished by entry point, never by a
    /// sentinel value.
    pub fn read_register(
        &mut self,
        device: &mut I2cDevice<D>,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Error<D::Fault>> {
        self.write_then_read(device, &[register], buf)
    }

    /// Plain read with no preceding register write.
    pub fn read_raw(
        &mut self,
        device: &mut I2cDevice<D>,
        buf: &mut [u8],
    ) -> Result<(), Error<D::Fault>> {
        self.preflight(device, buf.len())?;
        let timeout_ms = device.timeout_ms();
        let result = self.driver.receive(device.raw_mut(), buf, timeout_ms);
        self.finish(result, buf)
    }

    /// Transmit `bytes` to the device.
    pub fn write(
        &mut self,
        device: &mut I2cDevice<D>,
        bytes: &[u8],
    ) -> Result<(), Error<D::Fault>> {
        self.preflight(device, bytes.len())?;
        let timeout_ms = device.timeout_ms();
        let result =
            self.driver.transmit(device.raw_mut(), bytes, timeout_ms);
        self.finish(result, bytes)
    }

    /// Transmit the register address followed by `bytes` in a single
    /// write. Payloads are bounded by [`MAX_REGISTER_WRITE`].
    pub fn write_register(
        &mut self,
        device: &mut I2cDevice<D>,
        register: u8,
        bytes: &[u8],
    ) -> Result<(), Error<D::Fault>> {
        self.preflight(device, bytes.len())?;
        if bytes.len() > MAX_REGISTER_WRITE {
            return Err(Error::InvalidArgument);
        }
        let mut frame: Vec<u8, { MAX_REGISTER_WRITE + 1 }> = Vec::new();
        frame.push(register).map_err(|_| Error::InvalidArgument)?;
        frame
            .extend_from_slice(bytes)
            .map_err(|_| Error::InvalidArgument)?;
        let timeout_ms = device.timeout_ms();
        let result =
            self.driver.transmit(device.raw_mut(), &frame, timeout_ms);
        self.finish(result, &frame)
    }

    /// Combined write-then-read with an arbitrary command phase. Backs
    /// `read_register` and the embedded-hal adapter.
    pub(crate) fn write_then_read(
        &mut self,
        device: &mut I2cDevice<D>,
        bytes: &[u8],
        buf: &mut [u8],
    ) -> Result<(), Error<D::Fault>> {
        self.preflight(device, buf.len())?;
        if bytes.is_empty() {
            return Err(Error::InvalidArgument);
        }
        let timeout_ms = device.timeout_ms();
        let result = self.driver.transmit_receive(
            device.raw_mut(),
            bytes,
            buf,
            timeout_ms,
        );
        self.finish(result, buf)
    }

    /// Checks shared by every transfer, before any hardware access.
    fn preflight(
        &self,
        device: &I2cDevice<D>,
        len: usize,
    ) -> Result<(), Error<D::Fault>> {
        if self.raw.is_none() {
            return Err(Error::BusNotOpen);
        }
        if device.port() != self.port {
            return Err(Error::InvalidArgument);
        }
        if len == 0 {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }

    /// Translate the driver outcome and trace the bytes moved.
    fn finish(
        &mut self,
        result: Result<(), TransferError<D::Fault>>,
        bytes: &[u8],
    ) -> Result<(), Error<D::Fault>> {
        match result {
            Ok(()) => {
                if self.sink.enabled(DiagLevel::Debug) {
                    self.sink.bytes(DiagLevel::Debug, bytes);
                }
                Ok(())
            }
            Err(TransferError::Timeout) => {
                self.sink.message(
                    DiagLevel::Warn,
                    format_args!(
                        "i2c: port {} transfer timed out",
                        self.port.number()
                    ),
                );
                Err(Error::Timeout)
            }
            Err(TransferError::Fault(fault)) => {
                self.sink.message(
                    DiagLevel::Warn,
                    format_args!(
                        "i2c: port {} transfer fault",
                        self.port.number()
                    ),
                );
                Err(Error::BusFault(fault))
            }
        }
    }
}
