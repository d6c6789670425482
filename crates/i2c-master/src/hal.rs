//! Blocking `embedded-hal` adapter.
//!
//! Lets ecosystem drivers that speak `embedded_hal::i2c::I2c` run on the
//! transaction layer. The adapter borrows the bus plus one attached
//! device; the address the driver passes must match the bound device.
//!
//! Limitation: the vendor seam only exposes write, read, and combined
//! write-then-read primitives. A write immediately followed by a read is
//! issued as one combined transaction (repeated start); any other
//! operation sequence (write+write, read+read, longer chains) is executed
//! as separate bus transactions with a STOP between them, not as the
//! single repeated-start transaction the `I2c::transaction` contract
//! describes.

use embedded_hal::i2c::{
    self, ErrorKind, ErrorType, Operation, SevenBitAddress,
};

use crate::bus::I2cBus;
use crate::device::{DeviceAddress, I2cDevice};
use crate::diag::DiagSink;
use crate::driver::MasterDriver;
use crate::error::Error;

impl<E: core::fmt::Debug> i2c::Error for Error<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::BusFault(_) => ErrorKind::Bus,
            _ => ErrorKind::Other,
        }
    }
}

/// One attached device viewed through `embedded_hal::i2c::I2c`.
pub struct HalDevice<'a, D: MasterDriver, S: DiagSink> {
    bus: &'a mut I2cBus<D, S>,
    device: &'a mut I2cDevice<D>,
}

impl<'a, D: MasterDriver, S: DiagSink> HalDevice<'a, D, S> {
    pub fn new(
        bus: &'a mut I2cBus<D, S>,
        device: &'a mut I2cDevice<D>,
    ) -> Self {
        Self { bus, device }
    }
}

impl<D: MasterDriver, S: DiagSink> ErrorType for HalDevice<'_, D, S> {
    type Error = Error<D::Fault>;
}

impl<D: MasterDriver, S: DiagSink> i2c::I2c<SevenBitAddress>
    for HalDevice<'_, D, S>
{
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.device.address() != DeviceAddress::SevenBit(address) {
            return Err(Error::InvalidArgument);
        }

        let mut rest = &mut *operations;
        while !rest.is_empty() {
            let ops = core::mem::take(&mut rest);
            match ops {
                // A write immediately followed by a read maps onto the
                // combined transmit-receive primitive (repeated start).
                [Operation::Write(bytes), Operation::Read(buf), tail @ ..] =>
                {
                    self.bus.write_then_read(self.device, bytes, buf)?;
                    rest = tail;
                }
                [Operation::Write(bytes), tail @ ..] => {
                    self.bus.write(self.device, bytes)?;
                    rest = tail;
                }
                [Operation::Read(buf), tail @ ..] => {
                    self.bus.read_raw(self.device, buf)?;
                    rest = tail;
                }
                [] => break,
            }
        }
        Ok(())
    }
}
