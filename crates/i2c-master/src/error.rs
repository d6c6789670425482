use core::fmt;

/// Errors returned by bus, device, and transfer operations.
///
/// `E` is the vendor driver's fault detail. Nothing here terminates the
/// process; every failure is reported to the caller, which decides whether
/// to retry, escalate, or ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: fmt::Debug> {
    /// Caller misuse rejected before any hardware access (empty buffer,
    /// oversized payload, device bound to a different bus).
    InvalidArgument,
    /// The pin map has no usable assignment for the requested port.
    InvalidPin,
    /// Transfer or attach attempted on a closed bus.
    BusNotOpen,
    /// Another handle already owns this port's peripheral.
    PortAlreadyOpen,
    /// Close called on a handle that is not open.
    PortNotOpen,
    /// Device address falls in a reserved range or exceeds its width.
    AddressOutOfRange,
    /// The transfer did not complete within the device timeout. The driver
    /// aborts the transfer and leaves the bus recoverable.
    Timeout,
    /// NACK, arbitration loss, or bus error reported by the driver.
    BusFault(E),
    /// The vendor driver failed to bring the bus up. Fatal for this handle.
    HardwareInitFailed(E),
    /// The vendor driver failed to tear the bus down. Fatal for this handle;
    /// the port stays reserved.
    HardwareTeardownFailed(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "invalid argument"),
            Error::InvalidPin => write!(f, "no usable pin assignment"),
            Error::BusNotOpen => write!(f, "bus is not open"),
            Error::PortAlreadyOpen => write!(f, "port is already open"),
            Error::PortNotOpen => write!(f, "port is not open"),
            Error::AddressOutOfRange => {
                write!(f, "device address out of range")
            }
            Error::Timeout => write!(f, "transfer timed out"),
            Error::BusFault(e) => write!(f, "bus fault: {:?}", e),
            Error::HardwareInitFailed(e) => {
                write!(f, "hardware init failed: {:?}", e)
            }
            Error::HardwareTeardownFailed(e) => {
                write!(f, "hardware teardown failed: {:?}", e)
            }
        }
    }
}
