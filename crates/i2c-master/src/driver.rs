use crate::config::BusConfig;
use crate::device::DeviceAddress;

/// Failure of a single transfer primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError<E> {
    /// The driver aborted the transfer after the timeout window elapsed.
    Timeout,
    /// NACK, arbitration loss, or bus error.
    Fault(E),
}

/// Vendor master-bus driver boundary.
///
/// The transaction layer treats the platform driver as a black box with a
/// bus/device lifecycle and three timed transfer primitives. Implementors
/// map these onto the real peripheral; tests implement them with a mock.
/// All primitives block the calling thread for at most `timeout_ms`.
pub trait MasterDriver {
    /// Opaque vendor bus handle.
    type BusHandle;
    /// Opaque vendor device handle.
    type DeviceHandle;
    /// Driver-specific fault detail, carried inside
    /// [`Error::BusFault`](crate::Error::BusFault).
    type Fault: core::fmt::Debug;

    /// Bring the peripheral up with the given pin/clock configuration.
    fn new_bus(
        &mut self,
        config: &BusConfig,
    ) -> Result<Self::BusHandle, Self::Fault>;

    /// Tear the peripheral down and release its pins.
    fn del_bus(&mut self, bus: Self::BusHandle) -> Result<(), Self::Fault>;

    /// Register a target address on the bus.
    fn add_device(
        &mut self,
        bus: &mut Self::BusHandle,
        address: DeviceAddress,
    ) -> Result<Self::DeviceHandle, Self::Fault>;

    /// Drop a device registration.
    fn remove_device(&mut self, device: Self::DeviceHandle);

    /// Write `bytes` to the device.
    fn transmit(
        &mut self,
        device: &mut Self::DeviceHandle,
        bytes: &[u8],
        timeout_ms: u32,
    ) -> Result<(), TransferError<Self::Fault>>;

    /// Read `buf.len()` bytes from the device.
    fn receive(
        &mut self,
        device: &mut Self::DeviceHandle,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), TransferError<Self::Fault>>;

    /// Write `bytes`, then read `buf.len()` bytes under a repeated start.
    fn transmit_receive(
        &mut self,
        device: &mut Self::DeviceHandle,
        bytes: &[u8],
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), TransferError<Self::Fault>>;
}
