use crate::config::Port;
use crate::driver::MasterDriver;

/// Default transfer timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u32 = 1_000;

/// Target address, tagged by addressing width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceAddress {
    SevenBit(u8),
    TenBit(u16),
}

impl DeviceAddress {
    // 7-bit ranges the bus specification reserves: general call/START
    // byte/CBUS/high-speed codes below, 10-bit prefixes and device ID
    // above.
    const RESERVED_LOW_END: u8 = 0x07;
    const RESERVED_HIGH_START: u8 = 0x78;

    /// Whether the address is usable as a target on the bus.
    pub fn is_valid(self) -> bool {
        match self {
            DeviceAddress::SevenBit(a) => {
                a > Self::RESERVED_LOW_END && a < Self::RESERVED_HIGH_START
            }
            DeviceAddress::TenBit(a) => a <= 0x3FF,
        }
    }

    /// Raw address value without the width tag.
    pub fn raw(self) -> u16 {
        match self {
            DeviceAddress::SevenBit(a) => u16::from(a),
            DeviceAddress::TenBit(a) => a,
        }
    }
}

impl From<u8> for DeviceAddress {
    fn from(address: u8) -> Self {
        DeviceAddress::SevenBit(address)
    }
}

/// Logical device registered on an open bus.
///
/// Holds the vendor device handle plus the address and timeout it was
/// attached with. Carries no reference back to the bus; every transfer
/// goes through [`I2cBus`](crate::I2cBus), which is the single mutable
/// access path.
pub struct I2cDevice<D: MasterDriver> {
    raw: D::DeviceHandle,
    port: Port,
    address: DeviceAddress,
    timeout_ms: u32,
}

impl<D: MasterDriver> I2cDevice<D> {
    pub(crate) fn new(
        raw: D::DeviceHandle,
        port: Port,
        address: DeviceAddress,
        timeout_ms: u32,
    ) -> Self {
        Self { raw, port, address, timeout_ms }
    }

    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// Transfer timeout in milliseconds.
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Override the timeout for subsequent transfers.
    pub fn set_timeout_ms(&mut self, timeout_ms: u32) {
        self.timeout_ms = timeout_ms;
    }

    pub(crate) fn port(&self) -> Port {
        self.port
    }

    pub(crate) fn raw_mut(&mut self) -> &mut D::DeviceHandle {
        &mut self.raw
    }

    pub(crate) fn into_raw(self) -> D::DeviceHandle {
        self.raw
    }
}
