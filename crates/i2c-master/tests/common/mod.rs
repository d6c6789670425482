#![allow(dead_code)]

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard};

use i2c_master::{
    BusConfig, BusOptions, DeviceAddress, DiagLevel, DiagSink, I2cBus,
    MasterDriver, NullDiag, Port, TransferError, REFERENCE_PIN_MAP,
};

// ---------------------------------------------------------------------------
// Mock vendor driver
// ---------------------------------------------------------------------------

/// Fault detail the mock driver reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockFault(pub &'static str);

/// Every call the mock driver receives, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    NewBus,
    DelBus,
    AddDevice(u16),
    RemoveDevice(u16),
    Transmit { len: usize, timeout_ms: u32 },
    Receive { len: usize, timeout_ms: u32 },
    TransmitReceive { wlen: usize, rlen: usize, timeout_ms: u32 },
}

#[derive(Default)]
pub struct MockState {
    pub calls: Vec<Call>,
    /// Register file per device address: transmit stores `[reg, data...]`,
    /// transmit-receive reads back from `reg`.
    pub registers: HashMap<u16, [u8; 256]>,
    /// Bytes served by the plain receive primitive.
    pub raw_response: Vec<u8>,
    pub fail_new_bus: bool,
    pub fail_del_bus: bool,
    /// Forced outcome for every transfer primitive.
    pub transfer_result: Option<TransferError<MockFault>>,
    pub last_config: Option<BusConfig>,
}

/// Mock driver with `Arc`-shared state, so tests keep a view of the
/// driver after the bus takes ownership of it.
#[derive(Clone, Default)]
pub struct MockDriver {
    pub state: Arc<Mutex<MockState>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn transfer_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::Transmit { .. }
                        | Call::Receive { .. }
                        | Call::TransmitReceive { .. }
                )
            })
            .collect()
    }
}

pub struct MockBusHandle;

pub struct MockDeviceHandle {
    pub address: u16,
}

impl MasterDriver for MockDriver {
    type BusHandle = MockBusHandle;
    type DeviceHandle = MockDeviceHandle;
    type Fault = MockFault;

    fn new_bus(
        &mut self,
        config: &BusConfig,
    ) -> Result<MockBusHandle, MockFault> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::NewBus);
        st.last_config = Some(*config);
        if st.fail_new_bus {
            return Err(MockFault("init"));
        }
        Ok(MockBusHandle)
    }

    fn del_bus(&mut self, _bus: MockBusHandle) -> Result<(), MockFault> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::DelBus);
        if st.fail_del_bus {
            return Err(MockFault("teardown"));
        }
        Ok(())
    }

    fn add_device(
        &mut self,
        _bus: &mut MockBusHandle,
        address: DeviceAddress,
    ) -> Result<MockDeviceHandle, MockFault> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::AddDevice(address.raw()));
        Ok(MockDeviceHandle { address: address.raw() })
    }

    fn remove_device(&mut self, device: MockDeviceHandle) {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::RemoveDevice(device.address));
    }

    fn transmit(
        &mut self,
        device: &mut MockDeviceHandle,
        bytes: &[u8],
        timeout_ms: u32,
    ) -> Result<(), TransferError<MockFault>> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::Transmit { len: bytes.len(), timeout_ms });
        if let Some(err) = st.transfer_result {
            return Err(err);
        }
        // First byte addresses a register, the rest land consecutively,
        // wrapping at the end of the register file.
        if let Some((reg, data)) = bytes.split_first() {
            let regs =
                st.registers.entry(device.address).or_insert([0u8; 256]);
            for (i, b) in data.iter().enumerate() {
                regs[(*reg as usize + i) % 256] = *b;
            }
        }
        Ok(())
    }

    fn receive(
        &mut self,
        _device: &mut MockDeviceHandle,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), TransferError<MockFault>> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::Receive { len: buf.len(), timeout_ms });
        if let Some(err) = st.transfer_result {
            return Err(err);
        }
        for (i, b) in buf.iter_mut().enumerate() {
            *b = st.raw_response.get(i).copied().unwrap_or(0);
        }
        Ok(())
    }

    fn transmit_receive(
        &mut self,
        device: &mut MockDeviceHandle,
        bytes: &[u8],
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), TransferError<MockFault>> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::TransmitReceive {
            wlen: bytes.len(),
            rlen: buf.len(),
            timeout_ms,
        });
        if let Some(err) = st.transfer_result {
            return Err(err);
        }
        let reg = bytes.first().copied().unwrap_or(0);
        let regs = st.registers.entry(device.address).or_insert([0u8; 256]);
        for (i, b) in buf.iter_mut().enumerate() {
            *b = regs[(reg as usize + i) % 256];
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Recording diagnostics sink
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct RecordingDiag {
    pub debug_enabled: bool,
    pub messages: Arc<Mutex<Vec<(DiagLevel, String)>>>,
    pub traces: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl RecordingDiag {
    pub fn new(debug_enabled: bool) -> Self {
        Self { debug_enabled, ..Self::default() }
    }
}

impl DiagSink for RecordingDiag {
    fn enabled(&self, level: DiagLevel) -> bool {
        level != DiagLevel::Debug || self.debug_enabled
    }

    fn message(&mut self, level: DiagLevel, args: std::fmt::Arguments<'_>) {
        let mut text = String::new();
        let _ = write!(text, "{args}");
        self.messages.lock().unwrap().push((level, text));
    }

    fn bytes(&mut self, _level: DiagLevel, bytes: &[u8]) {
        self.traces.lock().unwrap().push(bytes.to_vec());
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The per-port open registry is process-wide; tests that open a bus
/// serialize on this lock so the harness can run them on any number of
/// threads.
static PORT_GUARD: Mutex<()> = Mutex::new(());

pub fn serialize_ports() -> MutexGuard<'static, ()> {
    PORT_GUARD.lock().unwrap_or_else(|e| e.into_inner())
}

pub fn open_default(driver: MockDriver) -> I2cBus<MockDriver, NullDiag> {
    I2cBus::open(
        driver,
        Port::I2c0,
        &REFERENCE_PIN_MAP,
        BusOptions::default(),
        NullDiag,
    )
    .expect("open should succeed")
}
