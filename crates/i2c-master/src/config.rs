//! Bus configuration: ports, board pin maps, and open-time options.

/// Master bus ports supported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    I2c0,
    I2c1,
}

impl Port {
    pub(crate) const COUNT: usize = 2;

    pub(crate) fn index(self) -> usize {
        match self {
            Port::I2c0 => 0,
            Port::I2c1 => 1,
        }
    }

    /// Port number as the platform counts them.
    pub fn number(self) -> u8 {
        self.index() as u8
    }
}

/// SCL/SDA assignment for one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    pub scl: u8,
    pub sda: u8,
}

/// Board pin-map table: which pins each port drives.
///
/// Lookup-based so a new board only needs a different table, not
/// different code.
#[derive(Debug, Clone, Copy)]
pub struct PinMap {
    entries: &'static [(Port, PinAssignment)],
}

impl PinMap {
    pub const fn new(entries: &'static [(Port, PinAssignment)]) -> Self {
        Self { entries }
    }

    /// Pin assignment for `port`, if the board routes it.
    pub fn pins_for(&self, port: Port) -> Option<PinAssignment> {
        self.entries
            .iter()
            .find(|(p, _)| *p == port)
            .map(|(_, pins)| *pins)
    }
}

/// Pin map for the reference board.
pub const REFERENCE_PIN_MAP: PinMap = PinMap::new(&[
    (Port::I2c0, PinAssignment { scl: 22, sda: 21 }),
    (Port::I2c1, PinAssignment { scl: 19, sda: 18 }),
]);

/// Peripheral clock domain feeding the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Whatever the platform selects by default.
    #[default]
    Default,
    /// Peripheral (APB) clock.
    Apb,
    /// Crystal oscillator.
    Xtal,
}

/// Tunables applied when a bus opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusOptions {
    pub clock_source: ClockSource,
    /// Glitch-filter noise-rejection window in bus cycles.
    pub glitch_cycles: u8,
    /// Enable the weak internal pull-ups. Off by default; external
    /// pull-ups are assumed.
    pub internal_pullup: bool,
}

impl Default for BusOptions {
    fn default() -> Self {
        Self {
            clock_source: ClockSource::Default,
            glitch_cycles: 7,
            internal_pullup: false,
        }
    }
}

/// Fully resolved configuration handed to the vendor driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    pub port: Port,
    pub pins: PinAssignment,
    pub options: BusOptions,
}
