//! BH1750 ambient light sensor
//!
//! Digital illuminance sensor on I2C. The driver discovers the sensor
//! with a bus scan, powers it on and resets it, then takes blocking
//! measurements: one instruction byte selecting the mode, a wait for the
//! conversion, and a two-byte big-endian read.
//!
//! # Usage
//!
//! ```ignore
//! let mut sensor = Bh1750::new(bus, delay)?;
//!
//! let lux = sensor.measure(None)?;
//! let precise = sensor.measure(Some(MeasurementMode::OneShotHighRes2))?;
//! ```
//!
//! The power-down instruction is never sent, so the sensor keeps drawing
//! its active current between measurements.

pub mod address;
pub mod mode;

pub use address::DeviceAddress;
pub use mode::{MeasurementMode, ModeInfo};

use embedded_hal::delay::DelayNs;
use helio_core::config::LightSensorConfig;
use helio_core::traits::{LightSensor, Lux};
use helio_hal::I2cBus;

/// Wait after each power sequence instruction (ms)
pub const POWER_SEQUENCE_DELAY_MS: u32 = 10;

/// Power and reset instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Instruction {
    /// No active state
    PowerDown = 0x00,
    /// Wait for a measurement instruction
    PowerOn = 0x01,
    /// Clear the data register (only valid while powered on)
    Reset = 0x07,
}

impl Instruction {
    /// Instruction byte
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

/// Errors from the BH1750 driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bh1750Error<E> {
    /// No BH1750 answered the bus scan
    SensorNotFound,
    /// Bus transfer failed
    Bus(E),
}

impl<E> From<E> for Bh1750Error<E> {
    fn from(err: E) -> Self {
        Bh1750Error::Bus(err)
    }
}

/// BH1750 driver
///
/// Owns the bus and the delay provider. Only constructible through
/// discovery, so a driver always has a valid address.
pub struct Bh1750<B, D> {
    bus: B,
    delay: D,
    address: DeviceAddress,
    default_mode: MeasurementMode,
    /// Standing bus timeout, restored after per-call overrides
    timeout_us: Option<u32>,
}

impl<B: I2cBus, D: DelayNs> Bh1750<B, D> {
    /// Discover and initialize a sensor on `bus`
    ///
    /// Runs [`detect`](Self::detect), then [`reset`](Self::reset), then
    /// discards one one-shot measurement because the first conversion
    /// after power-on is often stale.
    pub fn new(bus: B, delay: D) -> Result<Self, Bh1750Error<B::Error>> {
        Self::init(bus, delay, None)
    }

    /// Like [`new`](Self::new), with the standing timeout from `config`
    pub fn with_config(
        bus: B,
        delay: D,
        config: &LightSensorConfig,
    ) -> Result<Self, Bh1750Error<B::Error>> {
        Self::init(bus, delay, config.timeout_us())
    }

    fn init(
        mut bus: B,
        delay: D,
        timeout_us: Option<u32>,
    ) -> Result<Self, Bh1750Error<B::Error>> {
        bus.set_timeout_us(timeout_us);
        let address = Self::detect(&mut bus)?;

        let mut sensor = Self {
            bus,
            delay,
            address,
            default_mode: address.default_mode(),
            timeout_us,
        };

        sensor.reset()?;
        sensor.measure(Some(sensor.default_mode.one_shot()))?;

        Ok(sensor)
    }

    /// Find a BH1750 on the bus
    ///
    /// If both addresses answer, [`DeviceAddress::AddrHigh`] wins.
    pub fn detect(bus: &mut B) -> Result<DeviceAddress, Bh1750Error<B::Error>> {
        let present = bus.scan()?;
        DeviceAddress::find(&present).ok_or(Bh1750Error::SensorNotFound)
    }

    /// [`detect`](Self::detect) with a time budget for the scan
    ///
    /// The bus's previous timeout is restored afterwards.
    pub fn detect_with_timeout(
        bus: &mut B,
        timeout_ms: u32,
    ) -> Result<DeviceAddress, Bh1750Error<B::Error>> {
        let previous = bus.timeout_us();
        bus.set_timeout_us(Some(timeout_ms.saturating_mul(1000)));
        let result = Self::detect(bus);
        bus.set_timeout_us(previous);
        result
    }

    /// Power on and reset the sensor
    ///
    /// Writes power-on, waits, writes reset, waits. Required before the
    /// first measurement; independent of the measurement mode.
    pub fn reset(&mut self) -> Result<(), Bh1750Error<B::Error>> {
        self.send(Instruction::PowerOn.opcode())?;
        self.delay.delay_ms(POWER_SEQUENCE_DELAY_MS);
        self.send(Instruction::Reset.opcode())?;
        self.delay.delay_ms(POWER_SEQUENCE_DELAY_MS);
        Ok(())
    }

    /// Take one measurement
    ///
    /// Uses the default mode for this sensor when `mode` is `None`.
    /// Blocks for the mode's settle time. Bus errors are returned as-is,
    /// without retries.
    pub fn measure(
        &mut self,
        mode: Option<MeasurementMode>,
    ) -> Result<Lux, Bh1750Error<B::Error>> {
        let mode = mode.unwrap_or(self.default_mode);

        self.send(mode.opcode())?;
        self.delay.delay_ms(mode.settle_ms());

        let mut data = [0u8; 2];
        self.bus.read(self.address.addr(), &mut data)?;

        Ok(Lux::from_raw(u16::from_be_bytes(data)))
    }

    /// [`measure`](Self::measure) with a time budget for each bus transfer
    ///
    /// The standing timeout is restored afterwards, whatever the outcome.
    pub fn measure_with_timeout(
        &mut self,
        mode: Option<MeasurementMode>,
        timeout_ms: u32,
    ) -> Result<Lux, Bh1750Error<B::Error>> {
        self.bus.set_timeout_us(Some(timeout_ms.saturating_mul(1000)));
        let result = self.measure(mode);
        self.bus.set_timeout_us(self.timeout_us);
        result
    }

    fn send(&mut self, opcode: u8) -> Result<(), B::Error> {
        self.bus.write(self.address.addr(), &[opcode])
    }
}

impl<B, D> Bh1750<B, D> {
    /// Address the sensor was found at
    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// Mode used when [`measure`](Bh1750::measure) gets `None`
    pub fn default_mode(&self) -> MeasurementMode {
        self.default_mode
    }

    /// Give back the bus and delay provider
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B: I2cBus, D: DelayNs> LightSensor for Bh1750<B, D> {
    type Error = Bh1750Error<B::Error>;

    fn read_lux(&mut self) -> Result<Lux, Self::Error> {
        self.measure(None)
    }
}
