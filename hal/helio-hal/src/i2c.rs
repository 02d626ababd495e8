//! I2C bus abstractions
//!
//! Provides the I2C master trait the drivers use, plus an adapter that
//! implements it on top of any `embedded-hal` 1.0 I2C master.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use heapless::Vec;

use crate::time::{Monotonic, NoClock};

/// First address probed by a bus scan (0x00-0x07 are reserved)
pub const SCAN_FIRST_ADDRESS: u8 = 0x08;

/// Last address probed by a bus scan (0x78-0x7F are reserved)
pub const SCAN_LAST_ADDRESS: u8 = 0x77;

/// Number of addresses a scan can report
pub const SCAN_CAPACITY: usize = (SCAN_LAST_ADDRESS - SCAN_FIRST_ADDRESS + 1) as usize;

/// Addresses that acknowledged a scan, in ascending order
pub type AddressList = Vec<u8, SCAN_CAPACITY>;

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices, plus device discovery.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// List every address that acknowledges on the bus
    fn scan(&mut self) -> Result<AddressList, Self::Error>;

    /// Arm (or clear with `None`) a time budget for each following operation
    ///
    /// A scan counts as one operation.
    fn set_timeout_us(&mut self, timeout_us: Option<u32>);

    /// Currently armed timeout
    fn timeout_us(&self) -> Option<u32>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error (misplaced START/STOP)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received
    Nack,
    /// Operation exceeded the armed timeout
    Timeout,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// [`I2cBus`] on top of an `embedded-hal` I2C master
///
/// Blocking transactions cannot be interrupted, so a timeout is detected
/// after the fact: an operation that took longer than the armed budget
/// reports [`I2cBusError::Timeout`] even if the transfer itself completed.
pub struct HalI2cBus<I, C = NoClock> {
    i2c: I,
    clock: C,
    timeout_us: Option<u32>,
}

impl<I> HalI2cBus<I, NoClock> {
    /// Wrap an I2C master without a clock (timeouts never fire)
    pub fn new(i2c: I) -> Self {
        Self::with_clock(i2c, NoClock)
    }
}

impl<I, C> HalI2cBus<I, C> {
    /// Wrap an I2C master, measuring timeouts with `clock`
    pub fn with_clock(i2c: I, clock: C) -> Self {
        Self {
            i2c,
            clock,
            timeout_us: None,
        }
    }

    /// Give back the wrapped I2C master
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c, C: Monotonic> HalI2cBus<I, C> {
    fn check_deadline(&self, start_us: u64) -> Result<(), I2cBusError> {
        match self.timeout_us {
            Some(budget) if self.clock.now_us().saturating_sub(start_us) > budget as u64 => {
                Err(I2cBusError::Timeout)
            }
            _ => Ok(()),
        }
    }

    fn timed<T>(
        &mut self,
        op: impl FnOnce(&mut I) -> Result<T, I::Error>,
    ) -> Result<T, I2cBusError> {
        let start = self.clock.now_us();
        // A bus fault takes precedence over an overrun
        let value = op(&mut self.i2c).map_err(|e| I2cBusError::from(e.kind()))?;
        self.check_deadline(start)?;
        Ok(value)
    }
}

impl<I: I2c, C: Monotonic> I2cBus for HalI2cBus<I, C> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.timed(|i2c| i2c.write(address, data))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.timed(|i2c| i2c.read(address, buf))
    }

    fn scan(&mut self) -> Result<AddressList, Self::Error> {
        let start = self.clock.now_us();
        let mut found = AddressList::new();

        for address in SCAN_FIRST_ADDRESS..=SCAN_LAST_ADDRESS {
            // Some masters reject zero-length writes, so probe with a 1-byte read
            let mut probe = [0u8; 1];
            match self.i2c.read(address, &mut probe) {
                Ok(()) => found.push(address).map_err(|_| I2cBusError::Other)?,
                Err(e) => match e.kind() {
                    ErrorKind::NoAcknowledge(_) => {}
                    kind => return Err(kind.into()),
                },
            }
            self.check_deadline(start)?;
        }

        Ok(found)
    }

    fn set_timeout_us(&mut self, timeout_us: Option<u32>) {
        self.timeout_us = timeout_us;
    }

    fn timeout_us(&self) -> Option<u32> {
        self.timeout_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embedded_hal::i2c::{ErrorType, NoAcknowledgeSource, Operation};

    /// I2C master with a fixed set of responding devices
    struct FakeI2c {
        present: &'static [u8],
        stuck: Option<u8>,
        transactions: usize,
    }

    impl FakeI2c {
        fn new(present: &'static [u8]) -> Self {
            Self {
                present,
                stuck: None,
                transactions: 0,
            }
        }
    }

    impl ErrorType for FakeI2c {
        type Error = ErrorKind;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.transactions += 1;
            if self.stuck == Some(address) {
                return Err(ErrorKind::ArbitrationLoss);
            }
            if !self.present.contains(&address) {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations {
                if let Operation::Read(buf) = op {
                    buf.fill(0xA5);
                }
            }
            Ok(())
        }
    }

    /// Clock that advances by `step` microseconds on every reading
    struct SteppingClock {
        now: Cell<u64>,
        step: u64,
    }

    impl Monotonic for SteppingClock {
        fn now_us(&self) -> u64 {
            let now = self.now.get();
            self.now.set(now + self.step);
            now
        }
    }

    #[test]
    fn test_scan_lists_present_devices() {
        let mut bus = HalI2cBus::new(FakeI2c::new(&[0x5C, 0x23, 0x3C]));

        let found = bus.scan().unwrap();
        assert_eq!(found.as_slice(), &[0x23, 0x3C, 0x5C]);
    }

    #[test]
    fn test_scan_skips_reserved_addresses() {
        let mut bus = HalI2cBus::new(FakeI2c::new(&[0x00, 0x07, 0x78, 0x7F]));

        let found = bus.scan().unwrap();
        assert!(found.is_empty());
        assert_eq!(bus.release().transactions, SCAN_CAPACITY);
    }

    #[test]
    fn test_scan_aborts_on_bus_fault() {
        let mut fake = FakeI2c::new(&[0x23]);
        fake.stuck = Some(0x10);
        let mut bus = HalI2cBus::new(fake);

        assert_eq!(bus.scan(), Err(I2cBusError::ArbitrationLost));
    }

    #[test]
    fn test_error_kind_mapping() {
        let mut bus = HalI2cBus::new(FakeI2c::new(&[]));

        assert_eq!(bus.write(0x23, &[0x01]), Err(I2cBusError::Nack));
        assert_eq!(I2cBusError::from(ErrorKind::Bus), I2cBusError::Bus);
        assert_eq!(I2cBusError::from(ErrorKind::Overrun), I2cBusError::Overrun);
        assert_eq!(I2cBusError::from(ErrorKind::Other), I2cBusError::Other);
    }

    #[test]
    fn test_read_fills_buffer() {
        let mut bus = HalI2cBus::new(FakeI2c::new(&[0x23]));

        let mut buf = [0u8; 2];
        bus.read(0x23, &mut buf).unwrap();
        assert_eq!(buf, [0xA5, 0xA5]);
    }

    #[test]
    fn test_timeout_never_fires_without_clock() {
        let mut bus = HalI2cBus::new(FakeI2c::new(&[0x23]));
        bus.set_timeout_us(Some(0));

        assert!(bus.write(0x23, &[0x10]).is_ok());
    }

    #[test]
    fn test_slow_transaction_times_out() {
        let clock = SteppingClock {
            now: Cell::new(0),
            step: 500,
        };
        let mut bus = HalI2cBus::with_clock(FakeI2c::new(&[0x23]), clock);

        bus.set_timeout_us(Some(1_000));
        assert!(bus.write(0x23, &[0x10]).is_ok());

        bus.set_timeout_us(Some(100));
        assert_eq!(bus.write(0x23, &[0x10]), Err(I2cBusError::Timeout));

        bus.set_timeout_us(None);
        assert!(bus.write(0x23, &[0x10]).is_ok());
        assert_eq!(bus.timeout_us(), None);
    }

    #[test]
    fn test_slow_failure_keeps_bus_error() {
        let clock = SteppingClock {
            now: Cell::new(0),
            step: 2_000,
        };
        let mut bus = HalI2cBus::with_clock(FakeI2c::new(&[]), clock);
        bus.set_timeout_us(Some(1_000));

        assert_eq!(bus.write(0x23, &[0x10]), Err(I2cBusError::Nack));
        let mut buf = [0u8; 2];
        assert_eq!(bus.read(0x23, &mut buf), Err(I2cBusError::Nack));
    }

    #[test]
    fn test_slow_scan_fault_keeps_bus_error() {
        let mut fake = FakeI2c::new(&[0x23]);
        fake.stuck = Some(0x08);
        let clock = SteppingClock {
            now: Cell::new(0),
            step: 2_000,
        };
        let mut bus = HalI2cBus::with_clock(fake, clock);
        bus.set_timeout_us(Some(1_000));

        assert_eq!(bus.scan(), Err(I2cBusError::ArbitrationLost));
    }

    #[test]
    fn test_scan_times_out_as_a_whole() {
        let clock = SteppingClock {
            now: Cell::new(0),
            step: 10,
        };
        let mut bus = HalI2cBus::with_clock(FakeI2c::new(&[0x23]), clock);

        bus.set_timeout_us(Some(50));
        assert_eq!(bus.scan(), Err(I2cBusError::Timeout));
    }

    #[test]
    fn test_config_presets() {
        assert_eq!(I2cConfig::default(), I2cConfig::STANDARD);
        assert_eq!(I2cConfig::FAST.frequency, 400_000);
        assert_eq!(I2cConfig::FAST_PLUS.frequency, 1_000_000);
    }
}
