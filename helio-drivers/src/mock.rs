//! Recording test doubles for the bus, delay and PWM traits
//!
//! Bus and delay share one event log so tests can check the exact
//! interleaving of transfers and waits.

use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use helio_hal::i2c::AddressList;
use helio_hal::{I2cBus, PwmChannel};

/// Observable bus or delay operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Scan,
    Write { address: u8, data: Vec<u8, 4> },
    Read { address: u8, len: usize },
    DelayMs(u32),
    DelayUs(u32),
    DelayNs(u32),
    Timeout(Option<u32>),
}

/// Expected write event
pub fn write(address: u8, data: &[u8]) -> Event {
    Event::Write {
        address,
        data: Vec::from_slice(data).unwrap(),
    }
}

/// Expected read event
pub fn read(address: u8, len: usize) -> Event {
    Event::Read { address, len }
}

/// Bus fault reported by [`MockBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    Nack,
    Timeout,
}

/// What the simulated bus answers
#[derive(Debug, Clone, Default)]
pub struct Script {
    /// Addresses that acknowledge a scan
    pub present: Vec<u8, 8>,
    /// Bytes returned by every read
    pub response: [u8; 2],
    pub fail_writes: bool,
    pub fail_reads: bool,
    /// Simulated duration of each operation
    pub latency_us: u32,
}

/// Shared state behind the mocks
#[derive(Default)]
pub struct Harness {
    pub log: RefCell<Vec<Event, 64>>,
    pub script: RefCell<Script>,
}

impl Harness {
    /// Harness whose bus has devices at `present`
    pub fn with_devices(present: &[u8]) -> Self {
        let harness = Self::default();
        harness.script.borrow_mut().present = Vec::from_slice(present).unwrap();
        harness
    }

    pub fn bus(&self) -> MockBus<'_> {
        MockBus {
            harness: self,
            timeout_us: None,
        }
    }

    pub fn delay(&self) -> MockDelay<'_> {
        MockDelay { harness: self }
    }

    pub fn set_response(&self, response: [u8; 2]) {
        self.script.borrow_mut().response = response;
    }

    pub fn events(&self) -> Vec<Event, 64> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, event: Event) {
        self.log.borrow_mut().push(event).unwrap();
    }
}

pub struct MockBus<'a> {
    harness: &'a Harness,
    timeout_us: Option<u32>,
}

impl MockBus<'_> {
    fn check_timeout(&self) -> Result<(), MockError> {
        match self.timeout_us {
            Some(budget) if self.harness.script.borrow().latency_us > budget => {
                Err(MockError::Timeout)
            }
            _ => Ok(()),
        }
    }
}

impl I2cBus for MockBus<'_> {
    type Error = MockError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.harness.record(write(address, data));
        self.check_timeout()?;
        if self.harness.script.borrow().fail_writes {
            return Err(MockError::Nack);
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.harness.record(read(address, buf.len()));
        self.check_timeout()?;
        let script = self.harness.script.borrow();
        if script.fail_reads {
            return Err(MockError::Nack);
        }
        for (dst, src) in buf.iter_mut().zip(script.response.iter().cycle()) {
            *dst = *src;
        }
        Ok(())
    }

    fn scan(&mut self) -> Result<AddressList, Self::Error> {
        self.harness.record(Event::Scan);
        self.check_timeout()?;
        let script = self.harness.script.borrow();
        let mut found = AddressList::new();
        for &address in script.present.iter() {
            found.push(address).unwrap();
        }
        Ok(found)
    }

    fn set_timeout_us(&mut self, timeout_us: Option<u32>) {
        if timeout_us != self.timeout_us {
            self.harness.record(Event::Timeout(timeout_us));
        }
        self.timeout_us = timeout_us;
    }

    fn timeout_us(&self) -> Option<u32> {
        self.timeout_us
    }
}

pub struct MockDelay<'a> {
    harness: &'a Harness,
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.harness.record(Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.harness.record(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.harness.record(Event::DelayMs(ms));
    }
}

/// PWM channel remembering frequency and duty writes
#[derive(Debug, Default)]
pub struct MockPwm {
    pub frequency: Option<u32>,
    pub duty: u16,
    pub duty_writes: usize,
}

impl MockPwm {
    pub fn with_duty(duty: u16) -> Self {
        Self {
            duty,
            ..Self::default()
        }
    }
}

impl PwmChannel for MockPwm {
    fn set_frequency(&mut self, hz: u32) {
        self.frequency = Some(hz);
    }

    fn duty_u16(&self) -> u16 {
        self.duty
    }

    fn set_duty_u16(&mut self, duty: u16) {
        self.duty = duty;
        self.duty_writes += 1;
    }
}
