//! Hardware configuration types
//!
//! These types define the bus-level configuration for the attached
//! peripherals.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Light sensor bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LightSensorConfig {
    /// I2C clock frequency in Hz
    pub bus_frequency_hz: u32,
    /// Standing per-transaction timeout in ms (None = no timeout)
    pub timeout_ms: Option<u32>,
}

impl Default for LightSensorConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl LightSensorConfig {
    /// Standard mode bus (100 kHz), no timeout
    pub const STANDARD: Self = Self {
        bus_frequency_hz: 100_000,
        timeout_ms: None,
    };

    /// Fast mode bus (400 kHz), no timeout
    pub const FAST: Self = Self {
        bus_frequency_hz: 400_000,
        timeout_ms: None,
    };

    /// Same bus settings with a standing timeout
    pub const fn with_timeout_ms(self, timeout_ms: u32) -> Self {
        Self {
            timeout_ms: Some(timeout_ms),
            ..self
        }
    }

    /// Standing timeout in microseconds, as armed on the bus
    pub const fn timeout_us(&self) -> Option<u32> {
        match self.timeout_ms {
            Some(ms) => Some(ms.saturating_mul(1000)),
            None => None,
        }
    }
}
