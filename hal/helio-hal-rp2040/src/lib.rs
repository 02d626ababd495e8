//! RP2040-specific HAL for the Helio drivers
//!
//! This crate provides RP2040 implementations of the shared
//! `helio-hal` traits, plus ready-made constructors:
//!
//! - I2C bus built from a peripheral, SCL/SDA pins and a frequency
//! - PWM channel on a slice output, 16-bit duty at any frequency
//! - Monotonic clock backed by `embassy-time` for bus timeouts
//! - BH1750 and SG90 drivers wired to the above

#![no_std]

pub mod devices;
pub mod i2c;
pub mod pwm;
pub mod time;

// Re-export shared traits from helio-hal for convenience
pub use helio_hal::{I2cBus, PwmChannel};
