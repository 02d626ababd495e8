//! Helio Hardware Abstraction Layer
//!
//! This crate defines the bus and signal traits the Helio drivers are
//! written against. Chip-specific HALs (RP2040, ...) implement them, and
//! the [`i2c::HalI2cBus`] adapter lifts any `embedded-hal` I2C master into
//! an [`I2cBus`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Drivers (helio-drivers: BH1750, SG90)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  helio-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  helio-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C master with address scan and timeouts
//! - [`pwm::PwmChannel`] - PWM output with 16-bit duty
//! - [`time::Monotonic`] - Microsecond clock for timeout accounting

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod pwm;
pub mod time;

// Re-export key traits at crate root for convenience
pub use i2c::{HalI2cBus, I2cBus, I2cBusError, I2cConfig};
pub use pwm::PwmChannel;
pub use time::{Monotonic, NoClock};
