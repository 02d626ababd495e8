//! Sensor driver implementations
//!
//! - BH1750: I2C ambient light sensor

pub mod bh1750;

pub use bh1750::{Bh1750, Bh1750Error, DeviceAddress, MeasurementMode};
