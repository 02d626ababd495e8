//! I2C bus for RP2040
//!
//! Blocking embassy-rp I2C master wrapped in the shared [`HalI2cBus`]
//! adapter, with timeouts measured on the embassy time driver.

use embassy_rp::i2c::{Blocking, Config, I2c, Instance, SclPin, SdaPin};
use embassy_rp::Peri;
use helio_hal::{HalI2cBus, I2cConfig};

use crate::time::EmbassyClock;

/// RP2040 I2C bus implementing [`helio_hal::I2cBus`]
pub type RpI2cBus<'d, T> = HalI2cBus<I2c<'d, T, Blocking>, EmbassyClock>;

/// Build an I2C bus from a peripheral and its pins
///
/// # Arguments
/// * `peri` - I2C0 or I2C1
/// * `scl` - Clock pin routed to `peri`
/// * `sda` - Data pin routed to `peri`
/// * `config` - Bus frequency
pub fn new_i2c_bus<'d, T: Instance>(
    peri: Peri<'d, T>,
    scl: Peri<'d, impl SclPin<T>>,
    sda: Peri<'d, impl SdaPin<T>>,
    config: I2cConfig,
) -> RpI2cBus<'d, T> {
    let mut i2c_config = Config::default();
    i2c_config.frequency = config.frequency;

    #[cfg(feature = "defmt")]
    defmt::debug!("I2C bus at {} Hz", config.frequency);

    HalI2cBus::with_clock(I2c::new_blocking(peri, scl, sda, i2c_config), EmbassyClock)
}
