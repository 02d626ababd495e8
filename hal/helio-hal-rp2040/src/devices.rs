//! Ready-to-use drivers on RP2040 peripherals
//!
//! Wires the BH1750 and SG90 drivers to the RP2040 bus, PWM, clock and
//! delay implementations.
//!
//! ```ignore
//! let p = embassy_rp::init(Default::default());
//! let mut sensor = light_sensor(p.I2C0, p.PIN_17, p.PIN_16, &LightSensorConfig::FAST)?;
//! let mut servo = servo_a(p.PWM_SLICE0, p.PIN_0);
//! ```

use embassy_rp::i2c::{Instance, SclPin, SdaPin};
use embassy_rp::pwm::{ChannelAPin, ChannelBPin, Slice};
use embassy_rp::Peri;
use embassy_time::Delay;
use helio_core::config::LightSensorConfig;
use helio_drivers::sensor::{Bh1750, Bh1750Error};
use helio_drivers::servo::Sg90;
use helio_hal::{I2cBusError, I2cConfig};

use crate::i2c::{new_i2c_bus, RpI2cBus};
use crate::pwm::RpPwmChannel;

/// BH1750 on an RP2040 I2C bus
pub type RpBh1750<'d, T> = Bh1750<RpI2cBus<'d, T>, Delay>;

/// SG90 on an RP2040 PWM output
pub type RpSg90<'d> = Sg90<RpPwmChannel<'d>>;

/// Build the I2C bus and bring up a BH1750 on it
///
/// Fails with [`Bh1750Error::SensorNotFound`] if neither sensor address
/// answers on the bus.
pub fn light_sensor<'d, T: Instance>(
    peri: Peri<'d, T>,
    scl: Peri<'d, impl SclPin<T>>,
    sda: Peri<'d, impl SdaPin<T>>,
    config: &LightSensorConfig,
) -> Result<RpBh1750<'d, T>, Bh1750Error<I2cBusError>> {
    let bus = new_i2c_bus(
        peri,
        scl,
        sda,
        I2cConfig {
            frequency: config.bus_frequency_hz,
        },
    );

    let sensor = Bh1750::with_config(bus, Delay, config)?;

    #[cfg(feature = "defmt")]
    defmt::info!(
        "BH1750 at {=u8:#x}, default mode {}",
        sensor.address().addr(),
        sensor.default_mode()
    );

    Ok(sensor)
}

/// SG90 on output A of a PWM slice
pub fn servo_a<'d, T: Slice>(slice: Peri<'d, T>, pin: Peri<'d, impl ChannelAPin<T>>) -> RpSg90<'d> {
    new_servo(RpPwmChannel::new_a(slice, pin))
}

/// SG90 on output B of a PWM slice
pub fn servo_b<'d, T: Slice>(slice: Peri<'d, T>, pin: Peri<'d, impl ChannelBPin<T>>) -> RpSg90<'d> {
    new_servo(RpPwmChannel::new_b(slice, pin))
}

fn new_servo(channel: RpPwmChannel<'_>) -> RpSg90<'_> {
    #[cfg(feature = "defmt")]
    let output = channel.output();

    let servo = Sg90::new(channel);

    #[cfg(feature = "defmt")]
    {
        use helio_core::traits::ServoDriver;
        defmt::info!(
            "SG90 on output {}, duty {}, start position {}",
            output,
            servo.duty(),
            servo.position()
        );
    }

    servo
}
