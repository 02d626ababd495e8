//! SG90 hobby servo
//!
//! Positional servo driven by a 50 Hz PWM signal. The pulse width maps
//! linearly onto the angle between two calibrated duty values.
//!
//! Only the 0-90° half of the travel is supported.
//!
//! # Usage
//!
//! ```ignore
//! let mut servo = Sg90::new(pwm);
//! servo.move_to(45)?;
//! ```

use core::cmp::Ordering;

use helio_core::traits::{ServoDriver, ServoError};
use helio_hal::PwmChannel;

/// Servo control frequency (Hz)
pub const SERVO_FREQUENCY_HZ: u32 = 50;

/// Duty at 0° (about a 1 ms pulse), calibrated for the fitted servo
pub const MIN_DUTY: u16 = 3276;

/// Duty at 90° (about a 2 ms pulse), calibrated for the fitted servo
pub const MAX_DUTY: u16 = 6553;

/// Largest accepted angle (degrees)
pub const MAX_ANGLE: i32 = 90;

const DUTY_SPAN: i32 = (MAX_DUTY - MIN_DUTY) as i32;

/// Divide, rounding ties to even
///
/// `den` must be positive.
fn div_round_half_even(num: i32, den: i32) -> i32 {
    let quotient = num.div_euclid(den);
    let remainder = num.rem_euclid(den);

    match (2 * remainder).cmp(&den) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient % 2 == 0 => quotient,
        Ordering::Equal => quotient + 1,
    }
}

/// SG90 servo driver
pub struct Sg90<P> {
    pwm: P,
    /// Last commanded angle, or the one inferred from the duty at startup
    position: i32,
}

impl<P: PwmChannel> Sg90<P> {
    /// Take over a PWM channel
    ///
    /// Sets the frequency to 50 Hz and infers the current angle from the
    /// channel's duty. A channel that was idle (duty 0) yields a negative,
    /// out-of-range position until the first [`move_to`](ServoDriver::move_to).
    pub fn new(mut pwm: P) -> Self {
        pwm.set_frequency(SERVO_FREQUENCY_HZ);
        let position = Self::angle_for_duty(pwm.duty_u16());
        Self { pwm, position }
    }

    /// Current duty on the channel
    pub fn duty(&self) -> u16 {
        self.pwm.duty_u16()
    }
}

impl<P> Sg90<P> {
    /// Duty for an angle
    ///
    /// `3276 + angle * 3277 / 90`, rounded half to even (45° -> 4914).
    pub fn duty_for_angle(angle: i32) -> Result<u16, ServoError> {
        if !(0..=MAX_ANGLE).contains(&angle) {
            return Err(ServoError::InvalidAngle(angle));
        }

        let offset = div_round_half_even(angle * DUTY_SPAN, MAX_ANGLE);
        Ok(MIN_DUTY + offset as u16)
    }

    /// Angle for a duty, the inverse of [`duty_for_angle`](Self::duty_for_angle)
    ///
    /// Not clamped: duties outside the calibrated span give angles
    /// outside 0-90.
    pub fn angle_for_duty(duty: u16) -> i32 {
        div_round_half_even((duty as i32 - MIN_DUTY as i32) * MAX_ANGLE, DUTY_SPAN)
    }

    /// Give back the PWM channel
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: PwmChannel> ServoDriver for Sg90<P> {
    fn move_to(&mut self, angle: i32) -> Result<(), ServoError> {
        // Validate before touching any state
        let duty = Self::duty_for_angle(angle)?;

        self.position = angle;
        self.pwm.set_duty_u16(duty);
        Ok(())
    }

    fn position(&self) -> i32 {
        self.position
    }
}
