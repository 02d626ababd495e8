//! PWM output abstractions

/// Single PWM output channel
///
/// Duty is expressed on the full 16-bit scale: `0` is always low and
/// `u16::MAX` is (almost) always high, independent of the timer's actual
/// counter resolution.
pub trait PwmChannel {
    /// Set the signal frequency in Hz
    ///
    /// Implementations should keep the current duty fraction.
    fn set_frequency(&mut self, hz: u32);

    /// Current duty value
    fn duty_u16(&self) -> u16;

    /// Set the duty value
    fn set_duty_u16(&mut self, duty: u16);
}
