//! Servo driver trait

/// Errors that can occur when commanding a servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError {
    /// Requested angle is outside the servo's supported range
    InvalidAngle(i32),
}

/// Trait for positional hobby servos
///
/// A rejected command must leave both the output signal and the stored
/// position untouched.
pub trait ServoDriver {
    /// Move to an absolute angle in whole degrees
    fn move_to(&mut self, angle: i32) -> Result<(), ServoError>;

    /// Last commanded (or inferred) angle in degrees
    fn position(&self) -> i32;
}
