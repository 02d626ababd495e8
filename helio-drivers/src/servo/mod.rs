//! Servo driver implementations
//!
//! - SG90: 50 Hz PWM positional servo, half range (0-90°)

pub mod sg90;

pub use sg90::Sg90;
