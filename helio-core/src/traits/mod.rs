//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and part-specific driver implementations.

pub mod light;
pub mod servo;

pub use light::{LightSensor, Lux};
pub use servo::{ServoDriver, ServoError};
