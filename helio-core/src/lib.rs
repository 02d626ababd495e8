//! Board-agnostic core types for the Helio drivers
//!
//! This crate contains everything that does not depend on a specific
//! bus, chip or sensor part:
//!
//! - Hardware abstraction traits (light sensor, servo)
//! - The [`traits::Lux`] fixed-point illuminance value
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod traits;
