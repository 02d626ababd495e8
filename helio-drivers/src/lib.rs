//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in helio-core for the attached peripherals:
//!
//! - Light sensors (BH1750 over I2C)
//! - Servos (SG90 over 50 Hz PWM)

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
pub mod servo;

#[cfg(test)]
mod mock;
