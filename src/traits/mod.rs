//! Trait definitions for hardware abstraction.
//!
//! This module defines the core abstractions that allow rs-motor to run on
//! different hardware (ESP32, desktop mock) without changing the control
//! logic.
//!
//! # Hardware Abstraction
//!
//! The key hardware traits are:
//!
//! - [`DriverOutputs`]: PWM and enable outputs of the motor driver stage
//! - [`PulseInput`]: Edge-interrupt pulse sensor input
//! - [`Clock`]: Monotonic time source for `no_std` environments

pub mod hardware;

pub use hardware::*;
