//! # rs-motor
//!
//! A single-channel DC motor controller with Hall-sensor RPM feedback and
//! open-loop power estimation.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the driver output stage, the
//!   pulse sensor input, and the time source
//! - **Interrupt-safe pulse accounting**: an atomic counter shared between
//!   the sensor ISR and the polling loop, drained with a single swap so no
//!   pulse is lost or double-counted
//! - **Windowed RPM**: rate recomputed at most once per sample window
//!   (100 ms default) for stable readings at low pulse rates
//! - **Power model**: dead-zone plus linear scale to the motor's rated
//!   operating point, calibration exposed as configuration
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions (driver outputs, pulse input, clock)
//! - `pulse` - Interrupt-safe shared pulse counter
//! - `tach` - Windowed pulses-to-RPM computation
//! - `config` - Calibration configuration (pulses/rev, rated point)
//! - `motor` - Main controller that ties everything together
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_motor::{MotorConfig, MotorController};
//! use rs_motor::hal::{MockDriver, MockSensor};
//!
//! // Create controller with mock hardware
//! let mut motor = MotorController::new(
//!     MockDriver::new(),
//!     MockSensor::new(),
//!     MotorConfig::default(),
//! );
//! motor.begin().unwrap();
//!
//! // Drive the motor at 40% throttle
//! motor.set_throttle(0.4).unwrap();
//!
//! // In your polling loop: read_rpm with the platform clock, then power
//! let rpm = motor.read_rpm(100);
//! let watts = motor.estimate_power();
//! assert!(rpm >= 0.0 && watts >= 0.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Calibration configuration (pulses per revolution, rated operating point).
pub mod config;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Main motor controller that coordinates outputs, pulses, and estimates.
pub mod motor;
/// Interrupt-safe pulse accounting shared between ISR and polling contexts.
pub mod pulse;
/// Windowed RPM computation from accumulated pulses.
pub mod tach;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use config::MotorConfig;
pub use motor::{MotorController, MotorState};
pub use pulse::PulseCounter;
pub use tach::Tachometer;
pub use traits::{Clock, DriverOutputs, PulseInput};
