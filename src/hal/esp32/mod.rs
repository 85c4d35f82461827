//! ESP32-C3 SuperMini hardware abstraction layer for single-motor control.
//!
//! This module provides hardware implementations for the ESP32-C3 SuperMini
//! board driving one DC motor through a BTS7960 driver, with a Hall sensor
//! on the output shaft for RPM feedback.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **Motor Driver**: BTS7960 (43A capacity)
//! - **Motor**: GA25-370 geared DC motor
//! - **Sensor**: Hall-effect switch with one magnet on the shaft
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.

mod clock;
mod driver;
mod sensor;

pub use clock::Esp32Clock;
pub use driver::Esp32Driver;
pub use sensor::Esp32HallSensor;

/// Pin assignments for SuperMini ESP32-C3.
///
/// These constants match the wiring diagram:
/// - Motor control via BTS7960 on GPIO2-4
/// - Hall sensor on GPIO6
pub mod pins {
    // =========================================================================
    // Motor Control (BTS7960)
    // =========================================================================

    /// Forward PWM output (RPWM on BTS7960)
    pub const FWD_PWM: i32 = 2;

    /// Reverse PWM output (LPWM on BTS7960, held inactive)
    pub const REV_PWM: i32 = 3;

    /// Driver enable output (R_EN and L_EN jumpered together)
    pub const DRIVER_EN: i32 = 4;

    // =========================================================================
    // Hall Sensor
    // =========================================================================

    /// Hall sensor input (open-collector, needs internal pull-up)
    pub const HALL_SENSE: i32 = 6;
}
