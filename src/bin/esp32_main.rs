//! ESP32-C3 SuperMini single-motor controller.
//!
//! This is the main entry point for the physical hardware build.
//! It runs a 10Hz polling loop that:
//! - Applies the commanded throttle to the BTS7960 forward PWM
//! - Samples the Hall-sensor pulse counter into an RPM reading
//! - Logs speed and estimated power draw
//!
//! The Hall sensor edge interrupt is installed by `begin()`; nothing in the
//! loop touches the pulse counter except through `read_rpm()`.
//!
//! # Build
//!
//! ```bash
//! cargo build --features esp32 --bin esp32_main
//! ```

use esp_idf_hal::peripherals::Peripherals;
use log::info;
use rs_motor::hal::esp32::{Esp32Clock, Esp32Driver, Esp32HallSensor};
use rs_motor::traits::Clock;
use rs_motor::{MotorConfig, MotorController};
use std::thread;
use std::time::Duration;

/// Main loop interval in milliseconds (10Hz; the RPM window is 100ms)
const LOOP_INTERVAL_MS: u64 = 100;

/// Demo throttle ramp step per loop tick
const THROTTLE_STEP: f32 = 0.01;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("rs-motor SuperMini controller starting");

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Driver (BTS7960 on GPIO2/3/4)
    // =========================================================================
    let driver = Esp32Driver::new(
        peripherals.pins.gpio2,
        peripherals.pins.gpio3,
        peripherals.pins.gpio4,
        peripherals.ledc.timer0,
        peripherals.ledc.channel0,
        peripherals.ledc.channel1,
    )?;
    info!("driver initialized (GPIO2/3 PWM, GPIO4 enable)");

    // =========================================================================
    // Initialize Hall Sensor (GPIO6)
    // =========================================================================
    let sensor = Esp32HallSensor::new(peripherals.pins.gpio6)?;
    info!("hall sensor initialized (GPIO6, pull-up, falling edge)");

    // =========================================================================
    // Initialize Clock and Controller
    // =========================================================================
    let clock = Esp32Clock::new();
    let mut motor = MotorController::new(driver, sensor, MotorConfig::default());
    motor.begin()?;
    info!("controller enabled, starting polling loop (10Hz)");

    // =========================================================================
    // Main Polling Loop
    // =========================================================================
    // Ramp the throttle up to full and hold it, logging telemetry each tick.
    // A supervising application would set the throttle from its own control
    // source instead.
    let mut throttle = 0.0f32;
    loop {
        let now = clock.now_ms();

        if throttle < 1.0 {
            throttle = (throttle + THROTTLE_STEP).min(1.0);
            motor.set_throttle(throttle)?;
        }

        let rpm = motor.read_rpm(now);
        let watts = motor.estimate_power();
        info!(
            "throttle {:>3.0}% | {:>7.1} RPM | {:>5.2} W",
            throttle * 100.0,
            rpm,
            watts
        );

        thread::sleep(Duration::from_millis(LOOP_INTERVAL_MS));
    }
}
