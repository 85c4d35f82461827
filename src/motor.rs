//! Main motor controller that ties everything together.
//!
//! This module provides [`MotorController`], the central component that
//! coordinates the driver outputs, the pulse sensor, the tachometer, and
//! the power model.
//!
//! # Overview
//!
//! The controller:
//! - Converts normalized throttle commands into PWM duty writes
//! - Owns the shared pulse counter the interrupt path increments
//! - Derives RPM over fixed time windows
//! - Estimates power draw from the rated operating point
//!
//! # Example
//!
//! ```rust
//! use rs_motor::{MotorConfig, MotorController};
//! use rs_motor::hal::{MockDriver, MockSensor};
//!
//! let mut motor = MotorController::new(
//!     MockDriver::new(),
//!     MockSensor::new(),
//!     MotorConfig::default(),
//! );
//! motor.begin().unwrap();
//!
//! // Drive at half throttle
//! motor.set_throttle(0.5).unwrap();
//!
//! // The interrupt path records edges; the polling path reads them back
//! let isr = motor.pulse_counter();
//! for _ in 0..6 {
//!     isr.record_pulse();
//! }
//! let rpm = motor.read_rpm(100);
//! assert_eq!(rpm, 3600.0);
//! println!("power: {:.2}W", motor.estimate_power());
//! ```
//!
//! # Interrupt Wiring
//!
//! `begin()` attaches a [`PulseCounter`] clone to the sensor input, so on
//! hardware the edge ISR increments the same accumulator the controller
//! drains. In contexts that dispatch interrupts to a callback you already
//! hold, [`handle_interrupt`](MotorController::handle_interrupt) does the
//! same increment directly.

use log::{debug, info};

use crate::config::MotorConfig;
use crate::pulse::PulseCounter;
use crate::tach::Tachometer;
use crate::traits::{DriverOutputs, PulseInput};

/// Single-motor controller: throttle out, pulses in, RPM and watts derived.
///
/// # Type Parameters
///
/// - `D`: the driver output implementation ([`DriverOutputs`] trait)
/// - `S`: the pulse sensor implementation ([`PulseInput`] trait), sharing
///   the driver's error type so every fallible method returns one error
///
/// # Thread Safety
///
/// The controller itself lives on the polling thread. Only the
/// [`PulseCounter`] crosses into interrupt context, and it is safe there by
/// construction. There is no disable operation: once `begin()` has run, the
/// driver stage stays enabled for the life of the value.
pub struct MotorController<D, S>
where
    D: DriverOutputs,
    S: PulseInput<Error = D::Error>,
{
    driver: D,
    sensor: S,
    config: MotorConfig,
    pulses: PulseCounter,
    tach: Tachometer,
    throttle: f32,
}

impl<D, S> MotorController<D, S>
where
    D: DriverOutputs,
    S: PulseInput<Error = D::Error>,
{
    /// Creates a controller over the given driver and sensor.
    ///
    /// Pure value construction: no I/O happens until [`begin`](Self::begin).
    pub fn new(driver: D, sensor: S, config: MotorConfig) -> Self {
        let tach = Tachometer::new(&config);
        Self {
            driver,
            sensor,
            config,
            pulses: PulseCounter::new(),
            tach,
            throttle: 0.0,
        }
    }

    /// Initializes the hardware and enables the driver stage.
    ///
    /// Configures the PWM and enable outputs, configures the sensor input
    /// with pull-up biasing, attaches the pulse counter as the edge sink,
    /// asserts the enable line, and forces the reverse channel low. The
    /// motor runs in one direction only; the reverse channel is held
    /// inactive for the lifetime of the controller.
    ///
    /// Idempotent: calling it again repeats the same writes.
    pub fn begin(&mut self) -> Result<(), D::Error> {
        self.driver.configure()?;
        self.sensor.configure()?;
        self.sensor.attach(self.pulses.clone())?;

        self.driver.set_enable(true)?;
        self.driver.set_reverse_duty(0)?;

        info!("motor: driver enabled, single-direction operation");
        Ok(())
    }

    /// Sets the throttle as a fraction of full power.
    ///
    /// `value` is clamped into `[0.0, 1.0]` (NaN reads as 0.0); a control
    /// surface must always produce a safe, defined output rather than
    /// refuse to drive the motor. The clamped value maps linearly onto the
    /// driver's duty range and is written to the forward channel only.
    pub fn set_throttle(&mut self, value: f32) -> Result<(), D::Error> {
        let clamped = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        // +0.5 then truncate: round-to-nearest for non-negative values
        // without pulling in std float intrinsics.
        let duty = (clamped * self.driver.max_duty() as f32 + 0.5) as u32;

        debug!("motor: throttle {:.3} -> duty {}", clamped, duty);
        self.throttle = clamped;
        self.driver.set_forward_duty(duty)
    }

    /// Convenience: throttle to zero.
    pub fn stop(&mut self) -> Result<(), D::Error> {
        self.set_throttle(0.0)
    }

    /// Records one sensor edge.
    ///
    /// Safe to invoke from interrupt context: a single atomic increment,
    /// nothing else. Platforms that register a callback at `begin()` time
    /// never need to call this; it exists for dispatch schemes that hand
    /// the application the raw interrupt.
    #[inline]
    pub fn handle_interrupt(&self) {
        self.pulses.record_pulse();
    }

    /// Returns a cloneable handle to the shared pulse counter.
    ///
    /// Pass this into an interrupt registration that outlives borrows of
    /// the controller.
    pub fn pulse_counter(&self) -> PulseCounter {
        self.pulses.clone()
    }

    /// Reads the rotational speed in RPM, recomputing at most once per
    /// sample window.
    ///
    /// `now_ms` is monotonic milliseconds from the platform [`Clock`]. If
    /// less than the configured window (default 100 ms) has elapsed since
    /// the last computation this returns the cached value and leaves the
    /// pulse counter untouched. Never negative, never non-finite.
    ///
    /// [`Clock`]: crate::traits::Clock
    pub fn read_rpm(&mut self, now_ms: u64) -> f32 {
        self.tach.sample(&self.pulses, now_ms)
    }

    /// Estimates instantaneous power draw in watts from the last RPM
    /// reading.
    ///
    /// Pure function of the cached RPM: it does not trigger a new rate
    /// computation and reads no current sensor. Below the configured
    /// dead-zone (default 5 RPM) the linear model is not valid and the
    /// estimate is 0. The estimate is deliberately uncapped; a value far
    /// above the rated power is a diagnostic signal for sensor noise or a
    /// miscalibrated `pulses_per_rev`.
    pub fn estimate_power(&self) -> f32 {
        let rpm = self.tach.rpm();
        if rpm < self.config.power_deadband_rpm {
            return 0.0;
        }
        rpm / self.config.rated_rpm * self.config.rated_power_w
    }

    /// Returns the last commanded throttle (clamped).
    #[inline]
    pub fn throttle(&self) -> f32 {
        self.throttle
    }

    /// Returns the last computed RPM without sampling.
    #[inline]
    pub fn current_rpm(&self) -> f32 {
        self.tach.rpm()
    }

    /// Returns the active configuration.
    #[inline]
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Snapshot of throttle, speed, and power for UI or diagnostics.
    pub fn state(&self) -> MotorState {
        MotorState {
            throttle: self.throttle,
            rpm: self.tach.rpm(),
            power_w: self.estimate_power(),
        }
    }

    /// Borrow the underlying driver (for inspection in tests and demos).
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

/// State snapshot for UI or diagnostic consumers.
///
/// # Example
///
/// ```rust
/// use rs_motor::{MotorConfig, MotorController};
/// use rs_motor::hal::{MockDriver, MockSensor};
///
/// let motor = MotorController::new(MockDriver::new(), MockSensor::new(), MotorConfig::default());
/// let state = motor.state();
/// assert_eq!(state.throttle, 0.0);
/// assert_eq!(state.rpm, 0.0);
/// assert_eq!(state.power_w, 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorState {
    /// Last commanded throttle (0.0 to 1.0).
    pub throttle: f32,
    /// Last computed rotational speed in RPM.
    pub rpm: f32,
    /// Estimated power draw in watts.
    pub power_w: f32,
}
