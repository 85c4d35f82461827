//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware traits, enabling
//! development and testing on desktop without physical hardware.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockDriver`] | [`DriverOutputs`] | Records duty/enable writes |
//! | [`MockSensor`] | [`PulseInput`] | Fires simulated sensor edges |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//!
//! # Example
//!
//! ```rust
//! use rs_motor::{MotorConfig, MotorController};
//! use rs_motor::hal::{MockClock, MockDriver, MockSensor};
//! use rs_motor::traits::Clock;
//!
//! let mut clock = MockClock::new();
//! let mut motor = MotorController::new(
//!     MockDriver::new(),
//!     MockSensor::new(),
//!     MotorConfig::default(),
//! );
//! motor.begin().unwrap();
//! motor.set_throttle(0.75).unwrap();
//!
//! // Verify the duty write
//! assert_eq!(motor.driver().forward_duty, 191); // round(0.75 * 255)
//!
//! clock.advance(100);
//! let rpm = motor.read_rpm(clock.now_ms());
//! assert_eq!(rpm, 0.0); // no pulses fired yet
//! ```
//!
//! [`DriverOutputs`]: crate::traits::DriverOutputs
//! [`PulseInput`]: crate::traits::PulseInput
//! [`Clock`]: crate::traits::Clock

use crate::pulse::PulseCounter;
use crate::traits::{Clock, DriverOutputs, PulseInput};

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock driver stage for testing.
///
/// Records every configure, enable, and duty write for verification. Use
/// the public fields to inspect state after test operations.
///
/// # Example
///
/// ```rust
/// use rs_motor::hal::MockDriver;
/// use rs_motor::traits::DriverOutputs;
///
/// let mut driver = MockDriver::new();
/// driver.configure().unwrap();
/// driver.set_enable(true).unwrap();
/// driver.set_forward_duty(128).unwrap();
///
/// assert!(driver.configured);
/// assert!(driver.enabled);
/// assert_eq!(driver.forward_duty, 128);
/// assert_eq!(driver.forward_writes, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Whether `configure()` has been called.
    pub configured: bool,
    /// Current enable line level.
    pub enabled: bool,
    /// Last duty written to the forward channel.
    pub forward_duty: u32,
    /// Last duty written to the reverse channel.
    pub reverse_duty: u32,
    /// Number of forward duty writes.
    pub forward_writes: usize,
    /// Number of reverse duty writes.
    pub reverse_writes: usize,
    /// Full-scale duty reported by `max_duty()`.
    pub duty_range: u32,
}

impl MockDriver {
    /// Creates a new mock driver with the default 8-bit duty range.
    pub fn new() -> Self {
        Self {
            duty_range: 255,
            ..Self::default()
        }
    }

    /// Creates a mock driver reporting a custom full-scale duty.
    pub fn with_duty_range(mut self, max: u32) -> Self {
        self.duty_range = max;
        self
    }
}

impl DriverOutputs for MockDriver {
    type Error = ();

    fn configure(&mut self) -> Result<(), ()> {
        self.configured = true;
        Ok(())
    }

    fn set_enable(&mut self, enabled: bool) -> Result<(), ()> {
        self.enabled = enabled;
        Ok(())
    }

    fn set_forward_duty(&mut self, duty: u32) -> Result<(), ()> {
        self.forward_duty = duty.min(self.duty_range);
        self.forward_writes += 1;
        Ok(())
    }

    fn set_reverse_duty(&mut self, duty: u32) -> Result<(), ()> {
        self.reverse_duty = duty.min(self.duty_range);
        self.reverse_writes += 1;
        Ok(())
    }

    fn max_duty(&self) -> u32 {
        self.duty_range
    }
}

/// Mock pulse sensor for testing.
///
/// Holds the attached [`PulseCounter`] and lets tests fire simulated sensor
/// edges through it, exactly the path a hardware ISR would take.
///
/// # Example
///
/// ```rust
/// use rs_motor::PulseCounter;
/// use rs_motor::hal::MockSensor;
/// use rs_motor::traits::PulseInput;
///
/// let mut sensor = MockSensor::new();
/// let counter = PulseCounter::new();
///
/// sensor.configure().unwrap();
/// sensor.attach(counter.clone()).unwrap();
///
/// sensor.fire_edges(3);
/// assert_eq!(counter.peek(), 3);
/// ```
#[derive(Debug, Default)]
pub struct MockSensor {
    /// Whether `configure()` has been called (pull-up assumed).
    pub configured: bool,
    /// The counter handle installed by `attach()`, if any.
    pub attached: Option<PulseCounter>,
}

impl MockSensor {
    /// Creates a new mock sensor with nothing attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates `count` sensor edges through the attached counter.
    ///
    /// Edges fired before `attach()` are silently dropped, matching a real
    /// sensor wiggling before the interrupt is installed.
    pub fn fire_edges(&self, count: u32) {
        if let Some(counter) = &self.attached {
            for _ in 0..count {
                counter.record_pulse();
            }
        }
    }
}

impl PulseInput for MockSensor {
    type Error = ();

    fn configure(&mut self) -> Result<(), ()> {
        self.configured = true;
        Ok(())
    }

    fn attach(&mut self, counter: PulseCounter) -> Result<(), ()> {
        self.attached = Some(counter);
        Ok(())
    }
}

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use rs_motor::hal::MockClock;
/// use rs_motor::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self { current_ms: 0 }
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // MockDriver Tests
    // =========================================================================

    #[test]
    fn mock_driver_default() {
        let driver = MockDriver::new();
        assert!(!driver.configured);
        assert!(!driver.enabled);
        assert_eq!(driver.forward_duty, 0);
        assert_eq!(driver.reverse_duty, 0);
        assert_eq!(driver.forward_writes, 0);
        assert_eq!(driver.max_duty(), 255);
    }

    #[test]
    fn mock_driver_records_writes() {
        let mut driver = MockDriver::new();
        driver.set_forward_duty(100).unwrap();
        driver.set_forward_duty(200).unwrap();

        assert_eq!(driver.forward_duty, 200);
        assert_eq!(driver.forward_writes, 2);
    }

    #[test]
    fn mock_driver_saturates_at_duty_range() {
        let mut driver = MockDriver::new();
        driver.set_forward_duty(10_000).unwrap();
        assert_eq!(driver.forward_duty, 255);
    }

    #[test]
    fn mock_driver_custom_duty_range() {
        let driver = MockDriver::new().with_duty_range(1023);
        assert_eq!(driver.max_duty(), 1023);
    }

    #[test]
    fn mock_driver_enable_toggles() {
        let mut driver = MockDriver::new();
        driver.set_enable(true).unwrap();
        assert!(driver.enabled);
        driver.set_enable(false).unwrap();
        assert!(!driver.enabled);
    }

    // =========================================================================
    // MockSensor Tests
    // =========================================================================

    #[test]
    fn mock_sensor_default() {
        let sensor = MockSensor::new();
        assert!(!sensor.configured);
        assert!(sensor.attached.is_none());
    }

    #[test]
    fn mock_sensor_edges_before_attach_dropped() {
        let sensor = MockSensor::new();
        sensor.fire_edges(10); // nowhere to go
        assert!(sensor.attached.is_none());
    }

    #[test]
    fn mock_sensor_edges_reach_counter() {
        let mut sensor = MockSensor::new();
        let counter = PulseCounter::new();
        sensor.attach(counter.clone()).unwrap();

        sensor.fire_edges(4);
        assert_eq!(counter.peek(), 4);
    }

    // =========================================================================
    // MockClock Tests
    // =========================================================================

    #[test]
    fn mock_clock_default() {
        let clock = MockClock::new();
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn mock_clock_set() {
        let mut clock = MockClock::new();
        clock.set(1000);
        assert_eq!(clock.now_ms(), 1000);
    }

    #[test]
    fn mock_clock_advance() {
        let mut clock = MockClock::new();
        clock.advance(500);
        assert_eq!(clock.now_ms(), 500);
        clock.advance(250);
        assert_eq!(clock.now_ms(), 750);
    }
}
