//! Hardware abstraction traits for driver outputs, pulse input, and timing.
//!
//! This module defines the platform boundary of rs-motor: everything the
//! controller needs from its environment is expressed as a trait here, which
//! is what allows the same control logic to run against the ESP32 HAL or the
//! desktop mocks.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`DriverOutputs`] | PWM + enable outputs of an H-bridge driver stage |
//! | [`PulseInput`] | Edge-interrupt pulse sensor (Hall sensor) |
//! | [`Clock`] | Monotonic millisecond time source |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations from
//! [`crate::hal::mock`]. For ESP32 hardware, use the implementations from
//! `hal::esp32` (requires the `esp32` feature).

use crate::pulse::PulseCounter;

/// Output side of a DC motor driver stage (e.g. BTS7960).
///
/// Covers the three output channels the controller drives: a forward PWM
/// channel, a reverse PWM channel, and a digital enable line. The duty
/// range is defined by the implementation via [`max_duty`](Self::max_duty).
///
/// # Implementation Notes
///
/// - `configure()` must put all three channels into output mode and is
///   expected to be idempotent.
/// - Duty values above `max_duty()` should be treated as full scale.
/// - None of these methods may block for an unbounded time; they run inside
///   the application's polling loop.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use rs_motor::traits::DriverOutputs;
///
/// struct MyDriver { /* hardware handles */ }
///
/// impl DriverOutputs for MyDriver {
///     type Error = ();
///
///     fn configure(&mut self) -> Result<(), ()> {
///         // Set pin modes, both PWM channels to 0...
///         Ok(())
///     }
///
///     fn set_enable(&mut self, enabled: bool) -> Result<(), ()> {
///         // Drive the enable line...
///         Ok(())
///     }
///
///     fn set_forward_duty(&mut self, duty: u32) -> Result<(), ()> {
///         // Write PWM duty to the forward channel...
///         Ok(())
///     }
///
///     fn set_reverse_duty(&mut self, duty: u32) -> Result<(), ()> {
///         Ok(())
///     }
/// }
/// ```
pub trait DriverOutputs {
    /// Error type for output operations.
    type Error;

    /// Configure all output channels (pin modes, PWM timers).
    ///
    /// Called once from `begin()`; must be safe to call again.
    fn configure(&mut self) -> Result<(), Self::Error>;

    /// Drive the enable line of the driver stage.
    fn set_enable(&mut self, enabled: bool) -> Result<(), Self::Error>;

    /// Write a PWM duty value to the forward channel.
    fn set_forward_duty(&mut self, duty: u32) -> Result<(), Self::Error>;

    /// Write a PWM duty value to the reverse channel.
    fn set_reverse_duty(&mut self, duty: u32) -> Result<(), Self::Error>;

    /// Full-scale duty value for this driver.
    ///
    /// Defaults to 255 (8-bit duty range).
    fn max_duty(&self) -> u32 {
        255
    }
}

/// Edge-triggered pulse sensor input (single-edge Hall sensor).
///
/// The sensor produces one digital pulse per qualifying edge. The platform
/// implementation configures the line as an input with pull-up biasing (so
/// an open-collector or unconnected sensor reads a defined idle level) and
/// dispatches each edge to the attached [`PulseCounter`] handle.
///
/// # Implementation Notes
///
/// - `attach()` hands the implementation a cloned counter handle; the
///   interrupt callback must do nothing beyond
///   [`PulseCounter::record_pulse`] (no allocation, no blocking).
/// - A polling-based implementation may call `record_pulse` from a timer
///   tick instead of a true ISR; the counter discipline is the same.
pub trait PulseInput {
    /// Error type for sensor operations.
    type Error;

    /// Configure the sensor line as an input with pull-up biasing.
    ///
    /// Must be safe to call more than once.
    fn configure(&mut self) -> Result<(), Self::Error>;

    /// Install `counter` as the edge-interrupt sink for this sensor.
    ///
    /// Every qualifying edge after this call must perform exactly one
    /// [`PulseCounter::record_pulse`].
    fn attach(&mut self, counter: PulseCounter) -> Result<(), Self::Error>;
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for the windowed RPM
/// computation. On desktop, this can wrap `std::time::Instant`. On
/// embedded, use a hardware timer.
///
/// # Example
///
/// ```rust
/// use rs_motor::traits::Clock;
/// use rs_motor::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}
