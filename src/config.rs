//! Calibration configuration for the motor controller.
//!
//! The original firmware hard-coded its calibration values (pulses per
//! revolution, rated operating point) next to the math that used them. Here
//! they live in [`MotorConfig`] so one binary can drive different
//! motor/sensor combinations without recompilation.
//!
//! # Example
//!
//! ```rust
//! use rs_motor::MotorConfig;
//!
//! // Use defaults (GA25-370 with a single-magnet Hall sensor)
//! let config = MotorConfig::default();
//!
//! // Or calibrate for an 11-pulse encoder on a geared motor
//! let config = MotorConfig::default()
//!     .with_pulses_per_rev(11.0)
//!     .with_rated_point(300.0, 4.2);
//! ```

/// Calibration and timing configuration for one motor.
///
/// All defaults model the GA25-370 geared DC motor with a single magnet on
/// the output shaft: 1 pulse per revolution, rated at 169 RPM / 2.5 W.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorConfig {
    /// Sensor pulses per shaft revolution.
    ///
    /// Hardware-dependent: a bare Hall sensor with one magnet gives 1.0;
    /// encoder discs give their line count times any gear reduction.
    pub pulses_per_rev: f32,
    /// Rated rotational speed of the motor in RPM.
    pub rated_rpm: f32,
    /// Power draw at the rated operating point, in watts.
    pub rated_power_w: f32,
    /// Minimum window between RPM recomputations, in milliseconds.
    ///
    /// Short windows amplify quantization noise in the pulse count; the
    /// default of 100 ms keeps readings stable at low pulse rates.
    pub sample_window_ms: u64,
    /// RPM below which the power estimate reports zero.
    ///
    /// The linear motor model is not valid near stall, so readings under
    /// this threshold are treated as "not meaningfully spinning".
    pub power_deadband_rpm: f32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            pulses_per_rev: 1.0,
            rated_rpm: 169.0,
            rated_power_w: 2.5,
            sample_window_ms: 100,
            power_deadband_rpm: 5.0,
        }
    }
}

impl MotorConfig {
    /// Set the sensor pulses per revolution.
    ///
    /// Values at or below zero are coerced to the smallest positive amount
    /// so the rate computation can never divide by zero.
    pub fn with_pulses_per_rev(mut self, pulses: f32) -> Self {
        self.pulses_per_rev = if pulses > 0.0 { pulses } else { f32::MIN_POSITIVE };
        self
    }

    /// Set the rated operating point (RPM and watts) of the motor.
    pub fn with_rated_point(mut self, rpm: f32, power_w: f32) -> Self {
        self.rated_rpm = if rpm > 0.0 { rpm } else { f32::MIN_POSITIVE };
        self.rated_power_w = power_w.max(0.0);
        self
    }

    /// Set the minimum RPM sample window in milliseconds (at least 1).
    pub fn with_sample_window_ms(mut self, ms: u64) -> Self {
        self.sample_window_ms = ms.max(1);
        self
    }

    /// Set the power-estimate dead-zone threshold in RPM.
    pub fn with_power_deadband_rpm(mut self, rpm: f32) -> Self {
        self.power_deadband_rpm = rpm.max(0.0);
        self
    }
}
