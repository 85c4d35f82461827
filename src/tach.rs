//! Windowed RPM computation from accumulated sensor pulses.
//!
//! [`Tachometer`] is the single place where elapsed pulses become a rate.
//! It drains the shared [`PulseCounter`] at most once per sample window and
//! caches the result, so callers can poll as often as they like without
//! amplifying quantization noise.

use log::{debug, warn};

use crate::config::MotorConfig;
use crate::pulse::PulseCounter;

/// Milliseconds per minute, for the pulses → RPM conversion.
const MS_PER_MINUTE: f32 = 60_000.0;

/// Converts pulse counts into a rotational speed over fixed time windows.
///
/// All state here is touched only from the polling context; the interrupt
/// side ends at the [`PulseCounter`].
///
/// # Example
///
/// ```rust
/// use rs_motor::{MotorConfig, PulseCounter, Tachometer};
///
/// let counter = PulseCounter::new();
/// let mut tach = Tachometer::new(&MotorConfig::default());
///
/// // 6 pulses over a full 100ms window: 6 rev / (100/60000) min = 3600 RPM
/// for _ in 0..6 {
///     counter.record_pulse();
/// }
/// assert_eq!(tach.sample(&counter, 100), 3600.0);
///
/// // Within the same window the cached value is returned untouched.
/// counter.record_pulse();
/// assert_eq!(tach.sample(&counter, 150), 3600.0);
/// assert_eq!(counter.peek(), 1);
/// ```
#[derive(Debug)]
pub struct Tachometer {
    /// Minimum elapsed time between recomputations.
    window_ms: u64,
    /// Sensor pulses per shaft revolution.
    pulses_per_rev: f32,
    /// Monotonic timestamp of the last completed sample.
    last_sample_ms: u64,
    /// Last computed speed, cached between windows. Always `>= 0`.
    current_rpm: f32,
}

impl Tachometer {
    /// Creates a tachometer using the window and calibration from `config`.
    pub fn new(config: &MotorConfig) -> Self {
        Self {
            window_ms: config.sample_window_ms.max(1),
            pulses_per_rev: if config.pulses_per_rev > 0.0 {
                config.pulses_per_rev
            } else {
                f32::MIN_POSITIVE
            },
            last_sample_ms: 0,
            current_rpm: 0.0,
        }
    }

    /// Returns the last computed speed without sampling.
    #[inline]
    pub fn rpm(&self) -> f32 {
        self.current_rpm
    }

    /// Returns the timestamp of the last completed sample.
    #[inline]
    pub fn last_sample_ms(&self) -> u64 {
        self.last_sample_ms
    }

    /// Samples the counter if a full window has elapsed, returning the
    /// current (possibly cached) speed.
    ///
    /// Within a window this is a cheap timestamp comparison and the counter
    /// is left untouched. Once the window has elapsed the counter is drained
    /// with a single atomic swap and the cached speed is recomputed.
    ///
    /// Degenerate timing (a `now_ms` at or before the last sample, as after
    /// clock wraparound or misordered calls) is treated as "no update this
    /// cycle": the cached value is returned and nothing is consumed.
    pub fn sample(&mut self, counter: &PulseCounter, now_ms: u64) -> f32 {
        let elapsed_ms = match now_ms.checked_sub(self.last_sample_ms) {
            Some(elapsed) if elapsed >= self.window_ms => elapsed,
            Some(_) => return self.current_rpm,
            None => {
                warn!(
                    "tach: clock went backwards ({}ms < {}ms), skipping sample",
                    now_ms, self.last_sample_ms
                );
                return self.current_rpm;
            }
        };

        let pulses = counter.take();
        let revolutions = pulses as f32 / self.pulses_per_rev;
        let elapsed_minutes = elapsed_ms as f32 / MS_PER_MINUTE;
        let rpm = revolutions / elapsed_minutes;

        // window_ms >= 1 keeps elapsed_minutes strictly positive, but a
        // miscalibrated pulses_per_rev could still overflow to infinity.
        if rpm.is_finite() {
            self.current_rpm = rpm;
        } else {
            warn!("tach: non-finite rate from {} pulses, keeping previous", pulses);
        }
        self.last_sample_ms = now_ms;

        debug!(
            "tach: {} pulses / {}ms -> {:.1} RPM",
            pulses, elapsed_ms, self.current_rpm
        );
        self.current_rpm
    }
}
