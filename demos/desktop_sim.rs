//! Desktop simulation of the motor controller against the mock HAL.
//!
//! Simulates a motor whose pulse rate follows the commanded throttle,
//! driving the full control path with no hardware attached: throttle →
//! duty write, simulated Hall edges → windowed RPM → power estimate.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example desktop_sim
//! ```

use rs_motor::hal::{MockClock, MockDriver, MockSensor};
use rs_motor::traits::Clock;
use rs_motor::{MotorConfig, MotorController};

/// Simulated no-load speed at full throttle, in RPM.
const FREE_SPEED_RPM: f32 = 169.0;

/// Simulation tick, matching the controller's sample window.
const TICK_MS: u64 = 100;

fn main() {
    println!("=================================");
    println!("  rs-motor Desktop Simulation");
    println!("=================================");
    println!();

    let config = MotorConfig::default();
    let mut clock = MockClock::new();
    let mut motor = MotorController::new(MockDriver::new(), MockSensor::new(), config);
    motor.begin().expect("mock begin cannot fail");

    // Feed the ISR path the way hardware would: one handle cloned into the
    // edge source, drained only by read_rpm().
    let isr = motor.pulse_counter();

    let mut pulse_debt = 0.0f32;
    for step in 0..30 {
        // Throttle profile: ramp up, hold, back off
        let throttle = match step {
            0..=9 => step as f32 / 10.0,
            10..=19 => 1.0,
            _ => 0.3,
        };
        motor.set_throttle(throttle).expect("mock write cannot fail");

        // Simulate shaft rotation: pulses proportional to throttle, with
        // fractional carry so slow speeds still accumulate edges.
        let rpm_target = throttle * FREE_SPEED_RPM;
        pulse_debt += rpm_target * config.pulses_per_rev * TICK_MS as f32 / 60_000.0;
        while pulse_debt >= 1.0 {
            isr.record_pulse();
            pulse_debt -= 1.0;
        }

        clock.advance(TICK_MS);
        let rpm = motor.read_rpm(clock.now_ms());
        let state = motor.state();

        println!(
            "t={:>4}ms  throttle {:>3.0}%  duty {:>3}  {:>6.1} RPM  {:>4.2} W",
            clock.now_ms(),
            throttle * 100.0,
            motor.driver().forward_duty,
            rpm,
            state.power_w
        );
    }

    println!();
    println!("done: {} forward duty writes", motor.driver().forward_writes);
}
