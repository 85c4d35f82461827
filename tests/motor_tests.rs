//! Integration tests for the motor controller

use rs_motor::{
    hal::{MockClock, MockDriver, MockSensor},
    traits::Clock,
    MotorConfig, MotorController,
};

fn controller() -> MotorController<MockDriver, MockSensor> {
    MotorController::new(MockDriver::new(), MockSensor::new(), MotorConfig::default())
}

#[test]
fn begin_enables_driver_and_parks_reverse() {
    let mut motor = controller();
    motor.begin().unwrap();

    let driver = motor.driver();
    assert!(driver.configured);
    assert!(driver.enabled);
    assert_eq!(driver.reverse_duty, 0);
}

#[test]
fn throttle_duty_table() {
    // value -> round(clamp(value, 0, 1) * 255)
    let cases = [
        (-10.0, 0),
        (-0.001, 0),
        (0.0, 0),
        (0.25, 64),
        (0.5, 128),
        (0.75, 191),
        (1.0, 255),
        (1.5, 255),
        (10.0, 255),
    ];

    let mut motor = controller();
    motor.begin().unwrap();

    for (value, duty) in cases {
        motor.set_throttle(value).unwrap();
        assert_eq!(
            motor.driver().forward_duty,
            duty,
            "throttle {} should write duty {}",
            value,
            duty
        );
    }
}

#[test]
fn throttle_never_touches_reverse_channel() {
    let mut motor = controller();
    motor.begin().unwrap();
    let reverse_writes_after_begin = motor.driver().reverse_writes;

    motor.set_throttle(0.3).unwrap();
    motor.set_throttle(1.0).unwrap();
    motor.set_throttle(-2.0).unwrap();

    assert_eq!(motor.driver().reverse_writes, reverse_writes_after_begin);
    assert_eq!(motor.driver().reverse_duty, 0);
}

#[test]
fn concrete_scenario_6_pulses_100ms() {
    let mut clock = MockClock::new();
    let mut motor = controller();
    motor.begin().unwrap();

    let isr = motor.pulse_counter();
    for _ in 0..6 {
        isr.record_pulse();
    }

    clock.advance(100);
    let rpm = motor.read_rpm(clock.now_ms());
    assert_eq!(rpm, 3600.0); // 6 rev / (100/60000) min

    let watts = motor.estimate_power();
    assert!((watts - 3600.0 / 169.0 * 2.5).abs() < 1e-3);
}

#[test]
fn rpm_cached_within_window() {
    let mut clock = MockClock::new();
    let mut motor = controller();
    motor.begin().unwrap();

    let isr = motor.pulse_counter();
    for _ in 0..6 {
        isr.record_pulse();
    }
    clock.advance(100);
    let first = motor.read_rpm(clock.now_ms());

    // More pulses inside the next window must not change the reading
    isr.record_pulse();
    clock.advance(50);
    let second = motor.read_rpm(clock.now_ms());
    assert_eq!(first, second);

    // ...but they are not lost: the next full window includes them
    clock.advance(50);
    let third = motor.read_rpm(clock.now_ms());
    assert_eq!(third, 600.0); // 1 rev over 100ms
}

#[test]
fn no_pulse_loss_across_window_boundaries() {
    let mut clock = MockClock::new();
    let mut motor = controller();
    motor.begin().unwrap();
    let isr = motor.pulse_counter();

    // Fire a known total across many windows and confirm the sum of the
    // per-window revolutions matches exactly.
    let mut revolutions_seen = 0.0f64;
    let mut fired: u64 = 0;
    for window in 0..50u64 {
        let burst = window % 7;
        for _ in 0..burst {
            isr.record_pulse();
        }
        fired += burst;

        clock.advance(100);
        let rpm = motor.read_rpm(clock.now_ms());
        // rpm = revs / (100/60000 min) -> revs = rpm / 600
        revolutions_seen += f64::from(rpm) / 600.0;
    }

    assert!((revolutions_seen - fired as f64).abs() < 1e-6);
    assert_eq!(motor.pulse_counter().peek(), 0);
}

#[test]
fn interrupts_interleaved_with_reads_lose_nothing() {
    use std::thread;

    let mut motor = controller();
    motor.begin().unwrap();
    let isr = motor.pulse_counter();

    const TOTAL_PULSES: u32 = 50_000;
    let writer = {
        let isr = isr.clone();
        thread::spawn(move || {
            for _ in 0..TOTAL_PULSES {
                isr.record_pulse();
            }
        })
    };

    // Poll read_rpm with an advancing clock while the "ISR" hammers the
    // counter from another thread. At 1 pulse/rev each 100ms window holds a
    // whole number of revolutions, so rounding undoes the f32 quantization.
    let mut revolutions_seen = 0.0f64;
    let mut now_ms = 0u64;
    while !writer.is_finished() {
        now_ms += 100;
        revolutions_seen += (f64::from(motor.read_rpm(now_ms)) / 600.0).round();
    }
    writer.join().unwrap();

    // Final window picks up the stragglers
    now_ms += 100;
    revolutions_seen += (f64::from(motor.read_rpm(now_ms)) / 600.0).round();

    assert_eq!(
        revolutions_seen,
        f64::from(TOTAL_PULSES),
        "every recorded pulse must appear in exactly one window"
    );
}

#[test]
fn power_model_properties() {
    let mut motor = controller();

    // Below dead-zone: exactly zero
    let isr = motor.pulse_counter();
    for _ in 0..4 {
        isr.record_pulse();
    }
    assert_eq!(motor.read_rpm(60_000), 4.0);
    assert_eq!(motor.estimate_power(), 0.0);

    // At the rated point: exactly rated power
    for _ in 0..169 {
        isr.record_pulse();
    }
    assert_eq!(motor.read_rpm(120_000), 169.0);
    assert_eq!(motor.estimate_power(), 2.5);
}

#[test]
fn estimate_power_does_not_sample() {
    let mut motor = controller();
    let isr = motor.pulse_counter();

    for _ in 0..10 {
        isr.record_pulse();
    }
    // No read_rpm yet: estimate stays at the initial 0 RPM reading
    assert_eq!(motor.estimate_power(), 0.0);
    assert_eq!(motor.pulse_counter().peek(), 10);
}

#[test]
fn sensor_edges_flow_via_attached_handle() {
    // begin() wires the sensor's interrupt sink to the same accumulator
    // the controller drains.
    let mut motor = controller();
    motor.begin().unwrap();

    motor.handle_interrupt();
    motor.handle_interrupt();
    motor.handle_interrupt();

    assert_eq!(motor.read_rpm(100), 1800.0);
}

#[test]
fn state_snapshot() {
    let mut motor = controller();
    motor.begin().unwrap();
    motor.set_throttle(0.6).unwrap();

    let isr = motor.pulse_counter();
    for _ in 0..6 {
        isr.record_pulse();
    }
    motor.read_rpm(100);

    let state = motor.state();
    assert_eq!(state.throttle, 0.6);
    assert_eq!(state.rpm, 3600.0);
    assert!((state.power_w - 53.254_44).abs() < 1e-3);
}
