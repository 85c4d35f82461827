//! BTS7960 output stage implementation using ESP32 LEDC PWM.
//!
//! The BTS7960 is controlled via two PWM signals plus an enable line:
//! - RPWM (GPIO2): forward PWM
//! - LPWM (GPIO3): reverse PWM, held at 0% for single-direction operation
//! - R_EN + L_EN (GPIO4, jumpered together): driver enable

use crate::traits::DriverOutputs;
use esp_idf_hal::gpio::{Output, OutputPin, PinDriver};
use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;

/// BTS7960 output stage for ESP32.
///
/// Uses the LEDC peripheral for PWM generation at 20kHz with 10-bit
/// resolution (1024 duty steps) and a plain GPIO output for the enable
/// line.
///
/// # Hardware Setup
///
/// Connect to the BTS7960 module:
/// - GPIO2 → RPWM (forward)
/// - GPIO3 → LPWM (reverse)
/// - GPIO4 → R_EN + L_EN (jumpered together)
///
/// # Example
///
/// ```ignore
/// use rs_motor::hal::esp32::Esp32Driver;
/// use rs_motor::traits::DriverOutputs;
///
/// let peripherals = Peripherals::take()?;
/// let mut driver = Esp32Driver::new(
///     peripherals.pins.gpio2,
///     peripherals.pins.gpio3,
///     peripherals.pins.gpio4,
///     peripherals.ledc.timer0,
///     peripherals.ledc.channel0,
///     peripherals.ledc.channel1,
/// )?;
///
/// driver.set_enable(true)?;
/// driver.set_forward_duty(512)?; // ~50%
/// ```
pub struct Esp32Driver<'d, EN>
where
    EN: OutputPin,
{
    /// Forward PWM channel (RPWM on BTS7960)
    fwd_pwm: LedcDriver<'d>,
    /// Reverse PWM channel (LPWM on BTS7960)
    rev_pwm: LedcDriver<'d>,
    /// Enable line (R_EN + L_EN)
    enable: PinDriver<'d, EN, Output>,
}

impl<'d, EN> Esp32Driver<'d, EN>
where
    EN: OutputPin,
{
    /// PWM frequency in Hz (20kHz is above audible range)
    const PWM_FREQ_HZ: u32 = 20_000;

    /// PWM resolution (10-bit = 1024 steps)
    const PWM_RESOLUTION: Resolution = Resolution::Bits10;

    /// Maximum duty value for 10-bit resolution
    const MAX_DUTY: u32 = 1023;

    /// Creates a new BTS7960 output stage.
    ///
    /// # Arguments
    ///
    /// * `fwd_pwm_pin` - GPIO for forward PWM (typically GPIO2)
    /// * `rev_pwm_pin` - GPIO for reverse PWM (typically GPIO3)
    /// * `enable_pin` - GPIO for the driver enable line (typically GPIO4)
    /// * `timer` - LEDC timer peripheral
    /// * `fwd_channel` - LEDC channel for forward PWM
    /// * `rev_channel` - LEDC channel for reverse PWM
    ///
    /// # Errors
    ///
    /// Returns an error if PWM or GPIO initialization fails.
    pub fn new<T, TI, FC, FCI, RC, RCI, FP, FPI, RP, RPI>(
        fwd_pwm_pin: FP,
        rev_pwm_pin: RP,
        enable_pin: impl Peripheral<P = EN> + 'd,
        timer: T,
        fwd_channel: FC,
        rev_channel: RC,
    ) -> Result<Self, esp_idf_hal::sys::EspError>
    where
        TI: esp_idf_hal::ledc::LedcTimer + 'd,
        T: Peripheral<P = TI> + 'd,
        FCI: esp_idf_hal::ledc::LedcChannel<SpeedMode = TI::SpeedMode> + 'd,
        FC: Peripheral<P = FCI> + 'd,
        RCI: esp_idf_hal::ledc::LedcChannel<SpeedMode = TI::SpeedMode> + 'd,
        RC: Peripheral<P = RCI> + 'd,
        FPI: esp_idf_hal::gpio::OutputPin + 'd,
        FP: Peripheral<P = FPI> + 'd,
        RPI: esp_idf_hal::gpio::OutputPin + 'd,
        RP: Peripheral<P = RPI> + 'd,
    {
        // Configure LEDC timer: 20kHz, 10-bit resolution
        let timer_config = TimerConfig::default()
            .frequency(Self::PWM_FREQ_HZ.Hz())
            .resolution(Self::PWM_RESOLUTION);
        let timer_driver = LedcTimerDriver::new(timer, &timer_config)?;

        // Configure PWM channels
        let fwd_pwm = LedcDriver::new(fwd_channel, &timer_driver, fwd_pwm_pin)?;
        let rev_pwm = LedcDriver::new(rev_channel, &timer_driver, rev_pwm_pin)?;

        // Enable line starts low; begin() asserts it
        let enable = PinDriver::output(enable_pin)?;

        let mut stage = Self {
            fwd_pwm,
            rev_pwm,
            enable,
        };

        // Ensure motor starts stopped
        stage.configure()?;

        Ok(stage)
    }
}

impl<EN> DriverOutputs for Esp32Driver<'_, EN>
where
    EN: OutputPin,
{
    type Error = esp_idf_hal::sys::EspError;

    fn configure(&mut self) -> Result<(), Self::Error> {
        // Pin modes are fixed at construction by the esp-idf typestate;
        // configure resets both channels to a known idle level.
        self.fwd_pwm.set_duty(0)?;
        self.rev_pwm.set_duty(0)?;
        Ok(())
    }

    fn set_enable(&mut self, enabled: bool) -> Result<(), Self::Error> {
        if enabled {
            self.enable.set_high()
        } else {
            self.enable.set_low()
        }
    }

    fn set_forward_duty(&mut self, duty: u32) -> Result<(), Self::Error> {
        self.fwd_pwm.set_duty(duty.min(Self::MAX_DUTY))
    }

    fn set_reverse_duty(&mut self, duty: u32) -> Result<(), Self::Error> {
        self.rev_pwm.set_duty(duty.min(Self::MAX_DUTY))
    }

    fn max_duty(&self) -> u32 {
        Self::MAX_DUTY
    }
}
