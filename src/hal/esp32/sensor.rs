//! Hall sensor input with edge-interrupt pulse dispatch for ESP32.
//!
//! A single Hall-effect switch with one magnet on the motor shaft produces
//! one falling edge per revolution (open-collector output pulled up by the
//! internal resistor). Each edge fires a GPIO interrupt whose only work is
//! one atomic increment of the attached [`PulseCounter`].
//!
//! [`PulseCounter`]: crate::PulseCounter

use crate::pulse::PulseCounter;
use crate::traits::PulseInput;
use esp_idf_hal::gpio::{Input, InputPin, InterruptType, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;

/// Hall sensor input for ESP32.
///
/// Configures the sensor GPIO with an internal pull-up and subscribes an
/// interrupt callback on the falling edge.
///
/// # Example
///
/// ```ignore
/// use rs_motor::PulseCounter;
/// use rs_motor::hal::esp32::Esp32HallSensor;
/// use rs_motor::traits::PulseInput;
///
/// let peripherals = Peripherals::take()?;
/// let mut sensor = Esp32HallSensor::new(peripherals.pins.gpio6)?;
///
/// let counter = PulseCounter::new();
/// sensor.configure()?;
/// sensor.attach(counter.clone())?;
/// // counter.take() now drains edges recorded by the ISR
/// ```
pub struct Esp32HallSensor<'d, SENSE>
where
    SENSE: InputPin + OutputPin,
{
    /// Sensor signal input
    pin: PinDriver<'d, SENSE, Input>,
}

impl<'d, SENSE> Esp32HallSensor<'d, SENSE>
where
    SENSE: InputPin + OutputPin,
{
    /// Creates a new Hall sensor input on the given GPIO.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(
        sense_pin: impl Peripheral<P = SENSE> + 'd,
    ) -> Result<Self, esp_idf_hal::sys::EspError> {
        let pin = PinDriver::input(sense_pin)?;
        Ok(Self { pin })
    }
}

impl<SENSE> PulseInput for Esp32HallSensor<'_, SENSE>
where
    SENSE: InputPin + OutputPin,
{
    type Error = esp_idf_hal::sys::EspError;

    fn configure(&mut self) -> Result<(), Self::Error> {
        // Open-collector sensor output: pull up so the idle level is defined
        // even with the sensor unconnected.
        self.pin.set_pull(Pull::Up)?;
        self.pin.set_interrupt_type(InterruptType::NegEdge)?;
        Ok(())
    }

    fn attach(&mut self, counter: PulseCounter) -> Result<(), Self::Error> {
        // SAFETY: the callback runs in ISR context and performs exactly one
        // relaxed atomic increment; it does not allocate, block, or touch
        // any non-atomic shared state.
        unsafe {
            self.pin.subscribe(move || {
                counter.record_pulse();
            })?;
        }
        self.pin.enable_interrupt()?;
        Ok(())
    }
}
