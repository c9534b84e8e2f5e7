#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

/*! # TMP006
 *
 * A no-std driver for the Texas Instruments TMP006 infrared thermopile
 * sensor, built on the [`embedded_hal::i2c::I2c`] traits.
 *
 * The sensor reports a thermopile voltage and its own die temperature.
 * The object temperature is computed from both using the correction
 * polynomial published in the TMP006 user guide (SBOU107, section 5.1).
 *
 * ```ignore
 * let mut sensor = tmp006::Tmp006::new(i2c).with_averaging(SampleAverage::Samples4);
 * if sensor.initialize() {
 *     let celsius = sensor.read_temperature();
 * }
 * ```
 */

mod conversion;
mod error;
mod reader;
mod reader_async;
mod registers;
mod registers_async;
mod traits;
mod traits_async;

pub use conversion::{
    ABSOLUTE_ZERO_CELSIUS, CELSIUS_OFFSET, DEFAULT_SENSITIVITY, DieTemperature, Sample,
    object_temperature_kelvin,
};
pub use error::Tmp006Error;
pub use registers::{Configuration, DeviceIds, Register, SampleAverage};
pub use registers_async::Tmp006Async;
pub use traits::Interact;
pub use traits_async::InteractAsync;

/// Results of TMP006-specific function calls.
pub type Tmp006Result<T, E> = Result<T, Tmp006Error<E>>;

/// Default 7-bit I2C address of the TMP006 (ADR0 and ADR1 tied to ground).
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// A TMP006 infrared thermopile sensor.
///
/// Takes ownership of an I2C bus (implementing [`I2c`](embedded_hal::i2c::I2c) trait).
/// Readings are only available after [`Tmp006::initialize`] (or [`Tmp006::init`])
/// has put the sensor into continuous conversion mode.
pub struct Tmp006<I> {
    pub(crate) i2c: I,
    pub(crate) addr: u8,
    pub(crate) averaging: SampleAverage,
    pub(crate) sensitivity: f64,
    pub(crate) initialized: bool,
}

impl<I> Tmp006<I> {
    /// Creates a new instance of `Tmp006` with the given I2C interface.
    ///
    /// No bus traffic is generated until the sensor is initialized.
    pub fn new(i2c: I) -> Self {
        Tmp006 {
            i2c,
            addr: DEFAULT_ADDRESS,
            averaging: SampleAverage::default(),
            sensitivity: DEFAULT_SENSITIVITY,
            initialized: false,
        }
    }

    /// Set the 7-bit I2C address of the sensor.
    pub fn with_address(mut self, addr: u8) -> Self {
        self.addr = addr;
        self
    }

    /// Set the number of samples the sensor averages per conversion.
    pub fn with_averaging(mut self, averaging: SampleAverage) -> Self {
        self.averaging = averaging;
        self
    }

    /// Set the thermopile sensitivity calibration factor S0.
    ///
    /// The default, [`DEFAULT_SENSITIVITY`], is the example value from the
    /// user guide and is not calibrated for any particular part.
    pub fn with_sensitivity(mut self, s0: f64) -> Self {
        self.sensitivity = s0;
        self
    }

    /// Whether the sensor has been put into continuous conversion mode.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The I2C address this instance talks to.
    pub fn address(&self) -> u8 {
        self.addr
    }

    /// Release the underlying I2C bus.
    pub fn release(self) -> I {
        self.i2c
    }
}
