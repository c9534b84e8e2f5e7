use crate::{
    ABSOLUTE_ZERO_CELSIUS, Configuration, DeviceIds, DieTemperature, Interact, Register, Sample,
    Tmp006, Tmp006Error, Tmp006Result, registers::decode_signed,
};
use embedded_hal::i2c::{I2c, SevenBitAddress};

impl<I: I2c<SevenBitAddress>> Tmp006<I> {
    /// Reset the sensor and enter continuous conversion mode.
    ///
    /// Writes the reset word, reads the identification registers and then
    /// writes the configured averaging. The identification is returned for
    /// information and is not checked.
    pub fn init(&mut self) -> Tmp006Result<DeviceIds, I::Error> {
        self.initialized = false;
        let mut cfg = Configuration::RESET;
        cfg.write(self)?;
        log::debug!("TMP006 at {:#04x}: reset", self.addr);
        let ids = self.device_ids()?;
        log::debug!(
            "TMP006 at {:#04x}: manufacturer {:04X}, device {:04X}",
            self.addr,
            ids.manufacturer,
            ids.device
        );
        cfg = Configuration::continuous(self.averaging);
        cfg.write(self)?;
        log::debug!(
            "TMP006 at {:#04x}: continuous conversion, {} samples",
            self.addr,
            self.averaging.samples()
        );
        self.initialized = true;
        Ok(ids)
    }

    /// Initialize the sensor, reporting only success.
    ///
    /// See [`Tmp006::init`] for the error-carrying variant.
    pub fn initialize(&mut self) -> bool {
        match self.init() {
            Ok(_) => true,
            Err(e) => {
                log::warn!("TMP006 at {:#04x}: initialization failed: {:?}", self.addr, e);
                false
            }
        }
    }

    /// Read the raw sensor voltage and die temperature registers.
    pub fn read_sample(&mut self) -> Tmp006Result<Sample, I::Error> {
        if !self.initialized {
            return Err(Tmp006Error::Uninitialized);
        }
        let object_voltage_raw = decode_signed(self.read_word(Register::ObjectVoltage.addr())?);
        let die_temperature_raw = decode_signed(self.read_word(Register::DieTemperature.addr())?);
        Ok(Sample::new(object_voltage_raw, die_temperature_raw))
    }

    /// Read the object temperature in °C.
    pub fn object_temperature(&mut self) -> Tmp006Result<f64, I::Error> {
        let sample = self.read_sample()?;
        Ok(sample.object_temperature(self.sensitivity))
    }

    /// Read the object temperature in °C.
    ///
    /// Never fails: any error is logged and reported as
    /// [`ABSOLUTE_ZERO_CELSIUS`]. Samples outside the conversion's domain
    /// yield NaN, see [`Sample::object_temperature`].
    pub fn read_temperature(&mut self) -> f64 {
        self.object_temperature().unwrap_or_else(|e| {
            log::warn!("TMP006 at {:#04x}: read failed: {:?}", self.addr, e);
            ABSOLUTE_ZERO_CELSIUS
        })
    }

    /// Read the die temperature in °C.
    pub fn die_temperature(&mut self) -> Tmp006Result<DieTemperature, I::Error> {
        if !self.initialized {
            return Err(Tmp006Error::Uninitialized);
        }
        let raw = decode_signed(self.read_word(Register::DieTemperature.addr())?);
        Ok(Sample::new(0, raw).die_temperature())
    }

    /// Whether a new conversion result is available.
    pub fn data_ready(&mut self) -> Tmp006Result<bool, I::Error> {
        Ok(self.configuration()?.data_ready())
    }

    /// Stop conversions. [`Tmp006::init`] must be called again before reading.
    pub fn power_down(&mut self) -> Tmp006Result<(), I::Error> {
        Configuration::power_down().write(self)?;
        self.initialized = false;
        Ok(())
    }
}
