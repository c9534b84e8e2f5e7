use crate::{
    Configuration, DEFAULT_ADDRESS, DEFAULT_SENSITIVITY, DeviceIds, Register, SampleAverage,
    Tmp006Result,
    registers::{decode_unsigned, encode_word},
    traits::Addressing,
    traits_async::InteractAsync,
};
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

/// A TMP006 infrared thermopile sensor on an asynchronous bus.
///
/// Takes ownership of an I2C bus (implementing [`I2c`](embedded_hal_async::i2c::I2c) trait).
pub struct Tmp006Async<I> {
    pub(crate) i2c: I,
    pub(crate) addr: u8,
    pub(crate) averaging: SampleAverage,
    pub(crate) sensitivity: f64,
    pub(crate) initialized: bool,
}

impl<I> Tmp006Async<I> {
    /// Creates a new instance of [`Tmp006Async`] with the given I2C interface.
    pub fn new(i2c: I) -> Self {
        Self {
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
    pub fn with_sensitivity(mut self, s0: f64) -> Self {
        self.sensitivity = s0;
        self
    }

    /// Whether the sensor has been put into continuous conversion mode.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Release the underlying I2C bus.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c<SevenBitAddress>> Tmp006Async<I> {
    pub(crate) async fn read_word(&mut self, register: u8) -> Tmp006Result<[u8; 2], I::Error> {
        let mut buf = [0; 2];
        self.i2c.write_read(self.addr, &[register], &mut buf).await?;
        Ok(buf)
    }

    pub(crate) async fn write_word(
        &mut self,
        register: u8,
        word: u16,
    ) -> Tmp006Result<(), I::Error> {
        let [msb, lsb] = encode_word(word);
        self.i2c.write(self.addr, &[register, msb, lsb]).await?;
        Ok(())
    }

    /// Read both identification registers.
    pub async fn device_ids(&mut self) -> Tmp006Result<DeviceIds, I::Error> {
        let manufacturer = decode_unsigned(self.read_word(Register::ManufacturerId.addr()).await?);
        let device = decode_unsigned(self.read_word(Register::DeviceId.addr()).await?);
        Ok(DeviceIds {
            manufacturer,
            device,
        })
    }

    /// Read back the configuration register.
    pub async fn configuration(&mut self) -> Tmp006Result<Configuration, I::Error> {
        let mut cfg = Configuration::new();
        cfg.async_read(self).await?;
        Ok(cfg)
    }
}

impl InteractAsync for Configuration {
    async fn async_read<I: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Tmp006Async<I>,
    ) -> Tmp006Result<(), I::Error> {
        *self = Self::from_bits(decode_unsigned(dev.read_word(Self::REGISTER).await?));
        Ok(())
    }

    async fn async_write<I: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Tmp006Async<I>,
    ) -> Tmp006Result<(), I::Error> {
        dev.write_word(Self::REGISTER, self.into_bits()).await
    }
}
