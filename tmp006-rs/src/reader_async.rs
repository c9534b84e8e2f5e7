use crate::{
    ABSOLUTE_ZERO_CELSIUS, Configuration, DeviceIds, DieTemperature, InteractAsync, Register,
    Sample, Tmp006Async, Tmp006Error, Tmp006Result, registers::decode_signed,
};
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

impl<I: I2c<SevenBitAddress>> Tmp006Async<I> {
    /// Reset the sensor and enter continuous conversion mode.
    ///
    /// Same sequence as [`Tmp006::init`](crate::Tmp006::init).
    pub async fn init(&mut self) -> Tmp006Result<DeviceIds, I::Error> {
        self.initialized = false;
        let mut cfg = Configuration::RESET;
        cfg.async_write(self).await?;
        let ids = self.device_ids().await?;
        log::debug!(
            "TMP006 at {:#04x}: manufacturer {:04X}, device {:04X}",
            self.addr,
            ids.manufacturer,
            ids.device
        );
        cfg = Configuration::continuous(self.averaging);
        cfg.async_write(self).await?;
        self.initialized = true;
        Ok(ids)
    }

    /// Initialize the sensor, reporting only success.
    pub async fn initialize(&mut self) -> bool {
        match self.init().await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("TMP006 at {:#04x}: initialization failed: {:?}", self.addr, e);
                false
            }
        }
    }

    /// Read the raw sensor voltage and die temperature registers.
    pub async fn read_sample(&mut self) -> Tmp006Result<Sample, I::Error> {
        if !self.initialized {
            return Err(Tmp006Error::Uninitialized);
        }
        let v_obj = decode_signed(self.read_word(Register::ObjectVoltage.addr()).await?);
        let t_die = decode_signed(self.read_word(Register::DieTemperature.addr()).await?);
        Ok(Sample::new(v_obj, t_die))
    }

    /// Read the object temperature in °C.
    pub async fn object_temperature(&mut self) -> Tmp006Result<f64, I::Error> {
        let sample = self.read_sample().await?;
        Ok(sample.object_temperature(self.sensitivity))
    }

    /// Read the object temperature in °C, or [`ABSOLUTE_ZERO_CELSIUS`] on failure.
    ///
    /// NaN when the sample lies outside the conversion's domain, see
    /// [`Sample::object_temperature`].
    pub async fn read_temperature(&mut self) -> f64 {
        match self.object_temperature().await {
            Ok(temp) => temp,
            Err(e) => {
                log::warn!("TMP006 at {:#04x}: read failed: {:?}", self.addr, e);
                ABSOLUTE_ZERO_CELSIUS
            }
        }
    }

    /// Read the die temperature in °C.
    pub async fn die_temperature(&mut self) -> Tmp006Result<DieTemperature, I::Error> {
        if !self.initialized {
            return Err(Tmp006Error::Uninitialized);
        }
        let raw = decode_signed(self.read_word(Register::DieTemperature.addr()).await?);
        Ok(Sample::new(0, raw).die_temperature())
    }

    /// Whether a new conversion result is available.
    pub async fn data_ready(&mut self) -> Tmp006Result<bool, I::Error> {
        Ok(self.configuration().await?.data_ready())
    }

    /// Stop conversions.
    pub async fn power_down(&mut self) -> Tmp006Result<(), I::Error> {
        Configuration::power_down().async_write(self).await?;
        self.initialized = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ABSOLUTE_ZERO_CELSIUS, Configuration, DEFAULT_ADDRESS, DieTemperature, Tmp006Async,
        Tmp006Error,
    };
    use core::{
        future::Future,
        pin::pin,
        task::{Context, Poll, Waker},
    };
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = DEFAULT_ADDRESS;

    // The mock completes every transfer immediately, so polling never parks.
    fn block_on<F: Future>(fut: F) -> F::Output {
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
                return out;
            }
        }
    }

    fn init_transactions() -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write(ADDR, vec![0x02, 0x80, 0x00]),
            I2cTransaction::write_read(ADDR, vec![0xfe], vec![0x54, 0x49]),
            I2cTransaction::write_read(ADDR, vec![0xff], vec![0x00, 0x67]),
            I2cTransaction::write(ADDR, vec![0x02, 0x74, 0x00]),
        ]
    }

    #[test]
    fn async_init_and_read() {
        let mut expectations = init_transactions();
        expectations.push(I2cTransaction::write_read(ADDR, vec![0x00], vec![0x00, 0x00]));
        expectations.push(I2cTransaction::write_read(ADDR, vec![0x01], vec![0x0c, 0x80]));
        let i2c = I2cMock::new(&expectations);
        let mut dev = Tmp006Async::new(i2c);
        assert!(block_on(dev.initialize()));
        let temp = block_on(dev.read_temperature());
        assert!((temp - 29.243395820133173).abs() < 1e-9, "{temp}");
        dev.release().done();
    }

    #[test]
    fn async_read_failure_is_absolute_zero() {
        let mut expectations = init_transactions();
        expectations.push(
            I2cTransaction::write_read(ADDR, vec![0x00], vec![0x00, 0x00])
                .with_error(ErrorKind::Other),
        );
        let i2c = I2cMock::new(&expectations);
        let mut dev = Tmp006Async::new(i2c);
        assert!(block_on(dev.initialize()));
        assert_eq!(block_on(dev.read_temperature()), ABSOLUTE_ZERO_CELSIUS);
        dev.release().done();
    }

    #[test]
    fn async_read_before_init_is_rejected() {
        let i2c = I2cMock::new(&[]);
        let mut dev = Tmp006Async::new(i2c);
        assert!(matches!(
            block_on(dev.read_sample()),
            Err(Tmp006Error::Uninitialized)
        ));
        dev.release().done();
    }

    #[test]
    fn async_initialize_reports_failed_reset() {
        let expectations =
            [I2cTransaction::write(ADDR, vec![0x02, 0x80, 0x00]).with_error(ErrorKind::Other)];
        let i2c = I2cMock::new(&expectations);
        let mut dev = Tmp006Async::new(i2c);
        assert!(!block_on(dev.initialize()));
        assert!(!dev.is_initialized());
        dev.release().done();
    }

    #[test]
    fn async_initialize_reports_failed_configuration() {
        let mut expectations = init_transactions();
        let last = expectations.pop().unwrap();
        expectations.push(last.with_error(ErrorKind::Other));
        let i2c = I2cMock::new(&expectations);
        let mut dev = Tmp006Async::new(i2c);
        assert!(!block_on(dev.initialize()));
        assert!(!dev.is_initialized());
        dev.release().done();
    }

    #[test]
    fn async_die_temperature_and_status() {
        let mut expectations = init_transactions();
        expectations.push(I2cTransaction::write_read(ADDR, vec![0x01], vec![0x0c, 0x83]));
        expectations.push(I2cTransaction::write_read(ADDR, vec![0x02], vec![0x74, 0x80]));
        expectations.push(I2cTransaction::write_read(ADDR, vec![0x02], vec![0x74, 0x00]));
        expectations.push(I2cTransaction::write(ADDR, vec![0x02, 0x00, 0x00]));
        let i2c = I2cMock::new(&expectations);
        let mut dev = Tmp006Async::new(i2c);
        block_on(dev.init()).unwrap();
        assert_eq!(
            block_on(dev.die_temperature()).unwrap(),
            DieTemperature::from_num(25)
        );
        assert!(block_on(dev.data_ready()).unwrap());
        assert_eq!(
            block_on(dev.configuration()).unwrap(),
            Configuration::continuous(Default::default())
        );
        block_on(dev.power_down()).unwrap();
        assert!(!dev.is_initialized());
        assert!(matches!(
            block_on(dev.die_temperature()),
            Err(Tmp006Error::Uninitialized)
        ));
        dev.release().done();
    }
}
