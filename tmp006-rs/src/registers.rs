use crate::{
    Tmp006, Tmp006Result,
    traits::{Addressing, Interact},
};
use bitfield_struct::bitfield;
use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Register pointers of the TMP006.
///
/// Every register is 16 bits wide and transferred MSB first.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Register {
    /// Sensor voltage (V_OBJ), read only.
    ObjectVoltage = 0x00,
    /// Local (die) temperature (T_DIE), read only.
    DieTemperature = 0x01,
    /// Configuration register.
    Configuration = 0x02,
    /// Manufacturer ID, read only.
    ManufacturerId = 0xfe,
    /// Device ID, read only.
    DeviceId = 0xff,
}

impl Register {
    /// The register pointer byte.
    #[inline]
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

pub(crate) const fn encode_word(word: u16) -> [u8; 2] {
    word.to_be_bytes()
}

pub(crate) const fn decode_unsigned(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

pub(crate) const fn decode_signed(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// Number of ADC samples averaged into one result (CR field).
///
/// More samples lower the noise and lengthen the conversion time
/// (0.25 s per sample).
#[repr(u8)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SampleAverage {
    /// 1 sample, 4 conversions per second.
    Samples1 = 0b000,
    /// 2 samples, 2 conversions per second.
    Samples2 = 0b001,
    /// 4 samples, 1 conversion per second.
    #[default]
    Samples4 = 0b010,
    /// 8 samples, 0.5 conversions per second.
    Samples8 = 0b011,
    /// 16 samples, 0.25 conversions per second.
    Samples16 = 0b100,
}

impl SampleAverage {
    /// Number of samples averaged per conversion.
    pub const fn samples(&self) -> u8 {
        1 << (*self as u8)
    }

    /// Time for one averaged conversion, in milliseconds.
    pub const fn conversion_time_ms(&self) -> u32 {
        250 * self.samples() as u32
    }

    pub(crate) const fn from_bits(bits: u8) -> Option<Self> {
        use SampleAverage::*;
        match bits {
            0b000 => Some(Samples1),
            0b001 => Some(Samples2),
            0b010 => Some(Samples4),
            0b011 => Some(Samples8),
            0b100 => Some(Samples16),
            _ => None,
        }
    }
}

impl TryFrom<u8> for SampleAverage {
    type Error = &'static str;

    /// Converts a sample count (1, 2, 4, 8 or 16).
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use SampleAverage::*;
        match value {
            1 => Ok(Samples1),
            2 => Ok(Samples2),
            4 => Ok(Samples4),
            8 => Ok(Samples8),
            16 => Ok(Samples16),
            _ => Err("Sample count must be one of 1, 2, 4, 8 or 16"),
        }
    }
}

/// # Configuration register
///
/// Controls the operating mode, the averaging of the ADC and the DRDY
/// output. After a power-on reset or a software reset the register
/// reads 7400h: continuous conversion with 4 averaged samples.
#[bitfield(u16)]
#[derive(PartialEq, Eq)]
pub struct Configuration {
    #[bits(7)]
    __: u8,
    /// Conversion-ready flag. Set when a conversion completes and cleared
    /// when either result register is read or the configuration is written.
    pub data_ready: bool,
    /// Enables the DRDY output pin.
    pub data_ready_pin: bool,
    /// Averaging field (CR). See [`SampleAverage`].
    #[bits(3)]
    pub conversion_rate: u8,
    /// Mode of operation (MOD). `000` powers down, `111` converts continuously.
    #[bits(3)]
    pub mode: u8,
    /// Writing 1 performs a software reset. Self-clearing.
    pub reset: bool,
}

impl Configuration {
    /// Power-down mode.
    pub const MODE_POWER_DOWN: u8 = 0b000;
    /// Sensor and die continuous conversion mode.
    pub const MODE_CONTINUOUS: u8 = 0b111;
    /// Software reset command word (8000h).
    pub const RESET: Self = Self::from_bits(0x8000);

    /// Configuration word for continuous conversion with the given averaging.
    ///
    /// Yields 7000h, 7200h, 7400h, 7600h or 7800h.
    pub const fn continuous(averaging: SampleAverage) -> Self {
        Self::new()
            .with_mode(Self::MODE_CONTINUOUS)
            .with_conversion_rate(averaging as u8)
    }

    /// Configuration word that stops all conversions.
    pub const fn power_down() -> Self {
        Self::new().with_mode(Self::MODE_POWER_DOWN)
    }

    /// Averaging decoded from the CR field, if it holds a valid value.
    pub const fn averaging(&self) -> Option<SampleAverage> {
        SampleAverage::from_bits(self.conversion_rate())
    }
}

impl Interact for Configuration {
    fn read<I: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Tmp006<I>,
    ) -> Tmp006Result<(), I::Error> {
        *self = Self::from_bits(decode_unsigned(dev.read_word(Self::REGISTER)?));
        Ok(())
    }

    fn write<I: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Tmp006<I>,
    ) -> Tmp006Result<(), I::Error> {
        dev.write_word(Self::REGISTER, self.into_bits())
    }
}

impl Addressing for Configuration {
    const REGISTER: u8 = Register::Configuration.addr();
}

/// Identification words of the sensor.
///
/// Read during initialization for information only.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeviceIds {
    /// Manufacturer ID (5449h, "TI", for Texas Instruments parts).
    pub manufacturer: u16,
    /// Device ID (0067h for the TMP006).
    pub device: u16,
}

impl DeviceIds {
    /// Manufacturer ID reported by Texas Instruments parts.
    pub const TI_MANUFACTURER: u16 = 0x5449;
    /// Device ID reported by the TMP006.
    pub const TMP006_DEVICE: u16 = 0x0067;

    /// Whether the identification matches a genuine TMP006.
    pub fn is_tmp006(&self) -> bool {
        self.manufacturer == Self::TI_MANUFACTURER && self.device == Self::TMP006_DEVICE
    }
}

impl<I: I2c<SevenBitAddress>> Tmp006<I> {
    pub(crate) fn read_word(&mut self, register: u8) -> Tmp006Result<[u8; 2], I::Error> {
        let mut buf = [0; 2];
        self.i2c.write_read(self.addr, &[register], &mut buf)?;
        Ok(buf)
    }

    pub(crate) fn write_word(&mut self, register: u8, word: u16) -> Tmp006Result<(), I::Error> {
        let [msb, lsb] = encode_word(word);
        self.i2c.write(self.addr, &[register, msb, lsb])?;
        Ok(())
    }

    /// Read both identification registers.
    pub fn device_ids(&mut self) -> Tmp006Result<DeviceIds, I::Error> {
        let manufacturer = decode_unsigned(self.read_word(Register::ManufacturerId.addr())?);
        let device = decode_unsigned(self.read_word(Register::DeviceId.addr())?);
        Ok(DeviceIds {
            manufacturer,
            device,
        })
    }

    /// Read back the configuration register.
    pub fn configuration(&mut self) -> Tmp006Result<Configuration, I::Error> {
        let mut cfg = Configuration::new();
        cfg.read(self)?;
        Ok(cfg)
    }
}
