use crate::{Tmp006, Tmp006Error};
use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Addresses of registers in the TMP006.
pub trait Addressing {
    /// Register pointer used for both reading and writing.
    const REGISTER: u8;
}

/// Trait for interacting with the registers of a TMP006.
pub trait Interact: Addressing {
    /// Read the register value from the TMP006.
    fn read<I: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Tmp006<I>,
    ) -> Result<(), Tmp006Error<I::Error>>;
    /// Write the register value to the TMP006.
    fn write<I: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Tmp006<I>,
    ) -> Result<(), Tmp006Error<I::Error>>;
}
