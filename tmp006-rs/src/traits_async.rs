#![allow(async_fn_in_trait)]
use crate::{Tmp006Async, Tmp006Error, traits::Addressing};
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

/// Trait for interacting with the registers of a TMP006 asynchronously.
pub trait InteractAsync: Addressing {
    /// Read the register value from the TMP006 asynchronously.
    async fn async_read<I: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Tmp006Async<I>,
    ) -> Result<(), Tmp006Error<I::Error>>;
    /// Write the register value to the TMP006 asynchronously.
    async fn async_write<I: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Tmp006Async<I>,
    ) -> Result<(), Tmp006Error<I::Error>>;
}
