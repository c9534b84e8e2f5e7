#[derive(Debug)]
/// TMP006 errors
pub enum Tmp006Error<E> {
    /// I2C bus errors.
    I2c(E),
    /// The sensor was read before it was put into continuous conversion mode.
    Uninitialized,
}

impl<E> From<E> for Tmp006Error<E> {
    fn from(value: E) -> Self {
        Self::I2c(value)
    }
}
