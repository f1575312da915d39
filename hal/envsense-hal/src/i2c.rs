//! I2C bus abstractions
//!
//! Provides the transactional bus trait the drivers consume, plus an
//! adapter for any `embedded-hal` 1.0 I2C master.

/// I2C bus master
///
/// Every method is one atomic bus transaction. A failed transaction is
/// reported through `Self::Error`; drivers treat any error as a transport
/// failure and never inspect it further.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Register address optionally followed by payload bytes
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// Implementations must not release the bus between the write and the
    /// read. The CCS811 in particular returns garbage when the register
    /// address and the read are issued as two separate transactions.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// Lend a bus to a driver without giving it away.
///
/// The caller keeps ownership and serializes access across drivers itself;
/// no locking happens here.
impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        (**self).write_read(address, write_data, read_buf)
    }
}

/// Adapter exposing an `embedded_hal::i2c::I2c` master as an [`I2cBus`]
///
/// `embedded-hal` guarantees `write_read` is issued as a single
/// transaction with a repeated start, which is exactly what the
/// [`I2cBus::write_read`] contract requires.
#[derive(Debug)]
pub struct EmbeddedHalBus<T> {
    inner: T,
}

impl<T> EmbeddedHalBus<T> {
    /// Wrap an `embedded-hal` I2C master
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Get access to the wrapped peripheral
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the wrapped peripheral
    pub fn release(self) -> T {
        self.inner
    }
}

impl<T: embedded_hal::i2c::I2c> I2cBus for EmbeddedHalBus<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.inner.write_read(address, write_data, read_buf)
    }
}
