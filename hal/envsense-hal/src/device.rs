//! Device handle
//!
//! One handle per physical sensor: which bus it hangs off and its 7-bit
//! address. The handle owns the bus it was given, but no sensor state.

use crate::i2c::I2cBus;

/// Highest valid 7-bit I2C address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Error from building an [`Address`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    /// Value does not fit in 7 bits
    OutOfRange(u8),
}

/// 7-bit I2C address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address(u8);

impl Address {
    /// Build an address, rejecting anything wider than 7 bits
    pub const fn new(raw: u8) -> Result<Self, AddressError> {
        if raw > MAX_ADDRESS {
            Err(AddressError::OutOfRange(raw))
        } else {
            Ok(Self(raw))
        }
    }

    /// Raw address value
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Address {
    type Error = AddressError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

/// A single device on an I2C bus
///
/// Wraps every transaction with the device address so drivers only deal in
/// register commands and payloads.
#[derive(Debug)]
pub struct I2cDevice<B> {
    bus: B,
    bus_index: u8,
    address: Address,
}

impl<B: I2cBus> I2cDevice<B> {
    /// Create a handle for the device at `address` on bus `bus_index`
    ///
    /// `bus_index` is informational only (it identifies the physical bus in
    /// diagnostics); the transactions go to whatever `bus` is passed in.
    pub const fn new(bus: B, bus_index: u8, address: Address) -> Self {
        Self {
            bus,
            bus_index,
            address,
        }
    }

    /// Bus index this device was registered on
    pub const fn bus_index(&self) -> u8 {
        self.bus_index
    }

    /// Device address
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Write a register command (address byte plus optional payload)
    pub fn write(&mut self, command: &[u8]) -> Result<(), B::Error> {
        self.bus.write(self.address.0, command)
    }

    /// Plain read of `buf.len()` bytes
    pub fn read(&mut self, buf: &mut [u8]) -> Result<(), B::Error> {
        self.bus.read(self.address.0, buf)
    }

    /// Select `register` and read `buf.len()` bytes in one combined
    /// transaction
    pub fn write_read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), B::Error> {
        self.bus.write_read(self.address.0, &[register], buf)
    }

    /// Get access to the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Get mutable access to the underlying bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bus that remembers the last address and register it saw
    #[derive(Default)]
    struct LastCall {
        address: u8,
        written: [u8; 4],
        written_len: usize,
    }

    impl I2cBus for LastCall {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            self.address = address;
            self.written_len = data.len().min(4);
            self.written[..self.written_len].copy_from_slice(&data[..self.written_len]);
            Ok(())
        }

        fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), ()> {
            self.address = address;
            buf.fill(0x11);
            Ok(())
        }

        fn write_read(&mut self, address: u8, write: &[u8], buf: &mut [u8]) -> Result<(), ()> {
            self.write(address, write)?;
            buf.fill(0x22);
            Ok(())
        }
    }

    #[test]
    fn test_address_range() {
        assert_eq!(Address::new(0x57).unwrap().value(), 0x57);
        assert_eq!(Address::new(0x7F).unwrap().value(), 0x7F);
        assert_eq!(Address::new(0x80), Err(AddressError::OutOfRange(0x80)));
        assert!(Address::try_from(0xFF).is_err());
    }

    #[test]
    fn test_device_prefixes_address() {
        let mut dev = I2cDevice::new(LastCall::default(), 1, Address::new(0x5A).unwrap());
        dev.write(&[0x01, 0x10]).unwrap();
        assert_eq!(dev.bus().address, 0x5A);
        assert_eq!(&dev.bus().written[..dev.bus().written_len], &[0x01, 0x10]);
        assert_eq!(dev.bus_index(), 1);
    }

    #[test]
    fn test_write_read_sends_register_only() {
        let mut dev = I2cDevice::new(LastCall::default(), 0, Address::new(0x5A).unwrap());
        let mut buf = [0u8; 8];
        dev.write_read(0x02, &mut buf).unwrap();
        assert_eq!(&dev.bus().written[..dev.bus().written_len], &[0x02]);
        assert_eq!(buf, [0x22; 8]);
    }
}
