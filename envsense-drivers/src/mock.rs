//! Scripted bus and counting delay for driver tests

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use envsense_hal::I2cBus;

/// One recorded bus transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Write(Vec<u8>),
    Read(usize),
    WriteRead(u8, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nack;

/// Bus that records every transaction and serves queued read responses
///
/// Reads with nothing queued fail, as does any read after `fail_next_read`.
#[derive(Debug, Default)]
pub struct MockBus {
    pub ops: Vec<Op>,
    pub address: Option<u8>,
    responses: VecDeque<Option<Vec<u8>>>,
    fail_writes: bool,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the next read or write-read
    pub fn respond(&mut self, bytes: &[u8]) -> &mut Self {
        self.responses.push_back(Some(bytes.to_vec()));
        self
    }

    /// Make the next read or write-read fail
    pub fn fail_next_read(&mut self) -> &mut Self {
        self.responses.push_back(None);
        self
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Payloads of plain writes, in order
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    fn serve(&mut self, buf: &mut [u8]) -> Result<(), Nack> {
        match self.responses.pop_front() {
            Some(Some(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(())
            }
            _ => Err(Nack),
        }
    }
}

impl I2cBus for MockBus {
    type Error = Nack;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Nack> {
        self.address = Some(address);
        self.ops.push(Op::Write(data.to_vec()));
        if self.fail_writes {
            return Err(Nack);
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Nack> {
        self.address = Some(address);
        self.ops.push(Op::Read(buf.len()));
        self.serve(buf)
    }

    fn write_read(&mut self, address: u8, write: &[u8], buf: &mut [u8]) -> Result<(), Nack> {
        self.address = Some(address);
        self.ops.push(Op::WriteRead(write[0], buf.len()));
        self.serve(buf)
    }
}

/// Delay that only adds up the requested time
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
